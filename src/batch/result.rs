use super::Phase;

/// One item that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    /// the item's basename
    pub item: String,
    pub phase: Phase,
    /// short, stable error kind, e.g. `missing-auxiliary`
    pub kind: &'static str,
    pub message: String,
}

/// What happened to every item in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub submitted: usize,
    pub dry_run: usize,
    pub skipped: usize,
    pub failed: usize,
    /// sorted by item
    pub failures: Vec<FailureRecord>,
    pub skipped_items: Vec<String>,
    /// (item, job id) for every job the scheduler accepted
    pub jobs: Vec<(String, String)>,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.submitted + self.dry_run + self.skipped + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub(super) fn record_failure(&mut self, failure: FailureRecord) {
        self.failed += 1;
        self.failures.push(failure);
    }

    pub(super) fn record_skipped(&mut self, item: &str) {
        self.skipped += 1;
        self.skipped_items.push(item.to_owned());
    }

    pub(super) fn record_job(&mut self, item: &str, job_id: &str) {
        self.submitted += 1;
        self.jobs.push((item.to_owned(), job_id.to_owned()));
    }

    pub(super) fn finish(&mut self) {
        self.failures.sort_by(|a, b| a.item.cmp(&b.item));
    }
}
