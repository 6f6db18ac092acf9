use pipeline::{ConfigurationError, Flag, PipelineSpec};

use crate::discover::Item;
use crate::error::{error_chain, ItemError};
use crate::fs::Fs;
use crate::resolve::{PathResolver, ResolutionError};
use crate::submit::{Directives, JobDescriptor, SubmissionResult, Submitter};
use crate::ui::Ui;

use super::{BatchResult, FailureRecord, ItemState, ItemTracker};

/// Runs every item of a batch through resolution, rendering and submission.
///
/// A resolution or submission failure only stops its own item;
/// a configuration error stops the whole batch, since every
/// later item would fail the same way.
pub struct BatchOrchestrator<'a> {
    pipeline: &'a PipelineSpec,
    resolver: PathResolver<'a>,
    submitter: Submitter<'a>,
    directives: Directives,
    flags: &'a [Flag],
    fs: &'a Fs,
    ui: &'a Ui,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(
        pipeline: &'a PipelineSpec,
        resolver: PathResolver<'a>,
        submitter: Submitter<'a>,
        directives: Directives,
        flags: &'a [Flag],
        fs: &'a Fs,
        ui: &'a Ui,
    ) -> Self {
        Self {
            pipeline,
            resolver,
            submitter,
            directives,
            flags,
            fs,
            ui,
        }
    }

    pub fn run(&self, mut items: Vec<Item>) -> Result<BatchResult, ConfigurationError> {
        self.resolver.check_configuration()?;

        items.sort_by(|a, b| a.path.cmp(&b.path));
        log::info!(
            "running {} pipeline on {} items ({:?})",
            self.pipeline.name,
            items.len(),
            self.submitter.mode()
        );

        let total = items.len();
        let mut result = BatchResult::default();

        for (i, item) in items.iter().enumerate() {
            self.ui.progress(i + 1, total, &item.basename);
            let mut tracker = ItemTracker::new(&item.basename);

            match self.process(item, &mut tracker) {
                Ok(SubmissionResult::DryRun { command }) => {
                    tracker.advance(ItemState::DryRun);
                    self.ui.dry_run(&command);
                    result.dry_run += 1;
                }
                Ok(SubmissionResult::Submitted { command, job_id }) => {
                    self.ui.submitted(&command, &job_id);
                    result.record_job(&item.basename, &job_id);
                    tracker.advance(ItemState::Submitted(job_id));
                }
                Err(ItemError::Configuration(e)) => {
                    log::error!("{}: configuration error, stopping batch", item.basename);
                    return Err(e);
                }
                Err(ItemError::Resolution(e @ ResolutionError::AlreadyProcessed { .. })) => {
                    tracker.advance(ItemState::Skipped);
                    self.ui.skipped(&item.basename, &e.to_string());
                    result.record_skipped(&item.basename);
                }
                Err(e) => {
                    let phase = tracker.state().phase();
                    tracker.advance(match &e {
                        ItemError::Submission(_) => ItemState::SubmissionFailed,
                        _ => ItemState::ResolutionFailed,
                    });
                    let message = error_chain(&e);
                    self.ui.failed(&item.basename, &message);
                    result.record_failure(FailureRecord {
                        item: item.basename.clone(),
                        phase,
                        kind: e.kind(),
                        message,
                    });
                }
            }
            debug_assert!(tracker.state().is_terminal(), "{} left unfinished", item.basename);
        }

        result.finish();
        Ok(result)
    }

    fn process(&self, item: &Item, tracker: &mut ItemTracker) -> Result<SubmissionResult, ItemError> {
        let resolved = self.resolver.resolve(item)?;
        tracker.advance(ItemState::Resolved);

        let body = self.pipeline.render(&resolved, self.flags)?;
        let job = JobDescriptor::new(item, &body, &self.directives, self.fs);
        tracker.advance(ItemState::Rendered);

        Ok(self.submitter.submit(&job)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::Phase;
    use crate::resolve::Conventions;
    use crate::submit::Mode;
    use pipeline::{presets, Source};
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn run_batch(
        pipeline: &PipelineSpec,
        conventions: &Conventions,
        fs: &Fs,
        inputs: &[PathBuf],
    ) -> Result<BatchResult, ConfigurationError> {
        let ui = Ui::new(false);
        let resolver = PathResolver::new(conventions, pipeline, fs);
        let submitter = Submitter::new(fs, "/nonexistent/bsub", Mode::DryRun);
        let directives = Directives::for_pipeline(pipeline, None, None);
        let orchestrator =
            BatchOrchestrator::new(pipeline, resolver, submitter, directives, &[], fs, &ui);
        let items = inputs.iter().map(|p| Item::new(p.clone()).unwrap()).collect();
        orchestrator.run(items)
    }

    fn touch(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = dir.join(name);
                std::fs::write(&path, "").unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_failure_is_isolated() -> anyhow::Result<()> {
        let input = tempdir()?;
        let output = tempdir()?;
        let fs = Fs::new(output.path(), output.path());
        let mut inputs = touch(input.path(), &["photo_c.jp2", "photo_a.jp2"]);
        inputs.push(input.path().join("photo_b.jp2"));

        let pipeline = presets::jp2_to_tiff()?;
        let result = run_batch(&pipeline, &Conventions::default(), &fs, &inputs)?;

        assert_eq!(result.dry_run, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.total(), 3);
        assert_eq!(result.failures.len(), 1);
        let failure = &result.failures[0];
        assert_eq!(failure.item, "photo_b");
        assert_eq!(failure.phase, Phase::Resolve);
        assert_eq!(failure.kind, "missing-file");

        assert!(fs.job_script("photo_a").is_file());
        assert!(fs.job_script("photo_c").is_file());
        assert!(!fs.job_script("photo_b").exists());
        Ok(())
    }

    #[test]
    fn test_missing_transform_grid_aborts() -> anyhow::Result<()> {
        let input = tempdir()?;
        let output = tempdir()?;
        let fs = Fs::new(output.path(), output.path());
        let inputs = touch(input.path(), &["strip01.all", "strip02.all"]);

        let pipeline = PipelineSpec::builder("projected-lidar")
            .input_suffix(".all")
            .role("basename", Source::Basename)
            .role("ascii", Source::Input)
            .role("projection", Source::Projection)
            .output("las", "${basename}.las", true)
            .stage("Convert", "convert -i $ascii -p \"$projection\" -o $las")
            .build()?;
        let grid = input.path().join("OSTN02_NTv2.gsb");
        let conventions = Conventions {
            projection: Some("osng".to_owned()),
            transform_grid: grid.clone(),
            ..Conventions::default()
        };

        let e = run_batch(&pipeline, &conventions, &fs, &inputs).unwrap_err();
        assert!(matches!(&e, ConfigurationError::MissingTransformGrid(p) if *p == grid));
        assert!(e.to_string().contains("OSTN02_NTv2.gsb"));
        assert!(!fs.job_script("strip01").exists());
        assert!(!fs.job_script("strip02").exists());
        Ok(())
    }

    #[test]
    fn test_missing_transform_grid_reported_despite_item_failures() -> anyhow::Result<()> {
        let root = tempdir()?;
        let output = tempdir()?;
        let fs = Fs::new(output.path(), output.path());
        let level1b = root.path().join("flightlines/level1b");
        std::fs::create_dir_all(&level1b)?;
        std::fs::create_dir_all(root.path().join("dem"))?;
        // a line with no mask, so every item fails before its projection:
        let inputs = touch(&level1b, &["e153a011b.bil"]);
        touch(&root.path().join("dem"), &["uk.dem"]);

        let pipeline = presets::apl()?;
        let conventions = Conventions {
            dem: Some(root.path().join("dem/uk.dem")),
            projection: Some("osng".to_owned()),
            transform_grid: root.path().join("missing.gsb"),
            ..Conventions::default()
        };

        let e = run_batch(&pipeline, &conventions, &fs, &inputs).unwrap_err();
        assert!(matches!(e, ConfigurationError::MissingTransformGrid(_)));
        assert!(!fs.job_script("e153a011b").exists());
        Ok(())
    }

    #[test]
    fn test_dry_run_has_no_job_ids() -> anyhow::Result<()> {
        let input = tempdir()?;
        let output = tempdir()?;
        let fs = Fs::new(output.path(), output.path());
        let inputs = touch(input.path(), &["strip01.all", "strip02.all"]);

        let pipeline = presets::ascii_to_las()?;
        let result = run_batch(&pipeline, &Conventions::default(), &fs, &inputs)?;
        assert_eq!(result.dry_run, 2);
        assert_eq!(result.submitted, 0);
        assert!(result.jobs.is_empty());

        let script = std::fs::read_to_string(fs.job_script("strip01"))?;
        assert!(script.starts_with("#!/bin/bash\n#BSUB -J strip01\n"));
        assert!(script.contains("module load contrib/arsf/lastools contrib/arsf/arsf_tools\n"));
        assert!(script.contains(&format!(
            "convert_pre2009_lidar.py -i {} -o {}\n",
            inputs[0].display(),
            fs.output("strip01.las").display()
        )));
        Ok(())
    }

    #[test]
    fn test_processed_items_are_skipped() -> anyhow::Result<()> {
        let input = tempdir()?;
        let output = tempdir()?;
        let fs = Fs::new(output.path(), output.path());
        let inputs = touch(input.path(), &["strip01.all", "strip02.all"]);
        touch(output.path(), &["strip01.las"]);

        let pipeline = presets::ascii_to_las()?;
        let result = run_batch(&pipeline, &Conventions::default(), &fs, &inputs)?;
        assert_eq!(result.skipped, 1);
        assert_eq!(result.skipped_items, vec!["strip01".to_owned()]);
        assert_eq!(result.dry_run, 1);
        assert!(!result.has_failures());
        assert!(!fs.job_script("strip01").exists());
        Ok(())
    }
}
