use std::path::PathBuf;

use super::Fs;

/// Utility fns for making the paths a job needs.
impl Fs {
    /// $OUTPUT/name
    pub fn output(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }

    /// $SCRIPTS/basename_process.bsub
    pub fn job_script(&self, basename: &str) -> PathBuf {
        self.scripts_dir.join(format!("{basename}_process.bsub"))
    }

    /// $SCRIPTS/basename_%J.o (the scheduler replaces %J with the job id)
    pub fn job_stdout(&self, basename: &str) -> PathBuf {
        self.scripts_dir.join(format!("{basename}_%J.o"))
    }

    /// $SCRIPTS/basename_%J.e
    pub fn job_stderr(&self, basename: &str) -> PathBuf {
        self.scripts_dir.join(format!("{basename}_%J.e"))
    }
}
