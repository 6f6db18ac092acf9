use crate::fs::Fs;

use super::run_cmd::run_scheduler;
use super::{parse_job_id, JobDescriptor, Mode, SubmissionError, SubmissionResult};

/// Persists job scripts and, in submit mode, hands them to the scheduler.
pub struct Submitter<'a> {
    fs: &'a Fs,
    /// submission command, e.g. `bsub`
    scheduler: &'a str,
    mode: Mode,
}

impl<'a> Submitter<'a> {
    pub fn new(fs: &'a Fs, scheduler: &'a str, mode: Mode) -> Self {
        Self {
            fs,
            scheduler,
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Write the job script, then either return the equivalent submission
    /// command (dry run) or submit it and return the scheduler's job id.
    pub fn submit(&self, job: &JobDescriptor) -> Result<SubmissionResult, SubmissionError> {
        self.fs.write_file(&job.script_path, &job.script)?;
        let command = job.submission_command(self.scheduler);

        match self.mode {
            Mode::DryRun => Ok(SubmissionResult::DryRun { command }),
            Mode::Submit => {
                let output = run_scheduler(self.scheduler, &job.submission_args(), &job.script)?;
                if !output.status.success() {
                    return Err(SubmissionError::Rejected {
                        status: output.status,
                        stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
                    });
                }
                let stdout = String::from_utf8_lossy(&output.stdout);
                let job_id = parse_job_id(&stdout)
                    .ok_or_else(|| SubmissionError::NoJobId(stdout.trim().to_owned()))?
                    .to_owned();
                log::info!("{} submitted as job {job_id}", job.name);
                Ok(SubmissionResult::Submitted { command, job_id })
            }
        }
    }
}
