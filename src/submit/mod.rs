use std::io;
use std::process::ExitStatus;

use crate::fs;

/// The scheduler-ready unit of work for one item
mod job;
pub use job::{Directives, JobDescriptor};

/// Utility for generating the job script text
mod job_script_builder;
use job_script_builder::JobScriptBuilder;

/// Run the scheduler's submission command
mod run_cmd;
pub use run_cmd::parse_job_id;

/// Writes job scripts and hands them to the scheduler
mod submitter;
pub use submitter::Submitter;

/// Default scheduler submission command (LSF).
pub const DEFAULT_SCHEDULER: &str = "bsub";

/// Printed after a batch has been submitted.
pub const STATUS_HINT: &str = "Check status using bjobs";

/// Whether jobs are actually handed to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// write job scripts and print the submission command only
    DryRun,
    /// write job scripts and submit them
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    DryRun { command: String },
    Submitted { command: String, job_id: String },
}

/// The scheduler refused a job or couldn't be reached. Only the one item fails.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("couldn't write job script")]
    Script(#[from] fs::Error),
    #[error("couldn't run scheduler command \"{scheduler}\"")]
    Spawn {
        scheduler: String,
        #[source]
        source: io::Error,
    },
    #[error("couldn't pass job script to the scheduler")]
    Stdin(#[source] io::Error),
    #[error("scheduler rejected the job ({status}): {stderr}")]
    Rejected { status: ExitStatus, stderr: String },
    #[error("couldn't find a job id in scheduler output \"{0}\"")]
    NoJobId(String),
}

impl SubmissionError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Script(_) => "script-write",
            Self::Spawn { .. } | Self::Stdin(_) => "scheduler-unreachable",
            Self::Rejected { .. } => "scheduler-rejected",
            Self::NoJobId(_) => "no-job-id",
        }
    }
}
