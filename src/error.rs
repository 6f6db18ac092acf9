use pipeline::ConfigurationError;

use crate::resolve::ResolutionError;
use crate::submit::SubmissionError;

/// Everything that can go wrong while processing one item.
///
/// Resolution and submission errors only affect their own item;
/// configuration errors abort the batch.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl ItemError {
    /// Short, stable name for the kind of failure.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Resolution(e) => e.kind(),
            Self::Configuration(_) => "configuration",
            Self::Submission(e) => e.kind(),
        }
    }
}

/// Render an error and its sources on one line.
pub fn error_chain(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(e) = source {
        msg.push_str(": ");
        msg.push_str(&e.to_string());
        source = e.source();
    }
    msg
}
