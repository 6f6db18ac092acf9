use std::path::PathBuf;

use crate::fs;

/// Directory overrides and pass-through settings for a run
mod conventions;
pub use conventions::Conventions;

/// Picks one auxiliary file out of several candidates
mod ambiguity;
pub use ambiguity::{disambiguate, Ambiguity};

/// Computes every role value for one item
mod resolver;
pub use resolver::{projection_tag, PathResolver};

/// A role for one item could not be resolved. The item is skipped; the batch goes on.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("{role} file {path:?} does not exist")]
    MissingFile { role: String, path: PathBuf },
    #[error("output {path:?} already exists; remove it to process this item again")]
    AlreadyProcessed { path: PathBuf },
    #[error("couldn't find a {role} file in {dir:?}; it must be supplied explicitly using {flag}")]
    MissingAuxiliary {
        role: String,
        dir: PathBuf,
        flag: &'static str,
    },
    #[error("found {} possible {role} files {candidates:?}; it must be supplied explicitly using {flag}", .candidates.len())]
    AmbiguousAuxiliary {
        role: String,
        candidates: Vec<PathBuf>,
        flag: &'static str,
    },
    #[error("can't infer the {role} directory: {dir:?} does not contain \"{pattern}\"; supply it using {flag}")]
    NoConvention {
        role: String,
        dir: PathBuf,
        pattern: &'static str,
        flag: &'static str,
    },
    #[error("path {0:?} is not valid UTF-8")]
    PathEncoding(PathBuf),
    #[error("filesystem error")]
    Fs(#[from] fs::Error),
}

impl ResolutionError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => "missing-file",
            Self::AlreadyProcessed { .. } => "already-processed",
            Self::MissingAuxiliary { .. } => "missing-auxiliary",
            Self::AmbiguousAuxiliary { .. } => "ambiguous-auxiliary",
            Self::NoConvention { .. } => "no-convention",
            Self::PathEncoding(_) => "path-encoding",
            Self::Fs(_) => "filesystem",
        }
    }
}
