use std::path::PathBuf;

use crate::Setting;

/// Errors in run setup. These recur identically for every item,
/// so they abort the whole batch rather than skipping a single item.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("stage \"{stage}\" references undeclared role \"{role}\"")]
    UndeclaredRole { stage: String, role: String },
    #[error("conditional stage \"{stage}\" may only reference output roles, but uses \"{role}\"")]
    ConditionalNonOutput { stage: String, role: String },
    #[error("role \"{0}\" is declared more than once")]
    DuplicateRole(String),
    #[error("role \"{role}\" depends on \"{dependency}\", which is not declared before it")]
    ForwardReference { role: String, dependency: String },
    #[error("role \"{0}\" has no resolved value")]
    UnresolvedRole(String),
    #[error("role \"{0}\" resolved to an empty value")]
    EmptyValue(String),
    #[error("invalid template for {context}")]
    Template {
        context: String,
        #[source]
        source: template::Error,
    },
    #[error("no value given for {0}, which this pipeline requires")]
    MissingSetting(Setting),
    #[error(
        "could not find transform grid file {0:?}; this file is required for accurate reprojection"
    )]
    MissingTransformGrid(PathBuf),
}
