use std::path::{Path, PathBuf};

use crate::discover::Item;

use super::ResolutionError;

/// Why no single candidate could be chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ambiguity {
    NoCandidates,
    /// several candidates, and the item's sensor tag matched none or more than one
    Unresolved(Vec<PathBuf>),
}

impl Ambiguity {
    pub fn into_error(self, role: &str, dir: &Path, flag: &'static str) -> ResolutionError {
        match self {
            Self::NoCandidates => ResolutionError::MissingAuxiliary {
                role: role.to_owned(),
                dir: dir.to_path_buf(),
                flag,
            },
            Self::Unresolved(candidates) => ResolutionError::AmbiguousAuxiliary {
                role: role.to_owned(),
                candidates,
                flag,
            },
        }
    }
}

/// Choose the one auxiliary file that belongs to `item`.
///
/// A lone candidate is returned as-is. With several, the one whose file name
/// contains the item's sensor keyword wins; no match or several matches is an error.
pub fn disambiguate(mut candidates: Vec<PathBuf>, item: &Item) -> Result<PathBuf, Ambiguity> {
    candidates.sort();
    if candidates.len() <= 1 {
        return candidates.pop().ok_or(Ambiguity::NoCandidates);
    }

    let Some(sensor) = item.sensor else {
        return Err(Ambiguity::Unresolved(candidates));
    };
    let keyword = sensor.keyword();
    let mut matching = candidates.iter().filter(|path| {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.contains(keyword))
    });
    match (matching.next(), matching.next()) {
        (Some(only), None) => Ok(only.clone()),
        _ => Err(Ambiguity::Unresolved(candidates)),
    }
}
