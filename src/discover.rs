use std::path::{Path, PathBuf};

use crate::fs::{self, Fs};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Input path {0:?} has no usable file name")]
    NoBasename(PathBuf),
    #[error("while looking for input files")]
    Fs(#[from] fs::Error),
}

/// Instrument family, inferred from the first letter of a line's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    Eagle,
    Hawk,
}

impl Sensor {
    pub fn from_basename(basename: &str) -> Option<Self> {
        match basename.chars().next() {
            Some('e') => Some(Self::Eagle),
            Some('h') => Some(Self::Hawk),
            _ => None,
        }
    }

    /// Text that identifies this sensor's auxiliary files.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Eagle => "eagle",
            Self::Hawk => "hawk",
        }
    }
}

/// One input file to be processed into a finished product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// file name without extension; also used as the job name
    pub basename: String,
    /// absolute path to the input file
    pub path: PathBuf,
    pub sensor: Option<Sensor>,
}

impl Item {
    pub fn new(path: PathBuf) -> Result<Self, Error> {
        let basename = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::NoBasename(path.clone()))?
            .to_owned();
        let sensor = Sensor::from_basename(&basename);
        Ok(Self {
            basename,
            path,
            sensor,
        })
    }

    /// Directory containing the input file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("/"))
    }
}

/// Collect the items for a run.
///
/// A single directory argument is searched for files ending in `suffix`;
/// otherwise every argument is taken as an input file. Items are sorted by path.
pub fn discover(fs: &Fs, inputs: &[PathBuf], suffix: &str) -> Result<Vec<Item>, Error> {
    let paths = match inputs {
        [dir] if fs.is_dir(dir) => {
            log::info!("searching {dir:?} for files ending in \"{suffix}\"");
            fs.list_files(dir, suffix)?
        }
        _ => inputs.to_vec(),
    };
    let mut items = paths
        .into_iter()
        .map(Item::new)
        .collect::<Result<Vec<_>, _>>()?;
    items.sort_by(|a, b| a.path.cmp(&b.path));
    items.dedup_by(|a, b| a.path == b.path);
    Ok(items)
}
