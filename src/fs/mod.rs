use std::path::{Path, PathBuf};
use std::{fs, io};

/// Defines fns for creating common paths in the output and scripts directories
mod paths;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Specified directory {0:?} is not a directory")]
    NotDirectory(PathBuf),
    #[error("Can't write {0:?}: it is outside the output and scripts directories")]
    NotWhitelisted(PathBuf),
    #[error("{action} {path:?}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_err<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> Error + 'a {
    move |source| Error::Io {
        action,
        path: path.to_path_buf(),
        source,
    }
}

/// All file operations in the crate should go through this struct.
///
/// Writes are only performed inside the output directory and the
/// job scripts directory; anything else is refused.
#[derive(Debug)]
pub struct Fs {
    /// where pipeline products are written
    output_dir: PathBuf,
    /// where job scripts and scheduler logs are written
    scripts_dir: PathBuf,
}

impl Fs {
    pub fn new(output_dir: &Path, scripts_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            scripts_dir: scripts_dir.to_path_buf(),
        }
    }

    /// Create the output and scripts directories if they don't exist yet.
    pub fn ensure_dirs_exist(&self, verbose: bool) -> Result<(), Error> {
        self.ensure_dir_exists("Output", &self.output_dir, verbose)?;
        if self.scripts_dir != self.output_dir {
            self.ensure_dir_exists("Output scripts", &self.scripts_dir, verbose)?;
        }
        Ok(())
    }

    fn ensure_dir_exists(&self, label: &str, dir: &Path, verbose: bool) -> Result<(), Error> {
        if !self.exists(dir) {
            eprintln!("{label} directory {dir:?} does not exist - creating it now");
            fs::create_dir_all(dir).map_err(io_err("creating directory", dir))?;
        } else if !self.is_dir(dir) {
            return Err(Error::NotDirectory(dir.to_path_buf()));
        } else if verbose {
            eprintln!("{label} directory {dir:?} already exists. Not creating.");
        }
        Ok(())
    }

    /// Check if path exists on disk.
    pub fn exists<T: AsRef<Path>>(&self, path: T) -> bool {
        let path = path.as_ref();
        path.exists() || path.is_symlink()
    }

    /// Check if path is a regular file (following symlinks).
    pub fn is_file<T: AsRef<Path>>(&self, path: T) -> bool {
        path.as_ref().is_file()
    }

    /// Check if path is a directory (following symlinks).
    pub fn is_dir<T: AsRef<Path>>(&self, path: T) -> bool {
        path.as_ref().is_dir()
    }

    /// Write entire str to a file, replacing any previous contents.
    pub fn write_file<T: AsRef<Path>>(&self, path: T, text: &str) -> Result<(), Error> {
        let path = path.as_ref();
        self.check_whitelist(path)?;
        fs::write(path, text).map_err(io_err("writing file", path))
    }

    /// Regular files in `dir` whose names end with `suffix`, sorted.
    pub fn list_files<T: AsRef<Path>>(&self, dir: T, suffix: &str) -> Result<Vec<PathBuf>, Error> {
        let dir = dir.as_ref();
        let mut files = Vec::with_capacity(64);
        for entry in fs::read_dir(dir).map_err(io_err("listing directory", dir))? {
            let path = entry.map_err(io_err("listing directory", dir))?.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(suffix));
            if matches && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn is_whitelisted(&self, path: &Path) -> bool {
        path.starts_with(&self.output_dir) || path.starts_with(&self.scripts_dir)
    }

    fn check_whitelist(&self, path: &Path) -> Result<(), Error> {
        if self.is_whitelisted(path) {
            Ok(())
        } else {
            Err(Error::NotWhitelisted(path.to_path_buf()))
        }
    }
}
