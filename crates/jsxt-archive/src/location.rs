use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::extract::ZipSource;

/// Resolved path of the archive that carries the toolchain.
///
/// Resolved once at startup and handed down; nothing below this type asks
/// the process where it was loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveLocation {
    path: PathBuf,
}

impl ArchiveLocation {
    /// The running executable, which carries the toolchain as a zip payload.
    pub fn current_exe() -> Result<Self> {
        let exe = std::env::current_exe().map_err(|e| Error::LocationUnresolvable {
            reason: format!("cannot determine the running executable: {e}"),
        })?;
        Self::from_path(exe)
    }

    /// An explicit archive path. It must name an existing regular file.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(Self { path }),
            Ok(_) => Err(Error::LocationUnresolvable {
                reason: format!("'{}' is not a regular file", path.display()),
            }),
            Err(e) => Err(Error::LocationUnresolvable {
                reason: format!("'{}': {e}", path.display()),
            }),
        }
    }

    /// Prefer `explicit`, fall back to the running executable.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => Self::current_exe(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the archive for enumeration.
    pub fn open(&self) -> Result<ZipSource<BufReader<File>>> {
        let file = File::open(&self.path).map_err(|e| Error::ArchiveUnreadable {
            path: self.path.clone(),
            source: e.into(),
        })?;
        ZipSource::new(BufReader::new(file), &self.path)
    }
}
