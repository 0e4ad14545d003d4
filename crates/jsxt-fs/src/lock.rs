use crate::{Error, Result};
use fs2::FileExt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Exclusive advisory lock over a directory.
///
/// The lock lives in a `.jsxt.lock` file inside the directory and is released
/// when the value is dropped.
#[derive(Debug)]
pub struct DirLock {
    file: File,
    path: PathBuf,
}

impl DirLock {
    pub const FILE_NAME: &'static str = ".jsxt.lock";

    fn open(dir: &Path) -> Result<(File, PathBuf)> {
        crate::ensure_dir(dir)?;

        let path = dir.join(Self::FILE_NAME);
        let file = File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| Error::Write {
                path: path.clone(),
                source: e,
            })?;

        Ok((file, path))
    }

    /// Block until the lock on `dir` is held, creating `dir` if needed.
    pub fn acquire(dir: impl AsRef<Path>) -> Result<Self> {
        let (file, path) = Self::open(dir.as_ref())?;
        file.lock_exclusive().map_err(|e| Error::Lock {
            path: path.clone(),
            source: e,
        })?;

        Ok(Self { file, path })
    }

    /// Take the lock on `dir` without waiting; fails if another holder exists.
    pub fn try_acquire(dir: impl AsRef<Path>) -> Result<Self> {
        let (file, path) = Self::open(dir.as_ref())?;
        file.try_lock_exclusive().map_err(|e| Error::Lock {
            path: path.clone(),
            source: e,
        })?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
