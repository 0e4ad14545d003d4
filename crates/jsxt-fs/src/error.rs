use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create directory '{path}'")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write '{path}'")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to lock '{path}'")]
    Lock { path: PathBuf, source: io::Error },

    #[error("failed to set permissions on '{path}'")]
    Permissions { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
