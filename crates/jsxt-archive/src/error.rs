use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to locate the toolchain archive: {reason}")]
    LocationUnresolvable { reason: String },

    #[error("failed to read archive '{path}'")]
    ArchiveUnreadable {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    #[error("failed to create directory '{path}'")]
    DirectoryCreation { path: PathBuf, source: io::Error },

    #[error("failed to extract '{entry}' to '{target}'")]
    EntryCopy {
        entry: String,
        target: PathBuf,
        source: io::Error,
    },

    #[error("entry '{entry}' resolves outside the destination directory")]
    UnsafePath { entry: String },

    #[error(transparent)]
    Filesystem(jsxt_fs::Error),
}

impl Error {
    /// Attach the entry being extracted to a filesystem failure.
    pub(crate) fn from_fs(entry: &str, err: jsxt_fs::Error) -> Self {
        match err {
            jsxt_fs::Error::CreateDir { path, source } => Self::DirectoryCreation { path, source },
            jsxt_fs::Error::Write { path, source } => Self::EntryCopy {
                entry: entry.to_string(),
                target: path,
                source,
            },
            other => Self::Filesystem(other),
        }
    }
}

impl From<jsxt_fs::Error> for Error {
    fn from(err: jsxt_fs::Error) -> Self {
        match err {
            jsxt_fs::Error::CreateDir { path, source } => Self::DirectoryCreation { path, source },
            other => Self::Filesystem(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
