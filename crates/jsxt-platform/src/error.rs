use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("command line is empty")]
    EmptyCommand,

    #[error("failed to launch '{cmd}'")]
    CommandFailed { cmd: String, source: std::io::Error },

    #[error("failed waiting for '{cmd}'")]
    Wait { cmd: String, source: std::io::Error },

    #[error("interrupted while waiting for '{cmd}'; the process was terminated")]
    Interrupted { cmd: String },
}
