use std::path::PathBuf;

use thiserror::Error;

use crate::compiler::Phase;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("'{0}' must not be empty")]
    Empty(&'static str),

    #[error("configuration file '{0}' does not exist")]
    MissingFile(PathBuf),

    #[error("path '{}' is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("cannot determine the working directory")]
    WorkingDirectory(#[source] std::io::Error),

    #[error(transparent)]
    Load(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Failure of one compile invocation, tagged by the phase that produced it.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("configuration")]
    Config(#[from] ConfigError),

    #[error("resolution")]
    Resolution(#[source] jsxt_archive::Error),

    #[error("extraction")]
    Extraction(#[source] jsxt_archive::Error),

    #[error("command")]
    Command(#[source] jsxt_platform::Error),

    #[error("execution")]
    Launch(#[source] jsxt_platform::Error),

    #[error(
        "execution: JSX transformer returned non zero status code {code}{}",
        .cause.as_deref().map(|c| format!(" ({c})")).unwrap_or_default()
    )]
    ToolFailed { code: i32, cause: Option<String> },
}

impl CompileError {
    /// A transformer that ran and reported failure, as opposed to a crash of this step.
    pub fn is_build_failure(&self) -> bool {
        matches!(self, Self::ToolFailed { .. })
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ToolFailed { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The phase the invocation was in when it failed.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Config(_) | Self::Resolution(_) => Phase::Start,
            Self::Extraction(_) => Phase::Extracting,
            Self::Command(_) => Phase::BuildingCommand,
            Self::Launch(_) | Self::ToolFailed { .. } => Phase::Running,
        }
    }
}
