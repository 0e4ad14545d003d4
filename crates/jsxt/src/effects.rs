//! Side-effecting collaborators of the [`Compiler`](crate::Compiler).
//!
//! The compiler only sees these traits, so extraction and process execution
//! can be replaced in tests.

use std::path::Path;

use jsxt_archive::{ArchiveLocation, ExtractOptions, ExtractReport};
use jsxt_platform::{CancelToken, Command, ProcessResult};

use crate::command::CommandLine;

/// Materializes the toolchain into a destination directory.
pub trait Extractor {
    fn extract(&self, destination: &Path) -> jsxt_archive::Result<ExtractReport>;
}

/// Runs a command line to completion.
pub trait ProcessRunner {
    fn run(&self, command: &CommandLine, working_dir: &Path) -> jsxt_platform::Result<ProcessResult>;
}

/// Extracts the embedded toolchain from a resolved archive.
#[derive(Clone, Debug)]
pub struct ArchiveToolchain {
    location: ArchiveLocation,
    options: ExtractOptions,
}

impl ArchiveToolchain {
    pub fn new(location: ArchiveLocation) -> Self {
        Self {
            location,
            options: ExtractOptions::default(),
        }
    }

    pub fn location(&self) -> &ArchiveLocation {
        &self.location
    }
}

impl Extractor for ArchiveToolchain {
    fn extract(&self, destination: &Path) -> jsxt_archive::Result<ExtractReport> {
        jsxt_archive::extract_archive(&self.location, destination, &self.options)
    }
}

/// Spawns the transformer as a child process with inherited stdio.
#[derive(Clone, Debug, Default)]
pub struct ChildProcessRunner {
    interpreter: Option<String>,
    cancel: CancelToken,
}

impl ChildProcessRunner {
    /// With an interpreter, the whole command line becomes its arguments;
    /// without one, the entry point is executed directly.
    pub fn new(interpreter: Option<&str>) -> Self {
        Self {
            interpreter: interpreter.map(str::to_string),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    fn command(&self, command: &CommandLine) -> jsxt_platform::Result<Command> {
        match &self.interpreter {
            Some(interpreter) => Ok(Command::new(interpreter.as_str()).args(command.tokens())),
            None => Command::from_tokens(command.tokens()),
        }
    }
}

impl ProcessRunner for ChildProcessRunner {
    fn run(&self, command: &CommandLine, working_dir: &Path) -> jsxt_platform::Result<ProcessResult> {
        let mut child = self.command(command)?.current_dir(working_dir);
        child.run_until(&self.cancel)
    }
}
