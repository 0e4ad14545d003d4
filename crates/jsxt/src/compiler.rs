//! Compiler orchestration.
//!
//! One invocation walks `Start -> Extracting -> BuildingCommand -> Running ->
//! Done`. The first fatal error moves it to `Failed` and the remaining phases
//! are skipped.

use jsxt_fs::DirLock;

use crate::command::CommandLine;
use crate::effects::{Extractor, ProcessRunner};
use crate::error::{CompileError, ConfigError};
use crate::options::CompilerOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Start,
    Extracting,
    BuildingCommand,
    Running,
    Done,
    Failed,
}

pub struct Compiler<E, R> {
    extractor: E,
    runner: R,
    phase: Phase,
}

impl<E: Extractor, R: ProcessRunner> Compiler<E, R> {
    pub fn new(extractor: E, runner: R) -> Self {
        Self {
            extractor,
            runner,
            phase: Phase::Start,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Extract the toolchain, build the command and run the transformer.
    ///
    /// A transformer exiting non-zero yields [`CompileError::ToolFailed`];
    /// every other error means the step itself could not complete.
    pub fn compile(&mut self, options: &CompilerOptions) -> Result<(), CompileError> {
        self.phase = Phase::Start;
        let result = self.run_phases(options);
        if result.is_err() {
            self.phase = Phase::Failed;
        }
        result
    }

    fn run_phases(&mut self, options: &CompilerOptions) -> Result<(), CompileError> {
        options.validate()?;
        // The child runs inside this directory, so relative entry points would resolve twice.
        let extract_path = std::path::absolute(&options.node_module_extract_path)
            .map_err(|e| CompileError::Config(ConfigError::WorkingDirectory(e)))?;
        let extract_path = extract_path.as_path();

        self.phase = Phase::Extracting;
        tracing::info!("Extracting React tools and dependencies...");
        // Held until the transformer exits: it runs inside the extracted tree.
        let _lock = DirLock::acquire(extract_path)
            .map_err(|e| CompileError::Extraction(e.into()))?;
        let report = self
            .extractor
            .extract(extract_path)
            .map_err(CompileError::Extraction)?;
        tracing::debug!(
            files = report.files,
            directories = report.directories,
            bytes = report.total_bytes,
            "toolchain extracted"
        );

        self.phase = Phase::BuildingCommand;
        let entry_point = extract_path.join(&options.entry_point);
        tracing::info!(
            "jsx transformer binary is available at {}",
            entry_point.display()
        );
        let command = CommandLine::build(options, entry_point.to_string_lossy());
        tracing::debug!("Executing jsx binary command: {command}");

        self.phase = Phase::Running;
        tracing::info!(
            "Transforming files in source path '{}' to destination path '{}'",
            options.source_path,
            options.target_path
        );
        let result = self
            .runner
            .run(&command, extract_path)
            .map_err(|err| match err {
                jsxt_platform::Error::EmptyCommand => CompileError::Command(err),
                other => CompileError::Launch(other),
            })?;

        if !result.success() {
            return Err(CompileError::ToolFailed {
                code: result.exit_code,
                cause: result.cause,
            });
        }

        self.phase = Phase::Done;
        Ok(())
    }
}
