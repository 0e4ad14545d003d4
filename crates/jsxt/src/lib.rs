//! Build step that unpacks an embedded JSX transformer toolchain and runs it
//! over a source tree.
//!
//! The toolchain lives under `META-INF/node_modules/` inside a zip archive,
//! normally appended to this executable. [`Compiler`] extracts it, builds the
//! transformer's command line from [`CompilerOptions`] and runs it with the
//! extract directory as working directory.

pub mod cli;
pub mod command;
pub mod compiler;
pub mod config;
pub mod effects;
pub mod error;
pub mod interrupt;
pub mod logging;
pub mod options;

pub use command::CommandLine;
pub use compiler::{Compiler, Phase};
pub use config::{DEFAULT_CONFIG_FILE, Overrides};
pub use effects::{ArchiveToolchain, ChildProcessRunner, Extractor, ProcessRunner};
pub use error::{CompileError, ConfigError};
pub use jsxt_platform::CancelToken;
pub use options::CompilerOptions;
