use std::path::PathBuf;

use clap::Parser;

use crate::config::Overrides;

/// Unpack the embedded JSX transformer and run it over a source tree.
#[derive(Debug, Parser)]
#[command(name = "jsxt", version, about)]
pub struct Cli {
    /// Configuration file (defaults to ./jsxt.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub overrides: Overrides,
}
