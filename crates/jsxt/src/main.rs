use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use jsxt::cli::Cli;
use jsxt::{
    ArchiveToolchain, CancelToken, ChildProcessRunner, CompileError, Compiler, config, interrupt,
    logging,
};
use jsxt_archive::ArchiveLocation;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            exit_code(&err)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = config::load_from_cwd(cli.config.as_deref(), &cli.overrides)
        .map_err(CompileError::Config)?;
    tracing::debug!(?options, "resolved options");

    let location = ArchiveLocation::resolve(options.toolchain_archive.as_deref())
        .map_err(CompileError::Resolution)?;
    let toolchain = ArchiveToolchain::new(location);
    tracing::debug!(archive = %toolchain.location().path().display(), "toolchain archive");

    let cancel = CancelToken::new();
    interrupt::cancel_on_signal(cancel.clone()).context("failed to install signal handlers")?;
    let runner = ChildProcessRunner::new(options.interpreter()).with_cancel(cancel);
    let mut compiler = Compiler::new(toolchain, runner);
    compiler.compile(&options)?;

    tracing::info!("JSX transformation completed");
    Ok(())
}

/// The transformer's own code on build failure, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> ExitCode {
    let code = err
        .downcast_ref::<CompileError>()
        .and_then(CompileError::exit_code)
        .map(|code| code.clamp(1, 255) as u8)
        .unwrap_or(1);
    ExitCode::from(code)
}
