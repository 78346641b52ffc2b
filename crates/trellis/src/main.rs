//! Trellis CLI - Build a Golang web application
//!
//! This is the main entry point for the trellis command-line interface.

use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;

use trellis::bootstrap::Bootstrap;
use trellis::cli::Cli;
use trellis::dispatch::{dispatch, report, DispatchError};
use trellis::registry::CommandRegistry;

fn main() -> ExitCode {
    let mut boot = match Bootstrap::init() {
        Ok(boot) => boot,
        Err(e) => {
            eprintln!("trellis: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let registry = CommandRegistry::builtin();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        // Malformed global flags are a usage error like an unknown command
        Err(_) => {
            let usage = Err(DispatchError::Usage { requested: None });
            return ExitCode::from(report(usage, &registry, &mut boot.output));
        }
    };
    boot.configure(&cli);

    let project_dir = cli.project_dir();
    let result = dispatch(
        &registry,
        &cli.args,
        &project_dir,
        &mut boot.output,
        &boot.runtime,
    );

    ExitCode::from(report(result, &registry, &mut boot.output))
}
