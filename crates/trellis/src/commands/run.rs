//! Run command

use anyhow::Result;
use clap::Parser;

use super::parse_args;
use super::toolchain::{execute, GoCommand, ToolchainArgs};
use crate::context::Context;

/// Run the application with `go run`
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub toolchain: ToolchainArgs,

    /// Arguments passed through to the application
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub program_args: Vec<String>,
}

pub fn run(ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
    let Some(args) = parse_args::<RunArgs>("run", args)? else {
        return Ok(());
    };

    let cmd = GoCommand::new(&args.toolchain.go, ctx.project_dir)
        .args(["run", "."])
        .args(args.program_args);
    ctx.output
        .info(&format!("Starting {}", ctx.manifest.package.display_name()));
    execute(ctx, &cmd, args.toolchain.dry_run)
}
