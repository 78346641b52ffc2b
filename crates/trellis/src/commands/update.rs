//! Update command

use anyhow::Result;
use clap::Parser;

use super::parse_args;
use super::toolchain::{execute, GoCommand, ToolchainArgs};
use crate::context::Context;

/// Update the dependencies declared in project.toml with `go get -u`
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub toolchain: ToolchainArgs,
}

pub fn run(ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
    let Some(args) = parse_args::<UpdateArgs>("update", args)? else {
        return Ok(());
    };

    let deps = &ctx.manifest.package.dependencies;
    if deps.is_empty() {
        ctx.output.warn("No dependencies declared in project.toml, nothing to update");
        return Ok(());
    }

    ctx.output
        .info(&format!("Updating {} dependencies...", deps.len()));
    let cmd = GoCommand::new(&args.toolchain.go, ctx.project_dir)
        .args(["get", "-u"])
        .args(deps.iter().cloned());
    execute(ctx, &cmd, args.toolchain.dry_run)?;

    if !args.toolchain.dry_run {
        ctx.output.success("Dependencies updated");
    }
    Ok(())
}
