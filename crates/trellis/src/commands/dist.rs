//! Dist command

use anyhow::{Context as _, Result};
use camino::Utf8PathBuf;
use clap::Parser;

use super::parse_args;
use super::toolchain::{execute, GoCommand, ToolchainArgs};
use crate::context::Context;

/// Build a release binary with `go build`
#[derive(Parser, Debug)]
pub struct DistArgs {
    #[command(flatten)]
    pub toolchain: ToolchainArgs,

    /// Output directory, relative to the project directory
    #[arg(long, default_value = "dist", value_name = "DIR")]
    pub out_dir: Utf8PathBuf,
}

pub fn run(ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
    let Some(args) = parse_args::<DistArgs>("dist", args)? else {
        return Ok(());
    };

    let binary = args.out_dir.join(ctx.project_name());
    if !args.toolchain.dry_run {
        let out_dir = ctx.project_dir.join(&args.out_dir);
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("Failed to create {}", out_dir))?;
    }

    let cmd = GoCommand::new(&args.toolchain.go, ctx.project_dir)
        .args(["build", "-o"])
        .arg(binary.as_str())
        .arg(".");
    execute(ctx, &cmd, args.toolchain.dry_run)?;

    if !args.toolchain.dry_run {
        ctx.output.success(&format!("Built {}", binary));
    }
    Ok(())
}
