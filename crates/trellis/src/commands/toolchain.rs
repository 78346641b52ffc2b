//! Go toolchain invocation

use anyhow::{anyhow, bail, Context as _, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use std::io::ErrorKind;
use tokio::process::Command;
use tracing::debug;

use crate::context::Context;

/// Flags shared by every toolchain-backed command
#[derive(Args, Debug, Clone)]
pub struct ToolchainArgs {
    /// Print the toolchain command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Go binary to invoke
    #[arg(long, env = "TRELLIS_GO", default_value = "go", value_name = "PATH")]
    pub go: String,
}

/// A `go` invocation rooted in the project directory
#[derive(Debug, Clone)]
pub struct GoCommand {
    program: String,
    args: Vec<String>,
    dir: Utf8PathBuf,
}

impl GoCommand {
    pub fn new(program: impl Into<String>, dir: &Utf8Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            dir: dir.to_owned(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn argv(&self) -> &[String] {
        &self.args
    }

    /// Shell-like rendering for log lines
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(&self.dir).kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, e: std::io::Error) -> anyhow::Error {
        if e.kind() == ErrorKind::NotFound {
            anyhow!(
                "{} not found. Please ensure the Go toolchain is installed and in PATH",
                self.program
            )
        } else {
            anyhow::Error::new(e).context(format!("Failed to start {}", self.display()))
        }
    }

    /// Run with inherited stdio and fail on a non-zero exit
    pub async fn status(&self) -> Result<()> {
        debug!("Running: {} (in {})", self.display(), self.dir);
        let status = self
            .command()
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;
        if !status.success() {
            bail!("{} exited with {}", self.display(), status);
        }
        Ok(())
    }

    /// Run capturing stdout
    pub async fn output(&self) -> Result<String> {
        debug!("Capturing: {} (in {})", self.display(), self.dir);
        let output = self
            .command()
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} exited with {}: {}",
                self.display(),
                output.status,
                stderr.trim()
            );
        }
        String::from_utf8(output.stdout)
            .with_context(|| format!("{} produced non UTF-8 output", self.display()))
    }
}

/// Print `cmd` in dry-run mode, otherwise run it on the context runtime
pub fn execute(ctx: &mut Context<'_>, cmd: &GoCommand, dry_run: bool) -> Result<()> {
    if dry_run {
        ctx.output.info(&format!("Would run: {}", cmd.display()));
        return Ok(());
    }
    ctx.output.info(&format!("Running: {}", cmd.display()));
    ctx.runtime.block_on(cmd.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::build_runtime;
    use clap::Parser;
    use serial_test::serial;

    #[derive(Parser, Debug)]
    struct Sample {
        #[command(flatten)]
        toolchain: ToolchainArgs,
    }

    #[test]
    #[serial]
    fn test_go_defaults_to_path_lookup() {
        std::env::remove_var("TRELLIS_GO");
        let sample = Sample::try_parse_from(["sample"]).unwrap();
        assert_eq!(sample.toolchain.go, "go");
        assert!(!sample.toolchain.dry_run);
    }

    #[test]
    #[serial]
    fn test_go_from_environment() {
        std::env::set_var("TRELLIS_GO", "/usr/local/go/bin/go");
        let sample = Sample::try_parse_from(["sample"]);
        std::env::remove_var("TRELLIS_GO");
        assert_eq!(sample.unwrap().toolchain.go, "/usr/local/go/bin/go");
    }

    #[test]
    fn test_display_joins_program_and_args() {
        let cmd = GoCommand::new("go", Utf8Path::new("."))
            .arg("build")
            .args(["-o", "dist/demo", "."]);
        assert_eq!(cmd.display(), "go build -o dist/demo .");
        assert_eq!(cmd.argv(), ["build", "-o", "dist/demo", "."]);
    }

    #[test]
    fn test_missing_program_is_reported() {
        let runtime = build_runtime(1).unwrap();
        let cmd = GoCommand::new("/nonexistent/trellis-go", Utf8Path::new(".")).arg("version");
        let err = runtime.block_on(cmd.status()).unwrap_err();
        assert!(err.to_string().contains("not found"), "got: {}", err);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_an_error() {
        let runtime = build_runtime(1).unwrap();
        let cmd = GoCommand::new("sh", Utf8Path::new(".")).args(["-c", "exit 3"]);
        let err = runtime.block_on(cmd.status()).unwrap_err();
        assert!(err.to_string().contains("exited with"), "got: {}", err);
    }

    #[cfg(unix)]
    #[test]
    fn test_output_captures_stdout() {
        let runtime = build_runtime(1).unwrap();
        let cmd = GoCommand::new("sh", Utf8Path::new(".")).args(["-c", "echo a; echo b"]);
        let out = runtime.block_on(cmd.output()).unwrap();
        assert_eq!(out.lines().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
