//! Test command

use anyhow::Result;
use clap::Parser;
use trellis_core::OmitMatcher;

use super::parse_args;
use super::toolchain::{execute, GoCommand, ToolchainArgs};
use crate::context::Context;

/// Run `go test` over every package not matched by `omit_tests`
#[derive(Parser, Debug)]
pub struct TestArgs {
    #[command(flatten)]
    pub toolchain: ToolchainArgs,

    /// Extra flags for `go test`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub test_args: Vec<String>,
}

pub fn run(ctx: &mut Context<'_>, args: &[String]) -> Result<()> {
    let Some(args) = parse_args::<TestArgs>("test", args)? else {
        return Ok(());
    };
    let omit = &ctx.manifest.package.omit_tests;
    let matcher = ctx.manifest.package.omit_matcher()?;
    let list = GoCommand::new(&args.toolchain.go, ctx.project_dir).args(["list", "./..."]);

    if args.toolchain.dry_run {
        ctx.output.info(&format!("Would run: {}", list.display()));
        let test = GoCommand::new(&args.toolchain.go, ctx.project_dir)
            .args(["test", "<packages>"])
            .args(args.test_args);
        let mut line = format!("Would run: {}", test.display());
        if !omit.is_empty() {
            line.push_str(&format!(" (omitting {})", omit.join(", ")));
        }
        ctx.output.info(&line);
        return Ok(());
    }

    let listing = ctx.runtime.block_on(list.output())?;
    let (selected, skipped) = select_packages(&listing, &matcher);
    for package in &skipped {
        ctx.output.info(&format!("Skipping tests for {}", package));
    }
    if selected.is_empty() {
        ctx.output.warn("Every package is excluded by omit_tests, nothing to test");
        return Ok(());
    }

    let test = GoCommand::new(&args.toolchain.go, ctx.project_dir)
        .arg("test")
        .args(selected)
        .args(args.test_args);
    execute(ctx, &test, false)?;
    ctx.output.success("Tests passed");
    Ok(())
}

/// Split `go list` output into packages to test and packages to skip
pub fn select_packages(listing: &str, matcher: &OmitMatcher) -> (Vec<String>, Vec<String>) {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .partition(|package| !matcher.is_omitted(package))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_select_packages_partitions_in_order() {
        let matcher = OmitMatcher::new(&["*/vendor/*".to_string(), "e2e".to_string()]).unwrap();
        let listing = "example.com/demo\nexample.com/demo/e2e\n\nexample.com/demo/vendor/x\nexample.com/demo/api\n";
        let (selected, skipped) = select_packages(listing, &matcher);
        assert_eq!(selected, vec!["example.com/demo", "example.com/demo/api"]);
        assert_eq!(
            skipped,
            vec!["example.com/demo/e2e", "example.com/demo/vendor/x"]
        );
    }

    #[test]
    fn test_select_packages_without_patterns() {
        let matcher = OmitMatcher::new(&[]).unwrap();
        let (selected, skipped) = select_packages("a\nb\n", &matcher);
        assert_eq!(selected, vec!["a", "b"]);
        assert!(skipped.is_empty());
    }

    #[test]
    #[serial]
    fn test_args_pass_through() {
        let args = TestArgs::try_parse_from(["test", "-race", "-count=1"]).unwrap();
        assert_eq!(args.test_args, vec!["-race", "-count=1"]);
    }
}
