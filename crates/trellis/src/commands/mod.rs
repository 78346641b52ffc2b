//! Command handler implementations

pub mod dist;
pub mod run;
pub mod test;
pub mod toolchain;
pub mod update;

use anyhow::{anyhow, Result};
use clap::error::ErrorKind;
use clap::Parser;

/// Parse a handler's trailing arguments
///
/// Returns `Ok(None)` when clap already printed help or version text.
pub fn parse_args<T: Parser>(command: &str, args: &[String]) -> Result<Option<T>> {
    let argv = std::iter::once(format!("trellis {}", command)).chain(args.iter().cloned());
    match T::try_parse_from(argv) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            Ok(None)
        }
        Err(e) => {
            let rendered = e.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            Err(anyhow!(
                "{}",
                first.trim_start_matches("error: ").trim().to_string()
            ))
        }
    }
}
