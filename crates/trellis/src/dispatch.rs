//! Command dispatch
//!
//! `dispatch` walks the invocation through a fixed sequence: resolve the
//! command, load project.toml, re-prefix the output channels, then run the
//! handler. Every failure comes back as a `DispatchError`; only `report`
//! turns one into user-facing output and an exit status.

use camino::Utf8Path;
use thiserror::Error;
use tokio::runtime::Runtime;
use tracing::{debug, info};
use trellis_core::{LoadedManifest, MANIFEST_FILE_NAME};

use crate::context::Context;
use crate::output::Output;
use crate::registry::CommandRegistry;

/// Exit status for usage errors and fatal errors alike
pub const EXIT_FAILURE: u8 = 1;

/// Why an invocation did not complete
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No command, or a command the registry does not know
    #[error("{}", usage_message(.requested))]
    Usage { requested: Option<String> },

    /// project.toml could not be found, read or decoded
    #[error(transparent)]
    Manifest(#[from] trellis_core::Error),

    /// The handler itself failed
    #[error("Executing command [{command}] error, {source:#}")]
    Handler {
        command: String,
        #[source]
        source: anyhow::Error,
    },
}

fn usage_message(requested: &Option<String>) -> String {
    match requested {
        Some(name) => format!("Unknown command: {}", name),
        None => "No command provided".to_string(),
    }
}

impl DispatchError {
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. })
    }

    pub fn exit_status(&self) -> u8 {
        EXIT_FAILURE
    }
}

/// Resolve `args[0]` against `registry` and run it for the project in `project_dir`
pub fn dispatch(
    registry: &CommandRegistry,
    args: &[String],
    project_dir: &Utf8Path,
    output: &mut Output,
    runtime: &Runtime,
) -> Result<(), DispatchError> {
    let Some((name, rest)) = args.split_first() else {
        return Err(DispatchError::Usage { requested: None });
    };
    let command = registry.get(name).ok_or_else(|| DispatchError::Usage {
        requested: Some(name.clone()),
    })?;
    debug!("Matched command {} with {} argument(s)", command.name, rest.len());

    let loaded = LoadedManifest::load_from_dir(project_dir)?;
    info!("Loaded manifest {}", loaded.manifest_path);

    output.set_project(loaded.name());
    output.success(&format!("Loaded {}...", MANIFEST_FILE_NAME));

    let mut ctx = Context {
        manifest: &loaded.manifest,
        project_dir: &loaded.project_dir,
        output,
        runtime,
    };
    (command.handler)(&mut ctx, rest).map_err(|source| DispatchError::Handler {
        command: name.clone(),
        source,
    })
}

/// Turn a dispatch result into output and a process exit status
///
/// Usage errors print the usage text verbatim; everything else is a single
/// line on the error channel.
pub fn report(
    result: Result<(), DispatchError>,
    registry: &CommandRegistry,
    output: &mut Output,
) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) if err.is_usage() => {
            debug!("{}", err);
            output.plain(&registry.usage());
            err.exit_status()
        }
        Err(err) => {
            output.error(&err.to_string());
            err.exit_status()
        }
    }
}
