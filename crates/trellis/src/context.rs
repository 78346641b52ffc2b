//! Per-invocation context handed to command handlers

use camino::Utf8Path;
use tokio::runtime::Runtime;
use trellis_core::ProjectManifest;

use crate::output::Output;

/// Everything a handler may read or write
///
/// Built by the dispatcher once the manifest is loaded and the output
/// channels carry the project name.
pub struct Context<'a> {
    pub manifest: &'a ProjectManifest,

    /// Directory containing project.toml; child processes run here
    pub project_dir: &'a Utf8Path,

    pub output: &'a mut Output,

    /// Runtime sized by the bootstrap parallelism hint
    pub runtime: &'a Runtime,
}

impl Context<'_> {
    pub fn project_name(&self) -> &str {
        self.manifest.name()
    }
}
