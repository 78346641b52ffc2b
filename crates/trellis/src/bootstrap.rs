//! One-time process initialization

use anyhow::{Context as _, Result};
use std::num::NonZeroUsize;
use tokio::runtime::{Builder, Runtime};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Cli;
use crate::output::Output;

/// Process-wide state created before any command runs
pub struct Bootstrap {
    pub output: Output,
    pub runtime: Runtime,
    /// Worker threads given to `runtime`
    pub parallelism: usize,
}

impl Bootstrap {
    /// Build the output channels with generic prefixes and a runtime using
    /// every available processing unit
    pub fn init() -> Result<Self> {
        let parallelism = parallelism_hint();
        let runtime = build_runtime(parallelism)?;
        Ok(Self {
            output: Output::stdout(),
            runtime,
            parallelism,
        })
    }

    /// Apply the global CLI flags
    pub fn configure(&mut self, cli: &Cli) {
        init_tracing(cli.verbose, cli.quiet);
        self.output.set_colors(cli.color_mode());
        self.output.set_timestamps(!cli.no_timestamps);
        tracing::debug!("Runtime started with {} worker thread(s)", self.parallelism);
    }
}

/// Number of processing units available to this process
pub fn parallelism_hint() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Multi-threaded runtime with exactly `workers` worker threads
pub fn build_runtime(workers: usize) -> Result<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(workers.max(1))
        .thread_name("trellis-worker")
        .enable_all()
        .build()
        .context("Failed to start the async runtime")
}

/// Diagnostics go to stderr so stdout only carries the output channels
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("warn"),
                1 => EnvFilter::new("info"),
                2 => EnvFilter::new("debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    // try_init: a subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
