//! # trellis
//!
//! Command-line scaffolding for Go web applications. The binary boots the
//! output channels and runtime, resolves the requested command, loads
//! project.toml and hands control to the command handler.

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod context;
pub mod dispatch;
pub mod output;
pub mod registry;

pub use context::Context;
pub use dispatch::{dispatch, report, DispatchError};
pub use output::{ColorMode, Level, MemorySink, Output};
pub use registry::{CommandRegistry, CommandSpec, Handler};
