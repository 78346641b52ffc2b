//! # trellis-core
//!
//! Core library for the trellis CLI providing:
//! - Project manifest parsing (project.toml)
//! - Manifest validation with categorized errors
//! - Type definitions for the package section

pub mod error;
pub mod manifest;

pub use error::{Error, ErrorKind, Result};
pub use manifest::{LoadedManifest, OmitMatcher, PackageConfig, ProjectManifest, MANIFEST_FILE_NAME};
