//! Manifest file discovery, validation and decoding

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use tracing::debug;

use super::types::ProjectManifest;

/// Manifest file name looked up in the project directory
pub const MANIFEST_FILE_NAME: &str = "project.toml";

/// Loaded and validated project manifest
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    /// The decoded manifest
    pub manifest: ProjectManifest,

    /// Path to the manifest file
    pub manifest_path: Utf8PathBuf,

    /// Directory containing the manifest
    pub project_dir: Utf8PathBuf,
}

impl LoadedManifest {
    /// Load `project.toml` from `dir`
    pub fn load_from_dir(dir: &Utf8Path) -> Result<Self> {
        Self::load(&dir.join(MANIFEST_FILE_NAME))
    }

    /// Load a manifest from an explicit file path
    ///
    /// Checks run in a fixed order: existence, access, file type, then
    /// decode. The first failing check decides the error.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        debug!("Loading manifest from {}", path);

        let metadata = fs::metadata(path).map_err(|e| {
            if e.kind() == IoErrorKind::NotFound {
                Error::manifest_missing(display_name(path))
            } else {
                Error::manifest_access(display_name(path), e)
            }
        })?;

        if metadata.is_dir() {
            return Err(Error::manifest_wrong_type(display_name(path)));
        }

        let content =
            fs::read_to_string(path).map_err(|e| Error::manifest_access(display_name(path), e))?;

        let manifest = ProjectManifest::parse(&content, &display_name(path))?;
        debug!(
            "Decoded manifest for {} ({} deps, {} omitted test patterns)",
            manifest.package.display_name(),
            manifest.package.dependencies.len(),
            manifest.package.omit_tests.len()
        );

        let project_dir = match path.parent() {
            Some(p) if !p.as_str().is_empty() => p.to_owned(),
            _ => Utf8PathBuf::from("."),
        };

        Ok(Self {
            manifest,
            manifest_path: path.to_owned(),
            project_dir,
        })
    }

    /// Project name from the `[package]` table
    pub fn name(&self) -> &str {
        self.manifest.name()
    }
}

// Errors name the file the way the user knows it, not the absolute path.
fn display_name(path: &Utf8Path) -> String {
    path.file_name().unwrap_or(path.as_str()).to_string()
}
