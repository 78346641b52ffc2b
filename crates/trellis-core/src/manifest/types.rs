//! Typed representation of project.toml

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use super::loader::MANIFEST_FILE_NAME;

/// Root of the project manifest
///
/// ```toml
/// [package]
/// name = "demo"
/// version = "0.1.0"
/// authors = ["Jane Doe"]
/// deps = ["github.com/gorilla/mux"]
/// omit_tests = ["*/vendor/*"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// The `[package]` table
    pub package: PackageConfig,
}

/// The `[package]` table of project.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Project identifier, also used as the log prefix
    pub name: String,

    /// Free-form version string
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub authors: Vec<String>,

    /// Go module paths the project depends on
    #[serde(default, rename = "deps")]
    pub dependencies: Vec<String>,

    /// Glob patterns of packages excluded from `trellis test`
    #[serde(default, rename = "omit_tests")]
    pub omit_tests: Vec<String>,
}

impl ProjectManifest {
    /// Decode and validate manifest text that did not come from disk
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, MANIFEST_FILE_NAME)
    }

    /// Decode and validate manifest text, attributing errors to `origin`
    pub(crate) fn parse(content: &str, origin: &str) -> Result<Self> {
        let manifest: ProjectManifest =
            toml::from_str(content).map_err(|e| Error::manifest_decode(origin, e, content))?;
        manifest.validate(origin)?;
        Ok(manifest)
    }

    fn validate(&self, origin: &str) -> Result<()> {
        if self.package.name.trim().is_empty() {
            return Err(Error::manifest_invalid(
                origin,
                "package.name must not be empty",
            ));
        }
        Ok(())
    }

    /// Project name
    pub fn name(&self) -> &str {
        &self.package.name
    }
}

impl PackageConfig {
    /// `name@version`, or just `name` when no version is declared
    pub fn display_name(&self) -> String {
        if self.version.is_empty() {
            self.name.clone()
        } else {
            format!("{}@{}", self.name, self.version)
        }
    }

    /// Compile `omit_tests` into a matcher
    pub fn omit_matcher(&self) -> Result<OmitMatcher> {
        OmitMatcher::new(&self.omit_tests)
    }
}

/// Matches Go package paths against the `omit_tests` globs
#[derive(Debug, Clone)]
pub struct OmitMatcher {
    set: GlobSet,
}

impl OmitMatcher {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob =
                Glob::new(pattern).map_err(|e| Error::invalid_pattern(pattern, e.to_string()))?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| Error::invalid_pattern(patterns.join(", "), e.to_string()))?;
        Ok(Self { set })
    }

    /// True when the full import path or its last segment matches a pattern
    pub fn is_omitted(&self, package: &str) -> bool {
        if self.set.is_match(package) {
            return true;
        }
        package
            .rsplit('/')
            .next()
            .is_some_and(|last| last != package && self.set.is_match(last))
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
