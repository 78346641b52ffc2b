//! Error types for trellis-core

use thiserror::Error;

/// Result type alias using trellis-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse category of a manifest failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The manifest file does not exist
    Missing,
    /// The manifest could not be stat'ed or read
    Access,
    /// The manifest path is not a regular file
    WrongType,
    /// The manifest content could not be decoded or was rejected
    Decode,
}

/// Core error types for trellis
#[derive(Error, Debug)]
pub enum Error {
    /// Manifest file not found
    #[error("Missing manifest: please provide a {path} for the web project")]
    ManifestMissing { path: String },

    /// Manifest exists but could not be accessed
    #[error("Accessing {path} file error, {source}")]
    ManifestAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Manifest path is a directory
    #[error("Wrong type: {path} cannot be a directory")]
    ManifestWrongType { path: String },

    /// TOML syntax or schema error
    ///
    /// `detail` is the parser diagnostic flattened onto one line.
    #[error("Cannot decode the {path} into TOML format, {detail}")]
    ManifestDecode {
        path: String,
        detail: String,
        #[source]
        source: toml::de::Error,
    },

    /// Decoded manifest violates a content rule
    #[error("Invalid manifest {path}: {message}")]
    ManifestInvalid { path: String, message: String },

    /// Invalid omit_tests glob
    #[error("Invalid omit_tests pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl Error {
    /// Create a manifest missing error
    pub fn manifest_missing(path: impl Into<String>) -> Self {
        Self::ManifestMissing { path: path.into() }
    }

    /// Create a manifest access error
    pub fn manifest_access(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ManifestAccess {
            path: path.into(),
            source,
        }
    }

    /// Create a wrong type error
    pub fn manifest_wrong_type(path: impl Into<String>) -> Self {
        Self::ManifestWrongType { path: path.into() }
    }

    /// Create a decode error, locating it within `content`
    pub fn manifest_decode(
        path: impl Into<String>,
        source: toml::de::Error,
        content: &str,
    ) -> Self {
        Self::ManifestDecode {
            path: path.into(),
            detail: decode_detail(&source, content),
            source,
        }
    }

    /// Create an invalid manifest error
    pub fn manifest_invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ManifestInvalid {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ManifestMissing { .. } => ErrorKind::Missing,
            Self::ManifestAccess { .. } => ErrorKind::Access,
            Self::ManifestWrongType { .. } => ErrorKind::WrongType,
            Self::ManifestDecode { .. }
            | Self::ManifestInvalid { .. }
            | Self::InvalidPattern { .. } => ErrorKind::Decode,
        }
    }
}

/// `toml::de::Error`'s Display carries a source snippet over several lines
fn decode_detail(source: &toml::de::Error, content: &str) -> String {
    let message = source
        .message()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    match source.span() {
        Some(span) => {
            let (line, column) = line_column(content, span.start);
            format!("line {}, column {}: {}", line, column, message)
        }
        None => message,
    }
}

/// 1-based line and column of a byte offset
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(content.len());
    while !content.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &content[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map_or(before, |nl| &before[nl + 1..])
        .chars()
        .count()
        + 1;
    (line, column)
}
