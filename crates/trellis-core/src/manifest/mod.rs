//! Project manifest loading and management

mod loader;
mod types;

pub use loader::{LoadedManifest, MANIFEST_FILE_NAME};
pub use types::{OmitMatcher, PackageConfig, ProjectManifest};
