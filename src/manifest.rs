//! Manifest loading.
//!
//! The manifest is read once per run and never mutated. Only JSON syntax and
//! the required identity fields are checked here; absent optional lists are
//! tolerated and default to empty when published. Use [`crate::check`] for
//! semantic validation.

use crate::types::RegistryManifest;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Manifest not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load and parse a registry manifest.
pub fn load_manifest(path: &Path) -> Result<RegistryManifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let manifest: RegistryManifest = serde_json::from_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        items = manifest.items.len(),
        "loaded manifest"
    );
    Ok(manifest)
}
