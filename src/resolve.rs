//! Registry dependency lookup against a published descriptor.
//!
//! The publisher resolves an item's registry dependencies by reading back the
//! `registry-item.json` it has just written rather than using the manifest
//! item in memory. A descriptor that is missing or fails to parse therefore
//! yields an item index with no registry dependencies. This function never
//! fails; it degrades to "no dependencies known" and logs why.

use std::fs;
use std::path::Path;

/// Read `<item_dir>/<filename>` and return its `registryDependencies`.
///
/// Returns an empty list when the file is absent, unreadable, not JSON, or has
/// no `registryDependencies` array. Non-string entries are skipped.
pub fn item_registry_dependencies(item_dir: &Path, filename: &str) -> Vec<String> {
    let path = item_dir.join(filename);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no descriptor to resolve dependencies from");
        return Vec::new();
    }

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(path = %path.display(), "error getting registry dependencies: {e}");
            return Vec::new();
        }
    };
    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(path = %path.display(), "error getting registry dependencies: {e}");
            return Vec::new();
        }
    };

    value
        .get("registryDependencies")
        .and_then(|deps| deps.as_array())
        .map(|deps| {
            deps.iter()
                .filter_map(|d| d.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
