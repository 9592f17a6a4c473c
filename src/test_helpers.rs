//! Shared test utilities for the registry-press test suite.
//!
//! Provides fixture setup and readers for the published tree. Readers panic
//! with a clear message on a missing or malformed document.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = load_fixture_manifest(tmp.path());
//! publish(&manifest, &tmp.path().join("public"), &PublishConfig::default()).unwrap();
//!
//! let hero = read_descriptor(&tmp.path().join("public"), "restaurant-hero");
//! assert_eq!(hero.files.len(), 2);
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::types::{PublishedItemDescriptor, PublishedItemIndex, RegistryIndex, RegistryManifest};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/registry/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/registry");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Load the fixture manifest with file paths made absolute under `root`.
///
/// Manifest paths are relative to the working directory, which in tests is the
/// crate root rather than the fixture copy.
pub fn load_fixture_manifest(root: &Path) -> RegistryManifest {
    let mut manifest = crate::manifest::load_manifest(&root.join("registry.json")).unwrap();
    for item in &mut manifest.items {
        for file in &mut item.files {
            file.path = root.join(&file.path).to_string_lossy().to_string();
        }
    }
    manifest
}

// =========================================================================
// Published tree readers
// =========================================================================

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("cannot parse {}: {e}", path.display()))
}

/// Top-level `r/index.json`.
pub fn read_registry_index(output_root: &Path) -> RegistryIndex {
    read_json(&output_root.join("r/index.json"))
}

/// `r/<name>/registry-item.json`.
pub fn read_descriptor(output_root: &Path, name: &str) -> PublishedItemDescriptor {
    read_json(&output_root.join("r").join(name).join("registry-item.json"))
}

/// `r/<name>/index.json`.
pub fn read_item_index(output_root: &Path, name: &str) -> PublishedItemIndex {
    read_json(&output_root.join("r").join(name).join("index.json"))
}

/// Sorted names of the item directories under `r/`.
pub fn item_dirs(output_root: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(output_root.join("r"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Every file under `root` with its bytes, keyed by relative path.
pub fn snapshot_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    snapshot_recursive(root, root, &mut files);
    files
}

fn snapshot_recursive(root: &Path, dir: &Path, files: &mut BTreeMap<PathBuf, Vec<u8>>) {
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            snapshot_recursive(root, &path, files);
        } else {
            let rel = path.strip_prefix(root).unwrap().to_path_buf();
            files.insert(rel, std::fs::read(&path).unwrap());
        }
    }
}
