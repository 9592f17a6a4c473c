//! Registry publishing.
//!
//! Turns a [`RegistryManifest`] into a static tree of JSON documents that
//! external tooling fetches by item name.
//!
//! ## Output Structure
//!
//! ```text
//! public/
//! └── r/
//!     ├── index.json                 # Catalog: name, count, registry URL, summaries
//!     ├── hello-world/
//!     │   ├── registry-item.json     # Descriptor with embedded file contents
//!     │   ├── index.json             # Identity + resolved registry dependencies
//!     │   └── styles/
//!     │       └── style.css          # Placeholder stylesheet
//!     └── restaurant-hero/
//!         └── ...
//! ```
//!
//! ## Per-Item Sequence
//!
//! Each item is published independently, in this order:
//!
//! 1. Create `r/<name>/` and `r/<name>/styles/`.
//! 2. Build the descriptor, embedding each referenced file. A missing file
//!    becomes empty content plus a warning; the build continues.
//! 3. Write `registry-item.json`.
//! 4. Write `styles/style.css`.
//! 5. Read the descriptor back through [`resolve::item_registry_dependencies`]
//!    and write `index.json` with the result.
//!
//! Step 5 reads the file from disk, not the manifest item. A descriptor that
//! cannot be read back produces an index with no registry dependencies.
//!
//! ## Parallel Processing
//!
//! Items are published in parallel using [rayon](https://docs.rs/rayon). Each
//! item owns a disjoint subtree, so there is no contention; collecting the
//! results is the barrier before the top-level index is written, and the
//! collected summaries keep manifest order.
//!
//! Files are only rewritten when their bytes change. Nothing is ever deleted:
//! outputs of items removed from the manifest stay on disk.

use crate::config::PublishConfig;
use crate::manifest::{self, ManifestError};
use crate::naming::{self, NameProblem};
use crate::resolve;
use crate::types::{
    ItemSummary, PublishedFile, PublishedItemDescriptor, PublishedItemIndex, RegistryIndex,
    RegistryItem, RegistryManifest,
};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the content-embedded item document.
pub const DESCRIPTOR_FILENAME: &str = "registry-item.json";
/// File name of the per-item and top-level index documents.
pub const INDEX_FILENAME: &str = "index.json";
const STYLES_DIR: &str = "styles";
const STYLESHEET_FILENAME: &str = "style.css";

#[derive(Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate item name: {0}")]
    DuplicateItem(String),
    #[error("Invalid item name {name:?}: {problem}")]
    InvalidItemName { name: String, problem: NameProblem },
}

/// Whether a write touched the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    Unchanged,
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteStatus::Written => write!(f, "written"),
            WriteStatus::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Written/unchanged counters across a whole run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteStats {
    pub written: usize,
    pub unchanged: usize,
}

impl WriteStats {
    pub fn record(&mut self, status: WriteStatus) {
        match status {
            WriteStatus::Written => self.written += 1,
            WriteStatus::Unchanged => self.unchanged += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.written + self.unchanged
    }
}

impl fmt::Display for WriteStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} written, {} unchanged", self.written, self.unchanged)
    }
}

/// What happened to one item.
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub summary: ItemSummary,
    pub dir: PathBuf,
    /// Source paths in manifest order.
    pub files: Vec<String>,
    /// Source paths that did not exist and were published with empty content.
    pub missing_files: Vec<String>,
    /// Registry dependencies as resolved from the written descriptor.
    pub registry_dependencies: Vec<String>,
    pub writes: Vec<(PathBuf, WriteStatus)>,
}

/// Result of a full publish run.
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub index: RegistryIndex,
    pub registry_dir: PathBuf,
    /// Per-item reports in manifest order.
    pub items: Vec<ItemReport>,
    pub stats: WriteStats,
}

impl PublishReport {
    pub fn missing_file_count(&self) -> usize {
        self.items.iter().map(|i| i.missing_files.len()).sum()
    }
}

/// Load the manifest at `manifest_path` and publish it.
///
/// A missing manifest fails before anything is created under `output_root`.
pub fn publish_from_path(
    manifest_path: &Path,
    output_root: &Path,
    config: &PublishConfig,
) -> Result<PublishReport, PublishError> {
    let manifest = manifest::load_manifest(manifest_path)?;
    publish(&manifest, output_root, config)
}

/// Publish every item of `manifest` under `<output_root>/<registry_dir>/`.
pub fn publish(
    manifest: &RegistryManifest,
    output_root: &Path,
    config: &PublishConfig,
) -> Result<PublishReport, PublishError> {
    validate_item_names(&manifest.items)?;

    let registry_dir = output_root.join(&config.publish.registry_dir);
    fs::create_dir_all(&registry_dir)?;

    let items = manifest
        .items
        .par_iter()
        .map(|item| publish_item(item, &registry_dir, config))
        .collect::<Result<Vec<_>, _>>()?;

    let index = RegistryIndex {
        name: manifest.name.clone(),
        count: items.len(),
        registry: config.registry_url(&manifest.homepage),
        items: items.iter().map(|i| i.summary.clone()).collect(),
    };
    let index_status = write_json(&registry_dir.join(INDEX_FILENAME), &index)?;

    let mut stats = WriteStats::default();
    for item in &items {
        for (_, status) in &item.writes {
            stats.record(*status);
        }
    }
    stats.record(index_status);

    tracing::info!(
        items = index.count,
        written = stats.written,
        unchanged = stats.unchanged,
        "registry published"
    );

    Ok(PublishReport {
        index,
        registry_dir,
        items,
        stats,
    })
}

/// Reject names that cannot be an item directory, and duplicates.
///
/// Duplicate names would have two parallel publishers writing the same
/// subtree, so they are refused before anything is written.
fn validate_item_names(items: &[RegistryItem]) -> Result<(), PublishError> {
    let mut seen = HashSet::new();
    for item in items {
        if let Err(problem) = naming::check_segment(&item.name) {
            return Err(PublishError::InvalidItemName {
                name: item.name.clone(),
                problem,
            });
        }
        if !seen.insert(item.name.as_str()) {
            return Err(PublishError::DuplicateItem(item.name.clone()));
        }
    }
    Ok(())
}

fn publish_item(
    item: &RegistryItem,
    registry_dir: &Path,
    config: &PublishConfig,
) -> Result<ItemReport, PublishError> {
    let item_dir = registry_dir.join(&item.name);
    let styles_dir = item_dir.join(STYLES_DIR);
    fs::create_dir_all(&styles_dir)?;

    let mut missing_files = Vec::new();
    let files = item
        .files
        .iter()
        .map(|file| {
            let content = load_file_content(Path::new(&file.path));
            if content.is_none() {
                missing_files.push(file.path.clone());
            }
            PublishedFile {
                name: naming::file_basename(&file.path),
                path: file.path.clone(),
                content: content.unwrap_or_default(),
                file_type: file.file_type.clone(),
                target: file.target.clone(),
            }
        })
        .collect();

    let descriptor = PublishedItemDescriptor {
        name: item.name.clone(),
        item_type: item.item_type.clone(),
        title: item.title.clone(),
        description: item.description.clone(),
        dependencies: item.dependencies.clone().unwrap_or_default(),
        registry_dependencies: item.registry_dependencies.clone().unwrap_or_default(),
        files,
    };

    let mut writes = Vec::with_capacity(3);

    let descriptor_path = item_dir.join(DESCRIPTOR_FILENAME);
    let status = write_json(&descriptor_path, &descriptor)?;
    writes.push((descriptor_path, status));

    let stylesheet_path = styles_dir.join(STYLESHEET_FILENAME);
    let status = write_if_changed(&stylesheet_path, config.publish.stylesheet.as_bytes())?;
    writes.push((stylesheet_path, status));

    let registry_dependencies =
        resolve::item_registry_dependencies(&item_dir, DESCRIPTOR_FILENAME);
    let index = PublishedItemIndex {
        name: item.name.clone(),
        item_type: item.item_type.clone(),
        title: item.title.clone(),
        description: item.description.clone(),
        dependencies: descriptor.dependencies,
        registry_dependencies: registry_dependencies.clone(),
    };
    let index_path = item_dir.join(INDEX_FILENAME);
    let status = write_json(&index_path, &index)?;
    writes.push((index_path, status));

    tracing::debug!(item = %item.name, files = item.files.len(), "published item");

    Ok(ItemReport {
        summary: item.summary(),
        dir: item_dir,
        files: item.files.iter().map(|f| f.path.clone()).collect(),
        missing_files,
        registry_dependencies,
        writes,
    })
}

/// Read a referenced source file.
///
/// Returns `None` (and logs a warning) when the path does not exist. Paths are
/// resolved against the working directory, as written in the manifest.
pub fn load_file_content(path: &Path) -> Option<String> {
    if !path.exists() {
        tracing::warn!("{} does not exist", path.display());
        return None;
    }
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::warn!("{} could not be read: {e}", path.display());
            None
        }
    }
}

/// Serialize `value` as two-space pretty JSON and write it if changed.
fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<WriteStatus, PublishError> {
    let json = serde_json::to_string_pretty(value)?;
    Ok(write_if_changed(path, json.as_bytes())?)
}

/// Write `contents` to `path` unless the file already holds exactly those bytes.
fn write_if_changed(path: &Path, contents: &[u8]) -> std::io::Result<WriteStatus> {
    if let Ok(existing) = fs::read(path)
        && existing == contents
    {
        return Ok(WriteStatus::Unchanged);
    }
    fs::write(path, contents)?;
    Ok(WriteStatus::Written)
}
