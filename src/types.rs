//! Shared types for the registry pipeline.
//!
//! Input types mirror `registry.json` as authored by hand. Output types are the
//! documents written under `<output>/r/`; their field order is the key order in
//! the emitted JSON, so reordering fields changes the published bytes.

use serde::{Deserialize, Serialize};

/// Root of the declarative registry description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryManifest {
    pub name: String,
    pub homepage: String,
    #[serde(default)]
    pub items: Vec<RegistryItem>,
}

/// One publishable unit, typically a single UI component.
///
/// `dependencies` are external package names; `registry_dependencies` are other
/// registry items. Both are optional in the manifest and default to empty when
/// published.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_dependencies: Option<Vec<String>>,
    #[serde(default)]
    pub files: Vec<RegistryFile>,
}

/// Reference to a source file. Content is read at publish time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryFile {
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// `registry-item.json`: the self-contained, content-embedded item document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedItemDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: String,
    pub dependencies: Vec<String>,
    pub registry_dependencies: Vec<String>,
    pub files: Vec<PublishedFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedFile {
    /// Basename of `path`.
    pub name: String,
    pub path: String,
    /// Raw file text, empty when the source was missing at publish time.
    pub content: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Per-item `index.json`.
///
/// `registry_dependencies` is read back from the written descriptor, not taken
/// from the manifest item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedItemIndex {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: String,
    pub dependencies: Vec<String>,
    pub registry_dependencies: Vec<String>,
}

/// Catalog entry in the top-level index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: String,
}

/// Top-level `r/index.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryIndex {
    pub name: String,
    pub count: usize,
    pub registry: String,
    pub items: Vec<ItemSummary>,
}

impl RegistryItem {
    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            name: self.name.clone(),
            item_type: self.item_type.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}
