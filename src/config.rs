//! Publisher configuration.
//!
//! Handles loading, validating, and merging `registry.toml`. The file is
//! optional: stock defaults are used when it is absent, and a present file only
//! needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! manifest = "registry.json"   # Registry manifest to publish
//! output = "public"            # Output root
//!
//! [publish]
//! registry_dir = "r"           # Registry subdirectory under the output root
//! stylesheet = "/* Styles for component */"
//!
//! [links]
//! open_in = "https://v0.dev/chat/api/open"
//!
//! [processing]
//! max_processes = 4            # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early. Command-line flags
//! (`--manifest`, `--output`) take precedence over the file.

use crate::naming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "registry.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Publisher configuration loaded from `registry.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    /// Path to the registry manifest.
    pub manifest: String,
    /// Output root; the registry is written to `<output>/<registry_dir>/`.
    pub output: String,
    /// Layout and placeholder content of the published tree.
    pub publish: PublishSettings,
    /// Deep-link settings for the `link` command.
    pub links: LinksConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            manifest: "registry.json".to_string(),
            output: "public".to_string(),
            publish: PublishSettings::default(),
            links: LinksConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl PublishConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(problem) = naming::check_segment(&self.publish.registry_dir) {
            return Err(ConfigError::Validation(format!(
                "publish.registry_dir must be a single directory name ({problem})"
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        if self.links.open_in.trim().is_empty() {
            return Err(ConfigError::Validation(
                "links.open_in must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Registry base URL advertised in the top-level index.
    pub fn registry_url(&self, homepage: &str) -> String {
        format!("{}/{}", homepage, self.publish.registry_dir)
    }
}

/// Layout of the published registry tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishSettings {
    /// Registry subdirectory under the output root.
    pub registry_dir: String,
    /// Text written to each item's `styles/style.css`.
    pub stylesheet: String,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            registry_dir: "r".to_string(),
            stylesheet: "/* Styles for component */".to_string(),
        }
    }
}

/// "Open in" deep-link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    /// Endpoint that accepts a registry item URL as its `url` query parameter.
    pub open_in: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            open_in: "https://v0.dev/chat/api/open".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel item publishers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(PublishConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<PublishConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PublishConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<PublishConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_some() {
        tracing::debug!(path = %path.display(), "loaded config");
    }
    resolve_config(overlay)
}

/// Returns a fully-commented stock `registry.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Registry Press Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.
# --manifest and --output on the command line override the values here.

# Registry manifest describing every publishable item.
manifest = "registry.json"

# Output root. The registry is written to <output>/<publish.registry_dir>/.
output = "public"

# ---------------------------------------------------------------------------
# Published tree
# ---------------------------------------------------------------------------
[publish]
# Registry directory under the output root. Also appended to the manifest
# homepage to form the registry URL in the top-level index.json.
registry_dir = "r"

# Placeholder written to <item>/styles/style.css for every item.
stylesheet = "/* Styles for component */"

# ---------------------------------------------------------------------------
# Deep links
# ---------------------------------------------------------------------------
[links]
# Endpoint used by `registry-press link <name>`. The item's registry-item.json
# URL is passed as the `url` query parameter.
open_in = "https://v0.dev/chat/api/open"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel item publishers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_paths() {
        let config = PublishConfig::default();
        assert_eq!(config.manifest, "registry.json");
        assert_eq!(config.output, "public");
        assert_eq!(config.publish.registry_dir, "r");
        assert_eq!(config.publish.stylesheet, "/* Styles for component */");
    }

    #[test]
    fn registry_url_appends_registry_dir() {
        let config = PublishConfig::default();
        assert_eq!(config.registry_url("https://x.test"), "https://x.test/r");
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config.output, "public");
        assert!(config.processing.max_processes.is_none());
    }

    #[test]
    fn load_config_reads_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"
output = "site"

[publish]
stylesheet = "/* empty */"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.output, "site");
        assert_eq!(config.publish.stylesheet, "/* empty */");
        // Unspecified values keep their defaults
        assert_eq!(config.publish.registry_dir, "r");
        assert_eq!(config.manifest, "registry.json");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "[publish]\nregistry_dri = \"r\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn nested_registry_dir_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        fs::write(&path, "[publish]\nregistry_dir = \"a/b\"\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn zero_max_processes_rejected() {
        let config = PublishConfig {
            processing: ProcessingConfig {
                max_processes: Some(0),
            },
            ..PublishConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig {
            max_processes: None,
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(100_000),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value =
            toml::from_str("[publish]\nregistry_dir = \"r\"\nstylesheet = \"a\"\n").unwrap();
        let overlay: toml::Value = toml::from_str("[publish]\nstylesheet = \"b\"\n").unwrap();
        let merged = merge_toml(base, overlay);
        let publish = merged.get("publish").unwrap();
        assert_eq!(publish.get("registry_dir").unwrap().as_str(), Some("r"));
        assert_eq!(publish.get("stylesheet").unwrap().as_str(), Some("b"));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let merged = merge_toml(toml::Value::from("a"), toml::Value::from("b"));
        assert_eq!(merged.as_str(), Some("b"));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let config = resolve_config(Some(value)).unwrap();
        let defaults = PublishConfig::default();
        assert_eq!(config.manifest, defaults.manifest);
        assert_eq!(config.output, defaults.output);
        assert_eq!(config.publish.registry_dir, defaults.publish.registry_dir);
        assert_eq!(config.publish.stylesheet, defaults.publish.stylesheet);
        assert_eq!(config.links.open_in, defaults.links.open_in);
    }
}
