//! # Registry Press
//!
//! Publishes a component registry as a tree of static JSON documents. A single
//! hand-written `registry.json` lists the publishable items; each item's source
//! files are embedded into a self-contained descriptor that external tooling
//! fetches by item name.
//!
//! # Pipeline
//!
//! ```text
//! 1. Read       registry.json  →  RegistryManifest
//! 2. Publish    manifest       →  public/r/<item>/{registry-item.json, index.json, styles/style.css}
//! 3. Index      summaries      →  public/r/index.json
//! ```
//!
//! Items are independent: step 2 fans out over a rayon pool and step 3 runs
//! once every item has finished. A run always regenerates the whole tree and
//! is safe to repeat; files whose bytes would not change are left untouched.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`manifest`] | Loads `registry.json` |
//! | [`publish`] | Writes the per-item documents and the top-level index |
//! | [`resolve`] | Reads registry dependencies back from a written descriptor |
//! | [`check`] | Validates a manifest without writing anything |
//! | [`links`] | Builds "open in" deep links for an item name |
//! | [`config`] | Optional `registry.toml` layered over stock defaults |
//! | [`types`] | Manifest input types and published document types |
//! | [`naming`] | Item-name rules and file basenames |
//! | [`output`] | CLI output formatting |
//!
//! # Failure Policy
//!
//! A missing manifest, an unusable or duplicate item name, or an I/O error
//! while writing aborts the run. A missing source file only produces a warning
//! and an empty `content` string. A descriptor that cannot be read back yields
//! an empty dependency list.

pub mod check;
pub mod config;
pub mod links;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod publish;
pub mod resolve;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
