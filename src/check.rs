//! Manifest validation without publishing.
//!
//! Reports everything `publish` would refuse (errors) or tolerate with a
//! warning, in one pass, so a broken manifest can be fixed before any output
//! is written.
//!
//! | Finding | Severity | `publish` behaviour |
//! |---------|----------|---------------------|
//! | Duplicate item name | error | aborts before writing |
//! | Name not usable as a directory | error | aborts before writing |
//! | Referenced source file missing | warning | publishes empty content |
//!
//! Registry dependencies are not checked against the manifest: they may name
//! items of other registries.

use crate::manifest::{self, ManifestError};
use crate::naming::{self, NameProblem};
use crate::types::RegistryManifest;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    #[error("Manifest check failed with {0} error(s)")]
    Failed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    DuplicateName { name: String },
    InvalidName { name: String, problem: NameProblem },
    MissingFile { item: String, path: String },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::DuplicateName { .. } | Finding::InvalidName { .. } => Severity::Error,
            Finding::MissingFile { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::DuplicateName { name } => write!(f, "duplicate item name: {name}"),
            Finding::InvalidName { name, problem } => {
                write!(f, "invalid item name {name:?}: {problem}")
            }
            Finding::MissingFile { item, path } => write!(f, "{item}: {path} does not exist"),
        }
    }
}

/// Findings for one manifest, in manifest order.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub item_count: usize,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity() == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings.len() - self.error_count()
    }
}

/// Validate a loaded manifest. Source paths are resolved against the working directory.
pub fn check_manifest(manifest: &RegistryManifest) -> CheckReport {
    let mut findings = Vec::new();
    let mut seen = HashSet::new();
    let mut reported_duplicates = HashSet::new();

    for item in &manifest.items {
        if let Err(problem) = naming::check_segment(&item.name) {
            findings.push(Finding::InvalidName {
                name: item.name.clone(),
                problem,
            });
        }
        if !seen.insert(item.name.as_str()) && reported_duplicates.insert(item.name.as_str()) {
            findings.push(Finding::DuplicateName {
                name: item.name.clone(),
            });
        }
        for file in &item.files {
            if !Path::new(&file.path).exists() {
                findings.push(Finding::MissingFile {
                    item: item.name.clone(),
                    path: file.path.clone(),
                });
            }
        }
    }

    CheckReport {
        item_count: manifest.items.len(),
        findings,
    }
}

/// Load the manifest at `path` and validate it.
///
/// The report is returned even when it contains errors; callers decide whether
/// errors are fatal (see [`CheckReport::error_count`]).
pub fn check_path(path: &Path) -> Result<CheckReport, CheckError> {
    let manifest = manifest::load_manifest(path)?;
    Ok(check_manifest(&manifest))
}
