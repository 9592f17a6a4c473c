//! Item name and file name rules.
//!
//! An item's `name` doubles as its directory under the registry root, so it
//! must be usable as exactly one path segment:
//! - `hello-world` → ok
//! - `restaurant-hero` → ok
//! - `""`, `.`, `..` → rejected
//! - `ui/button`, `ui\button` → rejected (would escape or nest the item dir)

use std::path::Path;

/// Why an item name cannot be used as a directory.
#[derive(Debug, Clone, PartialEq)]
pub enum NameProblem {
    Empty,
    DotSegment,
    PathSeparator,
    Whitespace,
}

impl std::fmt::Display for NameProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameProblem::Empty => write!(f, "name is empty"),
            NameProblem::DotSegment => write!(f, "name is a relative path segment"),
            NameProblem::PathSeparator => write!(f, "name contains a path separator"),
            NameProblem::Whitespace => write!(f, "name has leading or trailing whitespace"),
        }
    }
}

/// Check that `name` is a single, non-relative path segment.
pub fn check_segment(name: &str) -> Result<(), NameProblem> {
    if name.is_empty() {
        return Err(NameProblem::Empty);
    }
    if name.trim() != name {
        return Err(NameProblem::Whitespace);
    }
    if name == "." || name == ".." {
        return Err(NameProblem::DotSegment);
    }
    if name.contains('/') || name.contains('\\') {
        return Err(NameProblem::PathSeparator);
    }
    Ok(())
}

/// Last path component of a manifest file path, as written into descriptors.
///
/// Falls back to the full path when there is no final component (e.g. `..`).
pub fn file_basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}
