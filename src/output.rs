//! CLI output formatting.
//!
//! Output is **item-centric**: every item leads with its positional index and
//! title, with the registry name, sources and dependencies shown as indented
//! context lines.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Registry restaurant-registry → public/r
//! 001 Hello World (1 file)
//!     Item: hello-world [registry:block]
//!     Source: registry/hello-world/hello-world.tsx
//! 002 Restaurant Hero (2 files)
//!     Item: restaurant-hero [registry:component]
//!     Source: registry/restaurant-components/hero/hero.tsx
//!     Source: registry/restaurant-components/hero/missing.ts (missing)
//!     Depends on: button
//!
//! Files: 9 written, 0 unchanged
//! ✓ Registry built with 2 items
//! ```
//!
//! ## Check
//!
//! ```text
//! Checked 4 items
//!     error: duplicate item name: hero
//!     warning: gallery: registry/gallery.tsx does not exist
//! 1 error, 1 warning
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::check::{CheckReport, Severity};
use crate::publish::{ItemReport, PublishReport};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Item header: positional index + title (name when untitled) + file count.
///
/// ```text
/// 001 Restaurant Hero (2 files)
/// 002 menu-display (1 file)
/// ```
fn item_header(index: usize, title: &str, name: &str, file_count: usize) -> String {
    let label = if title.is_empty() { name } else { title };
    format!(
        "{} {} ({})",
        format_index(index),
        label,
        plural(file_count, "file")
    )
}

fn item_lines(index: usize, item: &ItemReport) -> Vec<String> {
    let ctx = indent(1);
    let mut lines = vec![
        item_header(
            index,
            &item.summary.title,
            &item.summary.name,
            item.files.len(),
        ),
        format!("{ctx}Item: {} [{}]", item.summary.name, item.summary.item_type),
    ];
    for path in &item.files {
        if item.missing_files.contains(path) {
            lines.push(format!("{ctx}Source: {path} (missing)"));
        } else {
            lines.push(format!("{ctx}Source: {path}"));
        }
    }
    if !item.registry_dependencies.is_empty() {
        lines.push(format!(
            "{ctx}Depends on: {}",
            item.registry_dependencies.join(", ")
        ));
    }
    lines
}

/// Format the result of a publish run.
pub fn format_publish_output(report: &PublishReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Registry {} → {}",
        report.index.name,
        report.registry_dir.display()
    )];

    for (i, item) in report.items.iter().enumerate() {
        lines.extend(item_lines(i + 1, item));
    }

    lines.push(String::new());
    lines.push(format!("Files: {}", report.stats));
    let missing = report.missing_file_count();
    if missing > 0 {
        lines.push(format!(
            "Warning: {} published with empty content",
            plural(missing, "missing source file")
        ));
    }
    lines.push(format!(
        "✓ Registry built with {} items",
        report.index.count
    ));
    lines
}

pub fn print_publish_output(report: &PublishReport) {
    for line in format_publish_output(report) {
        println!("{}", line);
    }
}

/// Format the findings of a manifest check.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![format!("Checked {}", plural(report.item_count, "item"))];
    let ctx = indent(1);
    for finding in &report.findings {
        let label = match finding.severity() {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        lines.push(format!("{ctx}{label}: {finding}"));
    }
    lines.push(format!(
        "{}, {}",
        plural(report.error_count(), "error"),
        plural(report.warning_count(), "warning")
    ));
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
