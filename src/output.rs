//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each section and
//! document leads with its positional index and title; paths follow as
//! secondary context. The listing reads as a content inventory while still
//! letting users trace each page back to its source.
//!
//! # Output Format
//!
//! ## Check (scan only)
//!
//! ```text
//! Sections
//! 001 Documentation (2 documents)
//!     001 about.md
//!     002 welcome.md
//! 002 Getting Started (2 documents)
//!     001 first_steps.md → getting-started/first_steps.html
//!     002 install.md → getting-started/install.html
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Generate
//!
//! ```text
//! 001 Release Notes
//!     001 Version 0.3 → release-notes/v0-3.html
//!     002 Version 0.4 → release-notes/v0-4.html
//! 002 Documentation
//!     001 About → about.html
//!
//! Home → index.html
//!
//! Skipped
//!     notes/broken.md
//!
//! Generated 3 pages, 1 home page, 2 assets, 2 extra files
//! ```
//!
//! # Architecture
//!
//! Each listing has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::config::CONFIG_FILENAME;
use crate::generate::GenerateReport;
use crate::types::{Document, Section};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Source path shown relative to the content root when possible.
fn source_display(doc: &Document, root: &Path) -> String {
    doc.source_path
        .strip_prefix(root)
        .unwrap_or(&doc.source_path)
        .display()
        .to_string()
}

// ============================================================================
// Check: scan output
// ============================================================================

/// Format the scanned structure before parsing.
///
/// Documents are listed by source file; the output path is shown when it
/// differs from the source name (i.e. inside a section directory).
pub fn format_scan_output(sections: &[Section], source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];

    for (i, section) in sections.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            section.title,
            plural(section.documents.len(), "document")
        ));
        for (j, doc) in section.documents.iter().enumerate() {
            let source = source_display(doc, source_root);
            let line = if doc.output_path.contains('/') {
                format!("{} {} → {}", format_index(j + 1), source, doc.output_path)
            } else {
                format!("{} {}", format_index(j + 1), source)
            };
            lines.push(format!("{}{}", indent(1), line));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join(CONFIG_FILENAME).exists() {
        lines.push(format!("{}{}", indent(1), CONFIG_FILENAME));
    } else {
        lines.push(format!("{}(defaults)", indent(1)));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(sections: &[Section], source_root: &Path) {
    for line in format_scan_output(sections, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format the result of a generation run, in final sidebar order.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, section) in report.sections.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), section.title));
        for (j, doc) in section.documents.iter().enumerate() {
            lines.push(format!(
                "{}{} {} → {}",
                indent(1),
                format_index(j + 1),
                doc.title,
                doc.output_path
            ));
        }
    }

    if let Some(home) = &report.home {
        lines.push(String::new());
        lines.push(format!("Home → {}", home));
    }

    if !report.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for path in &report.skipped {
            lines.push(format!("{}{}", indent(1), path.display()));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}, {}",
        plural(report.pages.len(), "page"),
        plural(usize::from(report.home.is_some()), "home page"),
        plural(report.assets.len(), "asset"),
        plural(report.extras.len(), "extra file"),
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}
