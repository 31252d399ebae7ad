//! Content directory scanning.
//!
//! Stage 1 of the build pipeline. Walks the content root one level deep and
//! groups markdown files into sections. Only paths are filled in here; the
//! parse stage reads the files.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── welcome.md                   # Root file → "Documentation" section
//! ├── getting-started/             # Section "Getting Started"
//! │   ├── install.md               #   → getting-started/install.html
//! │   └── first_steps.md           #   → getting-started/first_steps.html
//! ├── Release Notes/               # Section "Release Notes"
//! │   └── v1.md                    #   → release-notes/v1.html
//! ├── assets/                      # No markdown → not a section
//! │   └── images/logo.png
//! └── drafts/
//!     └── deep/                    # Nested directories are not scanned
//!         └── idea.md
//! ```
//!
//! ## Rules
//!
//! - Section directories are visited in lexicographic order, files within a
//!   section likewise. The parse stage re-sorts by date later.
//! - Root-level markdown files form a "Documentation" section placed first.
//! - Directories without markdown files produce no section.
//! - Names starting with `.` are skipped.
//! - A directory whose name has no slug characters (`ノート/`, `+++/`) is
//!   written under `section-<n>/`, `n` being its 1-based position among the
//!   content root's directories.
//! - Two sources mapping to the same output path is an error.

use crate::naming;
use crate::types::{Document, Section};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

/// Title of the section built from markdown files in the content root.
pub const ROOT_SECTION_TITLE: &str = "Documentation";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{} and {} both map to output {path}", .first.display(), .second.display())]
    DuplicateOutput {
        path: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Scan a content root into an ordered list of non-empty sections.
pub fn scan(root: &Path) -> Result<Vec<Section>, ScanError> {
    let mut sections = Vec::new();

    let dirs = collect_entries(root)?.into_iter().filter(|p| p.is_dir());
    for (position, dir) in dirs.enumerate() {
        let name = file_name(&dir);
        let slug = section_slug(&name, position + 1);
        let mut section = Section::new(naming::display_title(&name));

        for md in markdown_files(&dir)? {
            let output = format!("{slug}/{}", html_name(&md));
            section.documents.push(Document::new(md, output));
        }

        if !section.documents.is_empty() {
            sections.push(section);
        }
    }

    let mut root_section = Section::new(ROOT_SECTION_TITLE);
    for md in markdown_files(root)? {
        let output = html_name(&md);
        root_section.documents.push(Document::new(md, output));
    }
    if !root_section.documents.is_empty() {
        sections.insert(0, root_section);
    }

    check_unique_outputs(&sections)?;
    Ok(sections)
}

/// Immediate children of `dir`, sorted by name, hidden entries skipped.
fn collect_entries(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        entries.push(entry.into_path());
    }
    Ok(entries)
}

/// URL slug for a section directory, never empty.
fn section_slug(name: &str, position: usize) -> String {
    let slug = naming::url_slug(name);
    if !slug.is_empty() {
        return slug;
    }
    let fallback = format!("section-{position}");
    warn!(directory = name, slug = %fallback, "directory name has no URL-safe characters");
    fallback
}

fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    Ok(collect_entries(dir)?
        .into_iter()
        .filter(|p| p.is_file() && is_markdown(p))
        .collect())
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// `install.md` → `install.html`. The filename is kept as-is otherwise.
fn html_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("{stem}.html")
}

fn check_unique_outputs(sections: &[Section]) -> Result<(), ScanError> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for doc in sections.iter().flat_map(|s| &s.documents) {
        if let Some(first) = seen.insert(&doc.output_path, &doc.source_path) {
            return Err(ScanError::DuplicateOutput {
                path: doc.output_path.clone(),
                first: first.to_path_buf(),
                second: doc.source_path.clone(),
            });
        }
    }
    Ok(())
}
