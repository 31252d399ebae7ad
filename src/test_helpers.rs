//! Shared test utilities for the mongoose test suite.
//!
//! Provides fixture setup, lookup helpers and bulk extractors that work with
//! scan-phase data structures (`Section`, `Document`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let sections = scan(tmp.path()).unwrap();
//!
//! let section = find_section(&sections, "Getting Started");
//! assert_eq!(output_paths(section), vec!["getting-started/install.html"]);
//! ```

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::types::{Document, Section};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
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

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a section by title. Panics if not found.
pub fn find_section<'a>(sections: &'a [Section], title: &str) -> &'a Section {
    sections
        .iter()
        .find(|s| s.title == title)
        .unwrap_or_else(|| {
            let titles = section_titles(sections);
            panic!("section '{title}' not found. Available: {titles:?}")
        })
}

/// Find a document by output path within a section. Panics if not found.
pub fn find_document<'a>(section: &'a Section, output_path: &str) -> &'a Document {
    section
        .documents
        .iter()
        .find(|d| d.output_path == output_path)
        .unwrap_or_else(|| {
            let paths = output_paths(section);
            panic!(
                "document '{output_path}' not found in section '{}'. Available: {paths:?}",
                section.title
            )
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All section titles in order.
pub fn section_titles(sections: &[Section]) -> Vec<&str> {
    sections.iter().map(|s| s.title.as_str()).collect()
}

/// All document titles in section order.
pub fn document_titles(section: &Section) -> Vec<&str> {
    section.documents.iter().map(|d| d.title.as_str()).collect()
}

/// All document output paths in section order.
pub fn output_paths(section: &Section) -> Vec<&str> {
    section
        .documents
        .iter()
        .map(|d| d.output_path.as_str())
        .collect()
}

// =========================================================================
// Log capture
// =========================================================================

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber and return its result together
/// with every `WARN` and `ERROR` line it logged.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}
