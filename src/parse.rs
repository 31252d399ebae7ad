//! Document parsing: source file → title, date, HTML body, TOC.
//!
//! Fills in the content fields of a scanned [`Document`]. Defaults follow
//! fixed rules so a bare markdown file with no frontmatter still produces a
//! complete page:
//!
//! | Field | Source | Fallback |
//! |-------|--------|----------|
//! | title | frontmatter `title` | filename (`my-first-post.md` → "My First Post"), then "Untitled" |
//! | date  | frontmatter `date` as `YYYY-MM-DD` | the build date |
//!
//! A broken frontmatter block is logged and ignored. A file that cannot be
//! read is reported as [`ParseError::Read`] so the caller can skip it.

use crate::frontmatter;
use crate::markdown;
use crate::naming;
use crate::types::Document;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read and parse the document's source file, completing it in place.
///
/// `today` is used when the frontmatter has no usable date.
pub fn parse_document(doc: &mut Document, today: NaiveDate) -> Result<(), ParseError> {
    let content = fs::read_to_string(&doc.source_path).map_err(|source| ParseError::Read {
        path: doc.source_path.clone(),
        source,
    })?;
    apply_content(doc, &content, today);
    Ok(())
}

/// Fill a document from already-loaded source text.
pub fn apply_content(doc: &mut Document, content: &str, today: NaiveDate) {
    let split = frontmatter::split(content);
    if let Some(reason) = &split.warning {
        warn!(
            path = %doc.source_path.display(),
            "failed to parse frontmatter, continuing without it: {reason}"
        );
    }

    doc.title = split
        .frontmatter
        .title
        .clone()
        .unwrap_or_else(|| naming::title_from_stem(&file_stem(doc)));
    doc.date = Some(resolve_date(split.frontmatter.date.as_deref(), today));

    let rendered = markdown::render(split.body);
    doc.body = split.body.to_string();
    doc.html = rendered.html;
    doc.toc = rendered.toc;

    debug!(
        path = %doc.source_path.display(),
        title = %doc.title,
        toc_entries = doc.toc.len(),
        "parsed document"
    );
}

/// Parse a frontmatter date, falling back to `today` when missing or malformed.
pub fn resolve_date(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
        .unwrap_or(today)
}

fn file_stem(doc: &Document) -> String {
    doc.source_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
