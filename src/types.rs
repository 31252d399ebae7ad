//! Shared types passed between pipeline stages.
//!
//! The scanner creates [`Section`]s holding [`Document`]s with only their
//! paths filled in. The parser completes each document (title, date, body,
//! table of contents), the orchestrator sorts, and the renderer reads them.

use chrono::NaiveDate;
use std::path::PathBuf;

/// One source markdown file and, once parsed, its rendered content.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Title from frontmatter, or derived from the filename.
    pub title: String,
    /// Publish date. `None` until parsed.
    pub date: Option<NaiveDate>,
    /// Markdown body with the frontmatter block stripped.
    pub body: String,
    /// Rendered HTML of `body`.
    pub html: String,
    /// Location of the source `.md` file.
    pub source_path: PathBuf,
    /// Output location relative to the output root, forward-slash separated
    /// (`guides/setup.html`, `intro.html`).
    pub output_path: String,
    /// Level 2 and 3 headings in document order.
    pub toc: Vec<TocEntry>,
}

impl Document {
    /// A scanned, not yet parsed document.
    pub fn new(source_path: PathBuf, output_path: String) -> Self {
        Self {
            title: String::new(),
            date: None,
            body: String::new(),
            html: String::new(),
            source_path,
            output_path,
            toc: Vec::new(),
        }
    }

    /// Same content, different output location. Used for the home page.
    pub fn relocated(&self, output_path: &str) -> Self {
        Self {
            output_path: output_path.to_string(),
            ..self.clone()
        }
    }
}

/// A named group of documents, shown as one collapsible sidebar group.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Display title (`getting-started` → "Getting Started").
    pub title: String,
    pub documents: Vec<Document>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            documents: Vec::new(),
        }
    }

    /// Whether `doc` is one of this section's documents (by source path).
    pub fn contains(&self, doc: &Document) -> bool {
        self.documents
            .iter()
            .any(|d| d.source_path == doc.source_path)
    }

    /// The most recent date among the section's documents.
    ///
    /// Sections without any dated document compare as the earliest
    /// possible date.
    pub fn newest_date(&self) -> NaiveDate {
        self.documents
            .iter()
            .filter_map(|d| d.date)
            .max()
            .unwrap_or(NaiveDate::MIN)
    }
}

/// A heading reference in a document's table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Fragment id, without the leading `#`.
    pub id: String,
    pub text: String,
    /// 2 or 3.
    pub level: u8,
}

impl TocEntry {
    /// CSS class used to indent the entry (`level-2`, `level-3`).
    pub fn level_class(&self) -> String {
        format!("level-{}", self.level)
    }
}
