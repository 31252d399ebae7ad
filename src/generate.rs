//! Site generation.
//!
//! Runs the whole pipeline for one content root. Every step finishes before
//! the next one starts:
//!
//! ```text
//! 1. validate   input dir exists
//! 2. config     config.toml over stock defaults
//! 3. scan       content/ → sections with output paths
//! 4. parse      each document: frontmatter, markdown, TOC
//! 5. sort       documents oldest first, sections newest first
//! 6. render     each document → output/<path>.html
//! 7. assets     logo + favicon
//! 8. home       first document of first section → index.html
//! 9. publish    sitemap.xml, CNAME
//! ```
//!
//! ## Failure Policy
//!
//! | Problem | Result |
//! |---------|--------|
//! | input missing or not a directory | [`GenerateError::MissingInput`] |
//! | document cannot be read | warning, document skipped |
//! | frontmatter or date broken | warning or silent default, see [`crate::parse`] |
//! | no documents at all | warning, empty site |
//! | any output write fails | [`GenerateError::Write`] naming the file |
//!
//! ## Output Structure
//!
//! ```text
//! output/
//! ├── index.html                 # Copy of the first document
//! ├── welcome.html               # Root-level documents
//! ├── getting-started/
//! │   └── install.html           # Section documents
//! ├── assets/images/             # Logo and favicon
//! ├── sitemap.xml
//! └── CNAME
//! ```
//!
//! Files are written through a temporary file in the destination directory
//! and renamed into place. An aborted run leaves each path either at its
//! previous contents or fully rewritten.

use crate::assets::{self, AssetError};
use crate::config::{self, ConfigError, SiteConfig};
use crate::parse;
use crate::render::{self, HOME_PAGE};
use crate::scan::{self, ScanError};
use crate::sitemap;
use crate::types::Section;
use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Input directory does not exist: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("output path {0:?} must be relative and stay inside the output directory")]
    UnsafeOutputPath(String),
    #[error("generation cancelled")]
    Cancelled,
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Per-run settings that are not part of the site config.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Date used for documents without a valid frontmatter date.
    pub today: NaiveDate,
    /// When set to `true` by another thread, the run stops before the next
    /// document.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl GenerateOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn check_cancelled(&self) -> Result<(), GenerateError> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(GenerateError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// What a run produced.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Final section order, documents fully parsed.
    pub sections: Vec<Section>,
    /// Output paths of rendered documents, in write order.
    pub pages: Vec<String>,
    /// Output path of the synthesized home page, if one was written.
    pub home: Option<String>,
    /// Sources that could not be read.
    pub skipped: Vec<PathBuf>,
    /// Copied asset paths, relative to the output root.
    pub assets: Vec<String>,
    /// Other written files (`sitemap.xml`, `CNAME`).
    pub extras: Vec<String>,
}

impl GenerateReport {
    /// Every written HTML path, home page included.
    pub fn html_paths(&self) -> Vec<&str> {
        self.pages
            .iter()
            .chain(self.home.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Generate the site for `input` into `output`.
pub fn generate(
    input: &Path,
    output: &Path,
    options: &GenerateOptions,
) -> Result<GenerateReport, GenerateError> {
    if !input.is_dir() {
        return Err(GenerateError::MissingInput(input.to_path_buf()));
    }

    let config = config::load_config(input)?;
    let mut sections = scan::scan(input)?;
    info!(
        sections = sections.len(),
        documents = document_count(&sections),
        "scanned {}",
        input.display()
    );

    let mut report = GenerateReport::default();
    parse_all(&mut sections, options, &mut report.skipped)?;
    sort_sections(&mut sections);

    if sections.is_empty() {
        warn!(input = %input.display(), "no markdown documents found, generating an empty site");
    }

    create_dir(output)?;
    render_all(&sections, &config, output, options, &mut report.pages)?;

    report.assets = assets::copy_assets(input, output, &config)?;
    report.home = write_home_page(&sections, &config, output, &report.pages)?;
    report.sections = sections;
    report.extras = write_publish_files(&report, &config, output)?;

    info!(
        pages = report.pages.len(),
        skipped = report.skipped.len(),
        "site generated at {}",
        output.display()
    );
    Ok(report)
}

/// Parse every document in place. Unreadable documents are removed and
/// recorded in `skipped`; sections left empty are dropped.
fn parse_all(
    sections: &mut Vec<Section>,
    options: &GenerateOptions,
    skipped: &mut Vec<PathBuf>,
) -> Result<(), GenerateError> {
    for section in sections.iter_mut() {
        let mut kept = Vec::with_capacity(section.documents.len());
        for mut doc in section.documents.drain(..) {
            options.check_cancelled()?;
            match parse::parse_document(&mut doc, options.today) {
                Ok(()) => kept.push(doc),
                Err(e) => {
                    warn!("skipping document: {e}");
                    skipped.push(doc.source_path);
                }
            }
        }
        section.documents = kept;
    }
    sections.retain(|s| !s.documents.is_empty());
    Ok(())
}

/// Order documents oldest first within each section, then sections by their
/// newest document, newest first. Both sorts are stable.
pub fn sort_sections(sections: &mut [Section]) {
    for section in sections.iter_mut() {
        section.documents.sort_by_key(|d| d.date);
    }
    sections.sort_by(|a, b| b.newest_date().cmp(&a.newest_date()));
}

fn render_all(
    sections: &[Section],
    config: &SiteConfig,
    output: &Path,
    options: &GenerateOptions,
    pages: &mut Vec<String>,
) -> Result<(), GenerateError> {
    let css = render::stylesheet(config);
    for doc in sections.iter().flat_map(|s| &s.documents) {
        options.check_cancelled()?;
        let html = render::render_page(doc, sections, config, &css);
        write_atomic(&output_file(output, &doc.output_path)?, html.as_bytes())?;
        debug!(path = %doc.output_path, "wrote page");
        pages.push(doc.output_path.clone());
    }
    Ok(())
}

/// Re-render the first document of the first section as `index.html`.
///
/// Skipped when there is nothing to render or a root `index.md` already
/// produced the home page (see "Root `index.md`" in DESIGN.md).
fn write_home_page(
    sections: &[Section],
    config: &SiteConfig,
    output: &Path,
    pages: &[String],
) -> Result<Option<String>, GenerateError> {
    if pages.iter().any(|p| p == HOME_PAGE) {
        info!("{HOME_PAGE} comes from a root document, not synthesizing one");
        return Ok(None);
    }
    let Some(first) = sections.first().and_then(|s| s.documents.first()) else {
        return Ok(None);
    };

    let home = first.relocated(HOME_PAGE);
    let html = render::render_page(&home, sections, config, &render::stylesheet(config));
    write_atomic(&output.join(HOME_PAGE), html.as_bytes())?;
    info!(source = %first.output_path, "wrote home page");
    Ok(Some(HOME_PAGE.to_string()))
}

fn write_publish_files(
    report: &GenerateReport,
    config: &SiteConfig,
    output: &Path,
) -> Result<Vec<String>, GenerateError> {
    let mut written = Vec::new();
    let domain = config.full_domain();

    if config.publish.sitemap {
        let xml = sitemap::sitemap_xml(&report.html_paths(), &domain);
        write_atomic(&output.join(sitemap::SITEMAP_FILENAME), xml.as_bytes())?;
        written.push(sitemap::SITEMAP_FILENAME.to_string());
    }
    if config.publish.cname {
        write_atomic(
            &output.join(sitemap::CNAME_FILENAME),
            sitemap::cname(&domain).as_bytes(),
        )?;
        written.push(sitemap::CNAME_FILENAME.to_string());
    }
    Ok(written)
}

fn document_count(sections: &[Section]) -> usize {
    sections.iter().map(|s| s.documents.len()).sum()
}

fn create_dir(dir: &Path) -> Result<(), GenerateError> {
    fs::create_dir_all(dir).map_err(|source| GenerateError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

/// Join a document's output path onto the output root. Only plain relative
/// paths are accepted, so nothing is written outside `output`.
fn output_file(output: &Path, relative: &str) -> Result<PathBuf, GenerateError> {
    let path = Path::new(relative);
    let plain = path.components().all(|c| matches!(c, Component::Normal(_)));
    if relative.is_empty() || !plain {
        return Err(GenerateError::UnsafeOutputPath(relative.to_string()));
    }
    Ok(output.join(path))
}

/// Write `contents` to `path` via a sibling temp file and rename.
///
/// The temp file is created owner-only; it is widened to `0644` (or to the
/// mode of the file being replaced) before the rename.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), GenerateError> {
    let wrap = |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    let parent = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent).map_err(wrap)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(wrap)?;
    tmp.write_all(contents).map_err(wrap)?;
    set_page_permissions(tmp.as_file(), path).map_err(wrap)?;
    tmp.persist(path).map_err(|e| wrap(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn set_page_permissions(file: &fs::File, destination: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = match fs::metadata(destination) {
        Ok(existing) => existing.permissions(),
        Err(_) => fs::Permissions::from_mode(0o644),
    };
    file.set_permissions(permissions)
}

#[cfg(not(unix))]
fn set_page_permissions(_file: &fs::File, _destination: &Path) -> std::io::Result<()> {
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
