//! # Mongoose
//!
//! A static site generator for notes and documentation. Your filesystem is
//! the data source: directories become sidebar sections, markdown files become
//! pages, and a small frontmatter block sets each page's title and date.
//!
//! # Architecture: One Sequential Pipeline
//!
//! ```text
//! content/ ──scan──▶ sections ──parse──▶ documents ──sort──▶ final order
//!                                                              │
//!                                   output/ ◀──write── render ─┘
//! ```
//!
//! Scanning only assigns paths. Parsing fills in each document on its own.
//! Sorting fixes the section and document order once, before any page is
//! rendered, because every page embeds the full sidebar. Rendering is a pure
//! function of one document, the section list and the config; all file
//! writes happen in [`generate`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the content root, groups markdown files into sections, assigns output paths |
//! | [`frontmatter`] | Detects and parses the `---` fenced YAML block |
//! | [`markdown`] | Markdown → HTML with heading ids, bare-URL links and TOC extraction |
//! | [`parse`] | Completes a scanned document: title and date defaults, body, TOC |
//! | [`paths`] | Relative links between output paths |
//! | [`render`] | Full HTML page with Maud: head, header, sidebar, body, TOC |
//! | [`generate`] | Orchestrates the run: sort, atomic writes, home page, cancellation |
//! | [`assets`] | Copies the logo and favicon |
//! | [`sitemap`] | `sitemap.xml` and `CNAME` contents |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`naming`] | Title, slug and anchor-id rules |
//! | [`types`] | Shared types (`Section`, `Document`, `TocEntry`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Relative Links Everywhere
//!
//! Every href in a generated page is relative to that page, computed by
//! [`paths::relative_link`]. The output folder works when opened from disk,
//! served from a subpath, or hosted at a domain root, without a base URL
//! setting.
//!
//! ## Dates Drive Order
//!
//! Pages inside a section are listed oldest first, so a section reads like a
//! course. Sections are listed newest first, so recent activity is at the top
//! of the sidebar. Undated documents use the build date, which `--date` can
//! pin for reproducible output.
//!
//! ## Skip, Don't Abort
//!
//! A document that cannot be read is logged and left out; the rest of the
//! site still builds. Failing to write any output file is fatal, and writes
//! go through a temp file and rename, so a failed run never leaves a truncated
//! page behind.

pub mod assets;
pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod parse;
pub mod paths;
pub mod render;
pub mod scan;
pub mod sitemap;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
