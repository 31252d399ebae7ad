//! Page rendering.
//!
//! Builds one complete HTML page from a parsed [`Document`], the final
//! ordered section list and the site config. Rendering is pure: no file or
//! network access, and the same inputs always give the same bytes.
//!
//! ## Page Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ header: [Notes]        logo → home_url     Tutorials │
//! ├────────────┬──────────────────────────┬──────────────┤
//! │ sidebar    │ h1 title                 │ toc          │
//! │ ▸ Section  │ date                     │  Heading 2   │
//! │ ▾ Section  │                          │    Heading 3 │
//! │   ┃ Doc    │ body HTML                │              │
//! │     Doc    │                          │              │
//! └────────────┴──────────────────────────┴──────────────┘
//! ```
//!
//! On narrow screens the sidebar becomes a slide-in drawer toggled by the
//! "Notes" label. The toggle is a hidden checkbox, so no JavaScript is needed.
//!
//! ## Links
//!
//! Every href is relative (see [`crate::paths`]), so the output directory can
//! be served from any prefix or opened straight from disk.

use crate::config::{self, SiteConfig};
use crate::paths::{path_to_root, relative_link};
use crate::types::{Document, Section, TocEntry};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Output path of the synthesized home page.
pub const HOME_PAGE: &str = "index.html";

/// Page date format: "March 05, 2024".
const DATE_FORMAT: &str = "%B %d, %Y";

const CSS_STATIC: &str = include_str!("../static/style.css");

/// The full stylesheet: config colors followed by the static rules.
pub fn stylesheet(config: &SiteConfig) -> String {
    let color_css = config::generate_color_css(&config.colors);
    format!("{}\n\n{}", color_css, CSS_STATIC)
}

/// Render a complete page for `doc`.
///
/// `css` is the output of [`stylesheet`], computed once per run.
pub fn render_page(doc: &Document, sections: &[Section], config: &SiteConfig, css: &str) -> String {
    let root = path_to_root(&doc.output_path);
    let title = format!("{} | {}", doc.title, config.site_name);

    let content = html! {
        div.page-wrapper {
            div.container {
                input type="checkbox" id="menu-toggle" class="menu-toggle";
                (site_header(config, &root))
                label.overlay for="menu-toggle" {}
                (render_sidebar(doc, sections))
                (render_main(doc))
                (render_toc(&doc.toc))
            }
        }
    };

    base_document(&title, &format!("{root}{}", config.favicon_path), css, content).into_string()
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, favicon: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="icon" type="image/png" href=(favicon);
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the fixed header: drawer toggle, logo and tutorials link
fn site_header(config: &SiteConfig, root: &str) -> Markup {
    html! {
        header.header {
            label.menu-toggle-label for="menu-toggle" { "Notes" }
            div.logo {
                a href=(config.home_url) {
                    img src={ (root) (config.logo_path) } alt={ (config.site_name) " Logo" };
                }
            }
            a.tutorials-link href=(config.tutorials_url) target="_blank" rel="noopener" {
                "Tutorials"
            }
        }
    }
}

/// Renders the navigation sidebar, one collapsible group per section.
///
/// A group is open when it holds the current document. The home page also
/// opens the first group.
pub fn render_sidebar(doc: &Document, sections: &[Section]) -> Markup {
    let is_home = doc.output_path == HOME_PAGE;

    html! {
        nav.sidebar {
            @for (i, section) in sections.iter().enumerate() {
                @let is_open = section.contains(doc) || (is_home && i == 0);
                div.sidebar-section {
                    details open[is_open] {
                        summary.sidebar-title { (section.title) }
                        ul.note-list {
                            @for other in &section.documents {
                                @let is_active = other.source_path == doc.source_path;
                                li.note-item {
                                    a.note-link.active[is_active]
                                        href=(relative_link(&doc.output_path, &other.output_path)) {
                                        (other.title)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_main(doc: &Document) -> Markup {
    html! {
        main.main-content {
            div.content-header {
                h1.page-title { (doc.title) }
                @if let Some(date) = doc.date {
                    div.page-meta { (date.format(DATE_FORMAT).to_string()) }
                }
            }
            div.content-body {
                (PreEscaped(&doc.html))
            }
        }
    }
}

/// Renders the table of contents aside. Empty when there are no entries.
pub fn render_toc(toc: &[TocEntry]) -> Markup {
    html! {
        aside.toc {
            @if !toc.is_empty() {
                ul.toc-list {
                    @for entry in toc {
                        li.toc-item {
                            a class={ "toc-link " (entry.level_class()) } href={ "#" (entry.id) } {
                                (entry.text)
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
