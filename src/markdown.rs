//! Markdown to HTML with heading anchors and a table of contents.
//!
//! Rendering goes through pulldown-cmark with tables, strikethrough, task
//! lists and footnotes enabled. Two passes run over the event stream before
//! it is turned into HTML:
//!
//! 1. **Autolinking**: bare `http://`, `https://` and `www.` URLs in plain
//!    text become links. Text inside code, existing links (markdown or
//!    inline `<a>` HTML) and images is left alone.
//! 2. **Heading ids**: every heading gets an `id` derived from its plain text
//!    with [`naming::anchor_id`]. Level 2 and 3 headings are also collected
//!    into the table of contents, in document order.

use crate::naming;
use crate::types::TocEntry;
use pulldown_cmark::{
    CowStr, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html,
};

/// Rendered HTML and its table of contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<TocEntry>,
}

/// Heading levels that appear in the table of contents.
const TOC_LEVELS: [u8; 2] = [2, 3];

const URL_PREFIXES: [&str; 3] = ["https://", "http://", "www."];

/// Characters that end a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '!', '?', '\'', '"', '*', '_', '~'];

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

/// Render a markdown body (frontmatter already stripped).
pub fn render(markdown: &str) -> Rendered {
    let parser = TextMergeStream::new(Parser::new_ext(markdown, options()));
    let events = autolink(parser);
    let (events, toc) = assign_heading_ids(events);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    Rendered { html: out, toc }
}

// ============================================================================
// Heading ids and TOC
// ============================================================================

fn assign_heading_ids(mut events: Vec<Event<'_>>) -> (Vec<Event<'_>>, Vec<TocEntry>) {
    let mut toc = Vec::new();
    let mut open: Option<(usize, String)> = None;

    for i in 0..events.len() {
        let closed_level = match &events[i] {
            Event::Start(Tag::Heading { .. }) => {
                open = Some((i, String::new()));
                None
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, heading_text)) = open.as_mut() {
                    heading_text.push_str(text);
                }
                None
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, heading_text)) = open.as_mut() {
                    heading_text.push(' ');
                }
                None
            }
            Event::End(TagEnd::Heading(level)) => Some(*level),
            _ => None,
        };

        let Some(level) = closed_level else { continue };
        let Some((start, text)) = open.take() else {
            continue;
        };

        let text = text.trim().to_string();
        let id = naming::anchor_id(&text);
        if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[start] {
            *slot = (!id.is_empty()).then(|| CowStr::from(id.clone()));
        }

        let level = heading_number(level);
        if TOC_LEVELS.contains(&level) {
            toc.push(TocEntry { id, text, level });
        }
    }

    (events, toc)
}

fn heading_number(level: HeadingLevel) -> u8 {
    level as u8
}

// ============================================================================
// Bare URL autolinking
// ============================================================================

fn autolink<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut link_depth = 0usize;
    let mut in_code_block = false;

    for event in events {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. }) => link_depth += 1,
            Event::End(TagEnd::Link | TagEnd::Image) => {
                link_depth = link_depth.saturating_sub(1);
            }
            Event::InlineHtml(tag) if opens_anchor(tag) => link_depth += 1,
            Event::InlineHtml(tag) if closes_anchor(tag) => {
                link_depth = link_depth.saturating_sub(1);
            }
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) if link_depth == 0 && !in_code_block => {
                if let Some(linked) = linkify(text) {
                    out.extend(linked);
                    continue;
                }
            }
            _ => {}
        }
        out.push(event);
    }
    out
}

fn opens_anchor(tag: &str) -> bool {
    let tag = tag.trim_start().to_ascii_lowercase();
    tag.starts_with("<a>") || tag.starts_with("<a ") || tag.starts_with("<a\n")
}

fn closes_anchor(tag: &str) -> bool {
    tag.trim().eq_ignore_ascii_case("</a>")
}

/// Split `text` around the URLs it contains. `None` when there are none.
fn linkify<'a>(text: &str) -> Option<Vec<Event<'a>>> {
    let mut events = Vec::new();
    let mut rest = text;

    while let Some((start, len)) = find_url(rest) {
        let (before, from_url) = rest.split_at(start);
        let url = &from_url[..len];
        if !before.is_empty() {
            events.push(Event::Text(CowStr::from(before.to_string())));
        }
        let href = if url.starts_with("www.") {
            format!("http://{url}")
        } else {
            url.to_string()
        };
        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(href),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        events.push(Event::Text(CowStr::from(url.to_string())));
        events.push(Event::End(TagEnd::Link));
        rest = &from_url[len..];
    }

    if events.is_empty() {
        return None;
    }
    if !rest.is_empty() {
        events.push(Event::Text(CowStr::from(rest.to_string())));
    }
    Some(events)
}

/// Byte offset and length of the first URL in `text`.
fn find_url(text: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while from < text.len() {
        let (start, prefix) = URL_PREFIXES
            .iter()
            .filter_map(|p| text[from..].find(p).map(|i| (from + i, *p)))
            .min_by_key(|(i, _)| *i)?;

        let at_boundary = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric() && !matches!(c, '/' | '.' | '-' | '@'));
        let len = url_len(&text[start..]);
        if at_boundary && len > prefix.len() {
            return Some((start, len));
        }
        from = start + prefix.len();
    }
    None
}

/// Length of the URL at the start of `text`, without trailing punctuation.
fn url_len(text: &str) -> usize {
    let end = text
        .find(|c: char| c.is_whitespace() || c == '<')
        .unwrap_or(text.len());
    let mut url = &text[..end];

    loop {
        if let Some(stripped) = url.strip_suffix(TRAILING_PUNCTUATION) {
            url = stripped;
        } else if url.ends_with(')') && url.matches(')').count() > url.matches('(').count() {
            url = &url[..url.len() - 1];
        } else {
            break;
        }
    }
    url.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toc_ids(rendered: &Rendered) -> Vec<&str> {
        rendered.toc.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn renders_basic_markdown() {
        let rendered = render("This is **bold** and *italic*.");
        assert!(rendered.html.contains("<strong>bold</strong>"));
        assert!(rendered.html.contains("<em>italic</em>"));
    }

    #[test]
    fn renders_tables() {
        let rendered = render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(rendered.html.contains("<table>"));
        assert!(rendered.html.contains("<td>1</td>"));
    }

    #[test]
    fn headings_get_ids() {
        let rendered = render("# Top\n\n## Hello, World!\n\n#### Deep\n");
        assert!(rendered.html.contains(r#"<h1 id="top">Top</h1>"#));
        assert!(rendered.html.contains(r#"<h2 id="hello-world">Hello, World!</h2>"#));
        assert!(rendered.html.contains(r#"<h4 id="deep">Deep</h4>"#));
    }

    #[test]
    fn toc_keeps_only_levels_two_and_three() {
        let rendered = render("# One\n## Two\n### Three\n#### Four\n## Again\n");
        assert_eq!(toc_ids(&rendered), vec!["two", "three", "again"]);
        let levels: Vec<u8> = rendered.toc.iter().map(|t| t.level).collect();
        assert_eq!(levels, vec![2, 3, 2]);
    }

    #[test]
    fn toc_text_is_plain() {
        let rendered = render("## Using `cargo` **fast**\n");
        assert_eq!(rendered.toc[0].text, "Using cargo fast");
        assert_eq!(rendered.toc[0].id, "using-cargo-fast");
    }

    #[test]
    fn setext_headings_in_toc() {
        let rendered = render("Section\n-------\n\ntext\n");
        assert_eq!(toc_ids(&rendered), vec!["section"]);
    }

    #[test]
    fn duplicate_headings_share_id() {
        let rendered = render("## FAQ\n\n## FAQ\n");
        assert_eq!(toc_ids(&rendered), vec!["faq", "faq"]);
    }

    #[test]
    fn heading_without_id_characters_has_no_id() {
        let rendered = render("## ???\n");
        assert!(rendered.html.contains("<h2>???</h2>"));
        assert_eq!(rendered.toc[0].id, "");
    }

    #[test]
    fn no_headings_empty_toc() {
        let rendered = render("just a paragraph\n");
        assert!(rendered.toc.is_empty());
    }

    #[test]
    fn bare_url_becomes_link() {
        let rendered = render("See https://example.com/docs for more.");
        assert!(
            rendered
                .html
                .contains(r#"<a href="https://example.com/docs">https://example.com/docs</a>"#)
        );
        assert!(rendered.html.contains(" for more."));
    }

    #[test]
    fn www_url_gets_scheme() {
        let rendered = render("Visit www.rust-lang.org.");
        assert!(
            rendered
                .html
                .contains(r#"<a href="http://www.rust-lang.org">www.rust-lang.org</a>."#)
        );
    }

    #[test]
    fn url_with_underscores_stays_whole() {
        let rendered = render("Go to https://example.com/a_b_c now");
        assert!(rendered.html.contains(r#"href="https://example.com/a_b_c""#));
    }

    #[test]
    fn trailing_paren_not_in_link() {
        let rendered = render("(see https://example.com/x)");
        assert!(rendered.html.contains(r#"href="https://example.com/x""#));
        assert!(rendered.html.contains("</a>)"));
    }

    #[test]
    fn balanced_paren_kept_in_link() {
        let rendered = render("https://en.wikipedia.org/wiki/Rust_(language)");
        assert!(
            rendered
                .html
                .contains(r#"href="https://en.wikipedia.org/wiki/Rust_(language)""#)
        );
    }

    #[test]
    fn existing_links_untouched() {
        let rendered = render("[https://a.com](https://b.com)");
        assert_eq!(rendered.html.matches("<a ").count(), 1);
        assert!(rendered.html.contains(r#"href="https://b.com""#));
    }

    #[test]
    fn inline_html_anchor_text_untouched() {
        let rendered = render(r#"Go <a href="https://b.com">https://a.com</a> now"#);
        assert_eq!(rendered.html.matches("<a ").count(), 1);
        assert!(rendered.html.contains(r#"<a href="https://b.com">https://a.com</a>"#));
    }

    #[test]
    fn linking_resumes_after_inline_anchor() {
        let rendered = render(r#"<A HREF="x">www.a.com</A> and https://c.com"#);
        assert!(rendered.html.contains(r#"<A HREF="x">www.a.com</A>"#));
        assert!(rendered.html.contains(r#"<a href="https://c.com">https://c.com</a>"#));
        assert_eq!(rendered.html.matches("<a href=").count(), 1);
    }

    #[test]
    fn other_inline_html_does_not_suppress_links() {
        let rendered = render("<abbr>x</abbr> https://a.com");
        assert!(rendered.html.contains(r#"<a href="https://a.com">"#));
    }

    #[test]
    fn code_not_autolinked() {
        let rendered = render("`https://a.com`\n\n```\nhttps://b.com\n```\n");
        assert!(!rendered.html.contains("<a "));
    }

    #[test]
    fn scheme_alone_is_not_a_link() {
        let rendered = render("the https:// prefix");
        assert!(!rendered.html.contains("<a "));
    }

    #[test]
    fn url_inside_word_not_linked() {
        assert_eq!(find_url("xhttps://a.com"), None);
        assert_eq!(find_url("see https://a.com"), Some((4, 13)));
    }

    #[test]
    fn url_len_strips_punctuation() {
        assert_eq!(url_len("https://a.com."), "https://a.com".len());
        assert_eq!(url_len("https://a.com/?q=1!\"."), "https://a.com/?q=1".len());
        assert_eq!(url_len("https://a.com<br>"), "https://a.com".len());
        assert_eq!(url_len("https://a.com/x_~*"), "https://a.com/x".len());
    }

    #[test]
    fn heading_url_is_linked_and_in_toc() {
        let rendered = render("## Docs at https://a.com\n");
        assert_eq!(rendered.toc[0].text, "Docs at https://a.com");
        assert_eq!(rendered.toc[0].id, "docs-at-httpsacom");
        assert!(rendered.html.contains(r#"<a href="https://a.com">"#));
    }
}
