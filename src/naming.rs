//! Name conventions shared by the scanner and the parser.
//!
//! Three derivations turn filesystem names and heading text into the strings
//! the site uses:
//!
//! - **Display titles** for section directories and untitled documents:
//!   `getting-started` → "Getting Started", `my_first_post` → "My First Post".
//! - **URL slugs** for section output directories:
//!   `Getting Started` → `getting-started`, `C++ Notes` → `c-notes`.
//! - **Anchor ids** for headings and TOC links:
//!   `Hello, World!` → `hello-world`.

/// Fallback title when a filename yields no words.
pub const UNTITLED: &str = "Untitled";

/// Split a name on `-` and `_`, capitalize each word, join with spaces.
///
/// Only the first character of each word is changed; the rest is kept as-is.
/// Empty words (from doubled or leading separators) are dropped.
///
/// - `"getting-started"` → `"Getting Started"`
/// - `"my_first-post"` → `"My First Post"`
/// - `"API-reference"` → `"API Reference"`
/// - `"--"` → `""`
pub fn display_title(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title for a document without a frontmatter title, from its file stem.
///
/// Falls back to [`UNTITLED`] when the stem has no words.
pub fn title_from_stem(stem: &str) -> String {
    let title = display_title(stem);
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// URL-safe directory name for a section.
///
/// Lowercases, replaces each run of whitespace with a single `-`, then drops
/// every character outside `[a-z0-9-]`.
///
/// - `"Getting Started"` → `"getting-started"`
/// - `"C++ Notes"` → `"c-notes"`
/// - `"Café"` → `"caf"`
pub fn url_slug(name: &str) -> String {
    hyphenate_whitespace(&name.to_lowercase())
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Fragment id for a heading.
///
/// Lowercases, drops every character outside `[a-z0-9]`, whitespace and `-`,
/// then replaces each run of whitespace with a single `-`. Ids are not
/// de-duplicated: two identical headings produce the same id.
///
/// - `"Hello, World!"` → `"hello-world"`
/// - `"Step 2 - Install"` → `"step-2---install"`
pub fn anchor_id(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_ascii_whitespace() || *c == '-'
        })
        .collect();
    hyphenate_whitespace(&kept)
}

fn hyphenate_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_dashes() {
        assert_eq!(display_title("getting-started"), "Getting Started");
    }

    #[test]
    fn display_title_underscores_and_dashes() {
        assert_eq!(display_title("my_first-post"), "My First Post");
    }

    #[test]
    fn display_title_keeps_rest_of_word() {
        assert_eq!(display_title("API-reference"), "API Reference");
        assert_eq!(display_title("iOS_tips"), "IOS Tips");
    }

    #[test]
    fn display_title_skips_empty_words() {
        assert_eq!(display_title("-a--b-"), "A B");
        assert_eq!(display_title("--"), "");
    }

    #[test]
    fn title_from_stem_matches_filename_rule() {
        assert_eq!(title_from_stem("my-first-post"), "My First Post");
    }

    #[test]
    fn title_from_stem_untitled() {
        assert_eq!(title_from_stem("_"), "Untitled");
        assert_eq!(title_from_stem(""), "Untitled");
    }

    #[test]
    fn display_title_non_ascii() {
        assert_eq!(display_title("été-notes"), "Été Notes");
    }

    #[test]
    fn url_slug_spaces() {
        assert_eq!(url_slug("Getting Started"), "getting-started");
        assert_eq!(url_slug("a  \t b"), "a-b");
    }

    #[test]
    fn url_slug_strips_symbols() {
        assert_eq!(url_slug("C++ Notes"), "c-notes");
        assert_eq!(url_slug("my_dir"), "mydir");
        assert_eq!(url_slug("Café"), "caf");
    }

    #[test]
    fn url_slug_plain() {
        assert_eq!(url_slug("guides"), "guides");
        assert_eq!(url_slug("2024-log"), "2024-log");
    }

    #[test]
    fn anchor_id_punctuation() {
        assert_eq!(anchor_id("Hello, World!"), "hello-world");
    }

    #[test]
    fn anchor_id_keeps_hyphens_and_digits() {
        assert_eq!(anchor_id("Step 2 - Install"), "step-2---install");
        assert_eq!(anchor_id("pre-flight"), "pre-flight");
    }

    #[test]
    fn anchor_id_collapses_whitespace() {
        assert_eq!(anchor_id("a   b\tc"), "a-b-c");
    }

    #[test]
    fn anchor_id_all_symbols_is_empty() {
        assert_eq!(anchor_id("?!"), "");
    }
}
