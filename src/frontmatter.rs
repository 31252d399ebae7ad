//! Frontmatter detection and parsing.
//!
//! A document may open with a YAML block fenced by two lines that contain
//! only `---`:
//!
//! ```text
//! ---
//! title: Getting Started
//! date: 2024-03-05
//! ---
//! # Body starts here
//! ```
//!
//! Only `title` and `date` are read. Both accept any YAML scalar and keep it
//! as text; other keys are ignored. A block that is not valid YAML is still
//! stripped from the body, and the document continues as if it had no
//! frontmatter, with a warning attached to the result.

use serde::{Deserialize, Deserializer};

const DELIMITER: &str = "---";

/// Recognized frontmatter keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,
    /// Raw date text. Interpreted by the parser as `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "scalar_text")]
    pub date: Option<String>,
}

/// Result of splitting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'a> {
    pub frontmatter: Frontmatter,
    /// Content after the frontmatter block (the whole input if there was none).
    pub body: &'a str,
    /// Set when a block was found but could not be parsed.
    pub warning: Option<String>,
}

/// Split a document into frontmatter and markdown body.
pub fn split(content: &str) -> Split<'_> {
    let Some((yaml, body)) = find_block(content) else {
        return Split {
            frontmatter: Frontmatter::default(),
            body: content,
            warning: None,
        };
    };

    match parse_block(yaml) {
        Ok(frontmatter) => Split {
            frontmatter,
            body,
            warning: None,
        },
        Err(e) => Split {
            frontmatter: Frontmatter::default(),
            body,
            warning: Some(e.to_string()),
        },
    }
}

/// Locate the fenced block at the very start of `content`.
///
/// Returns the text between the fences and the remainder after the closing
/// fence line. Trailing whitespace on fence lines is tolerated, so CRLF files
/// work.
fn find_block(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

fn parse_block(yaml: &str) -> Result<Frontmatter, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(yaml)
}

/// Accept strings, numbers and booleans as text; treat anything else as absent.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
