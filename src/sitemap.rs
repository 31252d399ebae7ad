//! `sitemap.xml` and `CNAME` contents.
//!
//! Both are pure formatting over the list of written page paths and the
//! site's full domain. The orchestrator decides whether to write them based
//! on `[publish]` in the config.

use tracing::debug;

pub const SITEMAP_FILENAME: &str = "sitemap.xml";
pub const CNAME_FILENAME: &str = "CNAME";

/// Build a sitemap listing every page under `https://<full_domain>/`.
///
/// `index.html` is listed first as the bare domain root. The remaining paths
/// are sorted so the output does not depend on write order.
pub fn sitemap_xml<S: AsRef<str>>(paths: &[S], full_domain: &str) -> String {
    let base = format!("https://{}", full_domain.trim_end_matches('/'));

    let mut sorted: Vec<&str> = paths.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    sorted.dedup();
    debug!(count = sorted.len(), "generating sitemap");

    let has_home = sorted.contains(&"index.html");
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    if has_home {
        xml.push_str(&url_entry(&format!("{base}/")));
    }
    for path in sorted.iter().filter(|p| **p != "index.html") {
        xml.push_str(&url_entry(&format!("{base}/{path}")));
    }

    xml.push_str("</urlset>\n");
    xml
}

fn url_entry(loc: &str) -> String {
    format!("  <url>\n    <loc>{}</loc>\n  </url>\n", escape_xml(loc))
}

/// Contents of a `CNAME` file: the domain and a newline.
pub fn cname(full_domain: &str) -> String {
    format!("{full_domain}\n")
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
