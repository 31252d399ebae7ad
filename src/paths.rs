//! Relative link arithmetic between output paths.
//!
//! Output paths are forward-slash separated and relative to the output root
//! (`index.html`, `guides/setup.html`). Every link the site emits is
//! relative, so the generated tree can be served from any base URL or opened
//! straight from disk.
//!
//! The site is at most one directory deep, so [`relative_link`] does not look
//! for a common ancestor: between two different directories it climbs to the
//! root and descends again.

/// Prefix that leads from the directory of `path` back to the output root.
///
/// One `../` per separator in `path`:
///
/// - `"index.html"` → `""`
/// - `"guides/setup.html"` → `"../"`
/// - `"a/b/c.html"` → `"../../"`
pub fn path_to_root(path: &str) -> String {
    "../".repeat(path.matches('/').count())
}

/// Href for a link placed on the page at `from` pointing at the page at `to`.
///
/// - same directory → bare filename of `to`
/// - root → nested: `to` unchanged
/// - nested → root: `"../" + to`
/// - nested → other nested: climb to root, then `to`
pub fn relative_link(from: &str, to: &str) -> String {
    let from_dir = dir_part(from);
    let to_dir = dir_part(to);

    if from_dir == to_dir {
        return file_part(to).to_string();
    }
    if from_dir.is_empty() {
        return to.to_string();
    }
    if to_dir.is_empty() {
        return format!("../{to}");
    }
    format!("{}{to}", path_to_root(from))
}

fn dir_part(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

fn file_part(path: &str) -> &str {
    path.rsplit_once('/').map(|(_, file)| file).unwrap_or(path)
}
