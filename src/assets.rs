//! Static asset copy.
//!
//! The logo and favicon are copied byte-for-byte from the content root to the
//! same relative location under the output root, so the paths in the config
//! work for both. With the stock config that is `assets/images/`.
//!
//! A missing source image is not fatal: the page still renders, only the
//! image link is broken, so a warning is logged and the copy is skipped.

use crate::config::SiteConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Copy the configured logo and favicon. Returns the output-relative paths
/// that were copied.
pub fn copy_assets(
    input_root: &Path,
    output_root: &Path,
    config: &SiteConfig,
) -> Result<Vec<String>, AssetError> {
    let mut copied = Vec::new();

    for rel in [&config.logo_path, &config.favicon_path] {
        if copied.contains(rel) {
            continue;
        }
        let from = input_root.join(rel);
        if !from.is_file() {
            warn!(path = %from.display(), "asset not found, skipping");
            continue;
        }
        let to = output_root.join(rel);
        copy_file(&from, &to)?;
        debug!(from = %from.display(), to = %to.display(), "copied asset");
        copied.push(rel.clone());
    }

    Ok(copied)
}

fn copy_file(from: &Path, to: &Path) -> Result<(), AssetError> {
    let wrap = |source| AssetError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::copy(from, to).map_err(wrap)?;
    Ok(())
}
