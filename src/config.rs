//! Site configuration.
//!
//! Handles loading and validating the optional `config.toml` in the content
//! root. Stock defaults are serialized to a TOML table and the user's file is
//! merged over them, so a config file only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_name = "JRXNA"
//! domain = "jrxna.com"
//! subdomain = "mongoose"
//! logo_path = "assets/images/JRXNALogoSmall.png"
//! favicon_path = "assets/images/JRXNAFavicon.png"
//! home_url = "https://jrxna.com"
//! tutorials_url = "https://youtube.com/@jrxna"
//!
//! [colors]
//! primary = "#0071C5"
//! background = "#0a0e17"
//! text = "#f5f6fa"
//! text_muted = "#b0b3b8"
//! border = "#2a2f3e"
//!
//! [publish]
//! sitemap = true
//! cname = true
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// Name of the config file looked up in the content root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site-wide settings, read once and passed by reference to the renderer
/// and the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Shown after the page title in `<title>`.
    pub site_name: String,
    /// Canonical domain, used for the sitemap and `CNAME`.
    pub domain: String,
    /// Optional subdomain prefixed to `domain`. Empty for an apex site.
    pub subdomain: String,
    /// Logo image, relative to both the content root and the output root.
    pub logo_path: String,
    /// Favicon image, relative to both the content root and the output root.
    pub favicon_path: String,
    /// Target of the header logo link.
    pub home_url: String,
    /// Target of the header "Tutorials" link.
    pub tutorials_url: String,
    /// Theme colors, emitted as CSS custom properties.
    pub colors: ColorConfig,
    /// Extra files written next to the pages.
    pub publish: PublishConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "JRXNA".to_string(),
            domain: "jrxna.com".to_string(),
            subdomain: "mongoose".to_string(),
            logo_path: "assets/images/JRXNALogoSmall.png".to_string(),
            favicon_path: "assets/images/JRXNAFavicon.png".to_string(),
            home_url: "https://jrxna.com".to_string(),
            tutorials_url: "https://youtube.com/@jrxna".to_string(),
            colors: ColorConfig::default(),
            publish: PublishConfig::default(),
        }
    }
}

impl SiteConfig {
    /// `subdomain.domain`, or just `domain` when no subdomain is set.
    pub fn full_domain(&self) -> String {
        if self.subdomain.is_empty() {
            self.domain.clone()
        } else {
            format!("{}.{}", self.subdomain, self.domain)
        }
    }

    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_name must not be empty".into(),
            ));
        }
        for (key, value) in [
            ("logo_path", &self.logo_path),
            ("favicon_path", &self.favicon_path),
        ] {
            if !is_plain_relative(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a relative path inside the site: {value:?}"
                )));
            }
        }
        if (self.publish.sitemap || self.publish.cname) && self.domain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "domain must be set when publish.sitemap or publish.cname is enabled".into(),
            ));
        }
        Ok(())
    }
}

fn is_plain_relative(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Theme colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Accent color: titles, links on hover, the open sidebar group.
    pub primary: String,
    /// Page background.
    pub background: String,
    /// Primary text color.
    pub text: String,
    /// Dates and TOC links.
    pub text_muted: String,
    /// Column and header borders.
    pub border: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            primary: "#0071C5".to_string(),
            background: "#0a0e17".to_string(),
            text: "#f5f6fa".to_string(),
            text_muted: "#b0b3b8".to_string(),
            border: "#2a2f3e".to_string(),
        }
    }
}

/// Switches for the files written alongside the pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    /// Write `sitemap.xml` listing every page under `https://<full domain>/`.
    pub sitemap: bool,
    /// Write a `CNAME` file holding the full domain.
    pub cname: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            sitemap: true,
            cname: true,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the site config for a content root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value()?, load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Printed by `mongoose --print-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Mongoose Configuration
# ======================
# Place this file at the root of the content directory as config.toml.
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Shown after every page title: "<page title> | <site_name>".
site_name = "JRXNA"

# Canonical domain. The site is published at <subdomain>.<domain>,
# or at <domain> when subdomain is empty.
domain = "jrxna.com"
subdomain = "mongoose"

# Images, relative to the content root. They are copied to the same
# relative location in the output directory.
logo_path = "assets/images/JRXNALogoSmall.png"
favicon_path = "assets/images/JRXNAFavicon.png"

# Header links.
home_url = "https://jrxna.com"
tutorials_url = "https://youtube.com/@jrxna"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
primary = "#0071C5"
background = "#0a0e17"
text = "#f5f6fa"
text_muted = "#b0b3b8"    # Dates, table of contents
border = "#2a2f3e"

# ---------------------------------------------------------------------------
# Extra output files
# ---------------------------------------------------------------------------
[publish]
sitemap = true            # sitemap.xml for the full domain
cname = true              # CNAME file for static hosting
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --primary: {primary};
    --bg-primary: {background};
    --text-primary: {text};
    --text-muted: {text_muted};
    --border: {border};
}}"#,
        primary = colors.primary,
        background = colors.background,
        text = colors.text,
        text_muted = colors.text_muted,
        border = colors.border,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.site_name, "JRXNA");
        assert_eq!(config.favicon_path, "assets/images/JRXNAFavicon.png");
        assert!(config.publish.sitemap);
    }

    #[test]
    fn full_domain_with_subdomain() {
        assert_eq!(SiteConfig::default().full_domain(), "mongoose.jrxna.com");
    }

    #[test]
    fn full_domain_without_subdomain() {
        let config = SiteConfig {
            subdomain: String::new(),
            ..SiteConfig::default()
        };
        assert_eq!(config.full_domain(), "jrxna.com");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
site_name = "Notes"

[colors]
primary = "#ff0000"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site_name, "Notes");
        assert_eq!(config.colors.primary, "#ff0000");
        // Defaults preserved
        assert_eq!(config.colors.background, "#0a0e17");
        assert_eq!(config.domain, "jrxna.com");
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.primary = "#123456".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--primary: #123456"));
        assert!(css.contains("--bg-primary: #0a0e17"));
        assert!(css.contains("--border: #2a2f3e"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
site_name = "Field Notes"
subdomain = ""

[publish]
cname = false
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site_name, "Field Notes");
        assert_eq!(config.full_domain(), "jrxna.com");
        assert!(!config.publish.cname);
        assert!(config.publish.sitemap);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "site_name = [unclosed").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "site_nmae = \"typo\"\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml = "[colors]\naccent = \"#fff\"\n";
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_site_name() {
        let config = SiteConfig {
            site_name: "  ".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_absolute_logo_path() {
        let config = SiteConfig {
            logo_path: "/etc/logo.png".to_string(),
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_parent_dir_favicon_path() {
        let config = SiteConfig {
            favicon_path: "../favicon.png".to_string(),
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_domain_required_for_publish() {
        let mut config = SiteConfig {
            domain: String::new(),
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());

        config.publish.sitemap = false;
        config.publish.cname = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "logo_path = \"/abs.png\"\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[t]\nx = 1\ny = 2").unwrap();
        let overlay: toml::Value = toml::from_str("[t]\ny = 5").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["t"]["x"].as_integer(), Some(1));
        assert_eq!(merged["t"]["y"].as_integer(), Some(5));
    }

    #[test]
    fn stock_defaults_value_is_table() {
        let value = stock_defaults_value().unwrap();
        assert!(value.is_table());
        assert!(value.get("colors").is_some());
        assert!(value.get("publish").is_some());
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }
}
