//! Viewer configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a user config file in the image source directory. The
//! loaded [`ViewerConfig`] is passed explicitly into every prepare call; the
//! crate keeps no global viewer state.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! columns = 2               # Images per grid row
//! rows = 2                  # Grid rows per page
//! show_names = true         # Show file names above images
//! # key = "image_viewer"    # Instance key when several viewers share a page
//!
//! [images]
//! strategy = "inline"       # "inline" (JPEG data URI) or "cached-url"
//! jpeg_quality = 75         # Inline JPEG quality (1-100)
//! cache_dir = ".image-viewer-cache"  # Asset directory for "cached-url"
//! url_prefix = "/media"     # Where cache_dir is served from
//!
//! [scan]
//! extensions = ["jpg", "jpeg", "png"]
//! recursive = false
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::assets::DEFAULT_URL_PREFIX;
use crate::imaging::{Quality, supported_input_extensions};
use crate::layout::LayoutSpec;
use crate::prepare::{Strategy, ViewerOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the source directory.
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

/// Viewer configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Images per grid row.
    pub columns: i64,
    /// Grid rows per page.
    pub rows: i64,
    /// Whether the viewer shows file names.
    pub show_names: bool,
    /// Instance key distinguishing viewers on the same page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Representation settings.
    pub images: ImagesConfig,
    /// Image discovery settings.
    pub scan: ScanConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let options = ViewerOptions::default();
        Self {
            columns: options.columns,
            rows: options.rows,
            show_names: options.show_names,
            key: options.key,
            images: ImagesConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        LayoutSpec::new(self.columns, self.rows)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        if !(1..=100).contains(&self.images.jpeg_quality) {
            return Err(ConfigError::Validation(
                "images.jpeg_quality must be 1-100".into(),
            ));
        }
        if self.images.cache_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "images.cache_dir must not be empty".into(),
            ));
        }
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        let supported = supported_input_extensions();
        for ext in &self.scan.extensions {
            let normalized = ext.trim_start_matches('.').to_ascii_lowercase();
            if !supported.contains(&normalized.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "scan.extensions: no decoder for {ext:?} (supported: {})",
                    supported.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Per-call viewer options described by this config.
    pub fn options(&self) -> ViewerOptions {
        ViewerOptions {
            columns: self.columns,
            rows: self.rows,
            show_names: self.show_names,
            key: self.key.clone(),
        }
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.images.jpeg_quality)
    }
}

/// How images are represented in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    pub strategy: Strategy,
    /// JPEG quality for the inline strategy.
    pub jpeg_quality: u32,
    /// Directory the cached-url strategy writes assets to, relative to the
    /// working directory.
    pub cache_dir: String,
    /// URL path `cache_dir` is served under; asset URLs are emitted
    /// relative to the page, without the leading `/`.
    pub url_prefix: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            jpeg_quality: u32::from(Quality::default().value()),
            cache_dir: ".image-viewer-cache".to_string(),
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
        }
    }
}

/// Which files in the source directory count as images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Case-insensitive file extensions, without the dot.
    pub extensions: Vec<String>,
    /// Descend into subdirectories.
    pub recursive: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
            recursive: false,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(ViewerConfig::default())?)
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
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value and deserialize, without
/// validating.
pub fn merge_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ViewerConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    Ok(merged.try_into()?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ViewerConfig, ConfigError> {
    let config = merge_config(base, overlay)?;
    config.validate()?;
    Ok(config)
}

/// Load `config.toml` from the given directory on top of stock defaults,
/// leaving validation to the caller.
///
/// For callers that apply overrides (such as command-line flags) before
/// calling [`ViewerConfig::validate`].
pub fn load_config_unvalidated(dir: &Path) -> Result<ViewerConfig, ConfigError> {
    let config = merge_config(stock_defaults_value()?, load_raw_config(dir)?)?;
    tracing::debug!(dir = %dir.display(), ?config, "config loaded");
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of stock
/// defaults.
pub fn load_config(dir: &Path) -> Result<ViewerConfig, ConfigError> {
    let config = load_config_unvalidated(dir)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Image Grid Viewer Configuration
# ===============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# Place this file in the image source directory. Command-line flags
# override anything set here.

# Images per grid row (>= 1).
columns = 2

# Grid rows per page (>= 1). A page shows columns x rows images.
rows = 2

# Show each image's file name above it.
show_names = true

# Instance key, needed only when several viewers share one page.
# key = "image_viewer"

# ---------------------------------------------------------------------------
# Representation
# ---------------------------------------------------------------------------
[images]
# "inline"     - re-encode as JPEG and embed as a base64 data URI
# "cached-url" - store an RGB PNG copy in cache_dir and emit its URL
strategy = "inline"

# JPEG quality for the inline strategy (1 = worst, 100 = best).
jpeg_quality = 75

# Asset directory for the cached-url strategy.
cache_dir = ".image-viewer-cache"

# URL path the page serves cache_dir under. Emitted asset URLs are
# "<url_prefix>/<id>.png" without the leading slash, so the web server
# must map this path to cache_dir.
url_prefix = "/media"

# ---------------------------------------------------------------------------
# Image discovery
# ---------------------------------------------------------------------------
[scan]
# File extensions (case-insensitive) picked up from the source directory.
extensions = ["jpg", "jpeg", "png"]

# Also look inside subdirectories.
recursive = false
"##
}
