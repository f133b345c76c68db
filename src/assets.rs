//! Content-addressed static asset cache for the cached-URL strategy.
//!
//! Instead of inlining every image into the payload, the preparer can
//! register each decoded image with an [`AssetCache`] and hand the viewer a
//! short URL instead. The cache is keyed by an identifier derived from the
//! pixel fingerprint and the viewer's instance key, so the same picture
//! shown by the same viewer always maps to the same URL.
//!
//! # Identifiers
//!
//! ```text
//! imageviewer-<sha256 of decoded pixels>-<instance key | "none">
//! ```
//!
//! Characters outside `[A-Za-z0-9._-]` in the instance key are replaced with
//! `_` so an identifier is always a single safe path component.
//!
//! # Disk layout
//!
//! [`DiskAssetCache`] stores one RGB PNG per identifier directly under its
//! root and serves it at `<url_prefix>/<id>.png`. A file that already exists
//! is a cache hit and is never rewritten; there is no eviction.
//!
//! Assets are written to a dot-prefixed temp file in the root and renamed
//! into place, so `<id>.png` only ever exists fully written.

use image::{DynamicImage, ImageFormat};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// URL prefix assets are served under unless configured otherwise.
pub const DEFAULT_URL_PREFIX: &str = "/media";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid asset identifier: {0:?}")]
    InvalidId(String),
    #[error("Failed to store asset {id}: {reason}")]
    Store { id: String, reason: String },
}

/// Static-asset store that turns an image into a URL.
pub trait AssetCache {
    /// Store `image` under `id` (or reuse what is already stored) and return
    /// the URL it is served at.
    fn register(&mut self, id: &str, image: &DynamicImage) -> Result<String, AssetError>;
}

/// Build the cache identifier for a pixel fingerprint and optional instance key.
pub fn asset_id(fingerprint: &str, key: Option<&str>) -> String {
    let key = key.map(sanitize).unwrap_or_else(|| "none".to_string());
    format!("imageviewer-{fingerprint}-{key}")
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if is_safe(c) { c } else { '_' })
        .collect()
}

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.starts_with('.') && id.chars().all(is_safe)
}

/// Asset cache backed by a directory of PNG files.
#[derive(Debug)]
pub struct DiskAssetCache {
    root: PathBuf,
    url_prefix: String,
    stats: CacheStats,
}

impl DiskAssetCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_url_prefix(root, DEFAULT_URL_PREFIX)
    }

    pub fn with_url_prefix(root: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            stats: CacheStats::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// On-disk location of the asset stored under `id`.
    pub fn asset_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.png"))
    }
}

impl AssetCache for DiskAssetCache {
    fn register(&mut self, id: &str, image: &DynamicImage) -> Result<String, AssetError> {
        if !is_valid_id(id) {
            return Err(AssetError::InvalidId(id.to_string()));
        }
        let path = self.asset_path(id);
        if path.exists() {
            tracing::debug!(id, "asset cache hit");
            self.stats.hit();
        } else {
            std::fs::create_dir_all(&self.root)?;
            let tmp = self.root.join(format!(".{id}.png.tmp"));
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            if let Err(e) = rgb.save_with_format(&tmp, ImageFormat::Png) {
                let _ = std::fs::remove_file(&tmp);
                return Err(AssetError::Store {
                    id: id.to_string(),
                    reason: e.to_string(),
                });
            }
            std::fs::rename(&tmp, &path)?;
            tracing::debug!(id, path = %path.display(), "asset stored");
            self.stats.store();
        }
        Ok(format!("{}/{id}.png", self.url_prefix))
    }
}

/// Summary of asset cache activity for one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub stored: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn store(&mut self) {
        self.stored += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.stored
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} stored ({} total)",
                self.hits,
                self.stored,
                self.total()
            )
        } else {
            write!(f, "{} stored", self.stored)
        }
    }
}
