//! Turning image files into a viewer request.
//!
//! This is the only stage with real logic. Given an ordered list of paths
//! and a set of [`ViewerOptions`], it:
//!
//! 1. validates the layout (before touching the filesystem),
//! 2. decodes each path in order through an [`ImageBackend`],
//! 3. derives a representation, the native size and the display name,
//! 4. returns a [`ViewerRequest`] whose entries line up with the input.
//!
//! ## All-or-nothing
//!
//! The first path that cannot be decoded aborts the whole batch with
//! [`PrepareError::ImageLoad`]. Callers never see a request built from a
//! prefix of their input.
//!
//! ## Representation strategies
//!
//! | [`Strategy`] | Representation | Collaborator |
//! |---|---|---|
//! | `Inline` | `data:image/jpeg;base64,...` | none |
//! | `CachedUrl` | asset URL without leading `/` | [`AssetCache`] |
//!
//! Inline re-encodes every image as JPEG, which drops alpha and the original
//! container format. Cached-URL keeps 8-bit RGB pixels losslessly but depends on
//! whoever serves the cache directory.

use crate::assets::{AssetCache, AssetError, asset_id};
use crate::bridge::BridgePayload;
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, Quality, RustBackend, encode_jpeg, jpeg_data_uri,
    pixel_fingerprint,
};
use crate::layout::{InvalidLayoutError, LayoutSpec};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepareError {
    #[error(transparent)]
    InvalidLayout(#[from] InvalidLayoutError),
    #[error("Failed to load image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("Asset cache rejected {}: {source}", .path.display())]
    AssetCache {
        path: PathBuf,
        #[source]
        source: AssetError,
    },
}

impl PrepareError {
    /// The offending path, for per-image failures.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InvalidLayout(_) => None,
            Self::ImageLoad { path, .. } | Self::AssetCache { path, .. } => Some(path),
        }
    }
}

/// How an image is handed to the rendering layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Base64 JPEG data URI embedded in the payload.
    #[default]
    Inline,
    /// URL of a copy registered with an asset cache.
    CachedUrl,
}

/// Per-call display preferences for one viewer instance.
///
/// `columns` and `rows` are signed so out-of-range input reaches
/// [`LayoutSpec::new`] and is reported rather than wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerOptions {
    pub columns: i64,
    pub rows: i64,
    pub show_names: bool,
    /// Distinguishes several viewers in the same host page.
    pub key: Option<String>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            columns: 2,
            rows: 2,
            show_names: true,
            key: None,
        }
    }
}

/// One prepared image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub representation: String,
    pub size: Dimensions,
    pub display_name: String,
}

/// Everything the viewer component needs, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerRequest {
    pub entries: Vec<ImageEntry>,
    pub layout: LayoutSpec,
    pub show_names: bool,
    pub key: Option<String>,
}

impl ViewerRequest {
    pub fn representations(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.representation.as_str())
            .collect()
    }

    pub fn sizes(&self) -> Vec<(u32, u32)> {
        self.entries
            .iter()
            .map(|e| (e.size.width, e.size.height))
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.display_name.as_str())
            .collect()
    }

    /// Number of grid pages the viewer will show.
    pub fn page_count(&self) -> u64 {
        self.layout.page_count(self.entries.len())
    }

    /// Flatten into the parallel-array shape the component consumes.
    pub fn payload(&self) -> BridgePayload {
        BridgePayload {
            representations: self
                .entries
                .iter()
                .map(|e| e.representation.clone())
                .collect(),
            sizes: self
                .entries
                .iter()
                .map(|e| [e.size.width, e.size.height])
                .collect(),
            names: self
                .entries
                .iter()
                .map(|e| e.display_name.clone())
                .collect(),
            show_names: self.show_names,
            columns: self.layout.columns(),
            rows: self.layout.rows(),
            key: self.key.clone(),
        }
    }
}

/// Final path component, extension included.
///
/// Falls back to the whole path when there is no final component
/// (e.g. `..`).
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Prepare `paths` with the default backend and the inline strategy.
pub fn prepare<P: AsRef<Path>>(
    paths: &[P],
    columns: i64,
    rows: i64,
    show_names: bool,
    key: Option<&str>,
) -> Result<ViewerRequest, PrepareError> {
    let options = ViewerOptions {
        columns,
        rows,
        show_names,
        key: key.map(str::to_string),
    };
    Preparer::new().prepare(paths, &options)
}

/// Decoding backend plus encoding settings, reusable across calls.
#[derive(Debug, Clone)]
pub struct Preparer<B = RustBackend> {
    backend: B,
    quality: Quality,
}

impl Preparer {
    pub fn new() -> Self {
        Self::with_backend(RustBackend::new())
    }
}

impl Default for Preparer {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ImageBackend> Preparer<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            quality: Quality::default(),
        }
    }

    /// JPEG quality used by the inline strategy.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Inline strategy: every entry becomes a JPEG data URI.
    pub fn prepare<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: &ViewerOptions,
    ) -> Result<ViewerRequest, PrepareError> {
        let quality = self.quality;
        self.prepare_with(paths, options, |path, image| {
            let jpeg = encode_jpeg(image, quality).map_err(|source| PrepareError::ImageLoad {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(jpeg_data_uri(&jpeg))
        })
    }

    /// Cached-URL strategy: every entry is registered with `cache`.
    ///
    /// Returned URLs never start with `/`; the viewer resolves them against
    /// its own base URL.
    pub fn prepare_cached<P: AsRef<Path>>(
        &self,
        paths: &[P],
        options: &ViewerOptions,
        cache: &mut dyn AssetCache,
    ) -> Result<ViewerRequest, PrepareError> {
        let key = options.key.as_deref();
        self.prepare_with(paths, options, |path, image| {
            let id = asset_id(&pixel_fingerprint(image), key);
            let url = cache
                .register(&id, image)
                .map_err(|source| PrepareError::AssetCache {
                    path: path.to_path_buf(),
                    source,
                })?;
            Ok(url.trim_start_matches('/').to_string())
        })
    }

    fn prepare_with<P, F>(
        &self,
        paths: &[P],
        options: &ViewerOptions,
        mut represent: F,
    ) -> Result<ViewerRequest, PrepareError>
    where
        P: AsRef<Path>,
        F: FnMut(&Path, &DynamicImage) -> Result<String, PrepareError>,
    {
        let layout = LayoutSpec::new(options.columns, options.rows)?;

        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let image = self
                .backend
                .decode(path)
                .map_err(|source| PrepareError::ImageLoad {
                    path: path.to_path_buf(),
                    source,
                })?;
            let size = Dimensions::of(&image);
            if size.width == 0 || size.height == 0 {
                return Err(PrepareError::ImageLoad {
                    path: path.to_path_buf(),
                    source: BackendError::DecodeFailed("image has no pixels".to_string()),
                });
            }
            let representation = represent(path, &image)?;
            tracing::debug!(
                path = %path.display(),
                width = size.width,
                height = size.height,
                "prepared image"
            );
            entries.push(ImageEntry {
                representation,
                size,
                display_name: display_name(path),
            });
        }

        tracing::info!(
            images = entries.len(),
            columns = layout.columns(),
            rows = layout.rows(),
            "viewer request ready"
        );
        Ok(ViewerRequest {
            entries,
            layout,
            show_names: options.show_names,
            key: options.key.clone(),
        })
    }
}
