//! Image decoding backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the single seam between the preparer and the
//! pixel work: given a path, produce a decoded image. The production
//! implementation is [`RustBackend`](super::rust_backend::RustBackend); tests
//! substitute a recording mock so they can assert exactly which files were
//! touched.

use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    DecodeFailed(String),
    #[error("Encode failed: {0}")]
    EncodeFailed(String),
}

/// Native pixel size of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn of(image: &DynamicImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

/// Trait for image decoding backends.
pub trait ImageBackend {
    /// Open and fully decode the image at `path`.
    ///
    /// The file handle must not outlive this call.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;
}
