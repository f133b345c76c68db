//! Shared test utilities: synthetic image fixtures written to disk.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = tmp.path().join("cat.jpg");
//! create_test_jpeg(&path, 64, 48);
//! ```

use base64::{Engine as _, engine::general_purpose};
use image::{ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

use crate::imaging::encode::JPEG_DATA_URI_PREFIX;

// =========================================================================
// Fixture files
// =========================================================================

/// Create a small valid JPEG file with a gradient of the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a small valid RGBA PNG file with a half-transparent gradient.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(y % 256) as u8, 64, (x % 256) as u8, 128])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Write bytes that no decoder accepts.
pub fn write_garbage(path: &Path) {
    std::fs::write(path, b"definitely not an image").unwrap();
}

// =========================================================================
// Payload inspection
// =========================================================================

/// Decode the base64 body of an inline JPEG representation. Panics on
/// anything else.
pub fn decode_data_uri(uri: &str) -> Vec<u8> {
    let payload = uri
        .strip_prefix(JPEG_DATA_URI_PREFIX)
        .unwrap_or_else(|| panic!("not an inline JPEG representation: {uri:.40}"));
    general_purpose::STANDARD.decode(payload).unwrap()
}
