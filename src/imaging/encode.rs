//! JPEG re-encoding, inline data URIs and pixel fingerprints.

use super::backend::BackendError;
use super::params::Quality;
use base64::{Engine as _, engine::general_purpose};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use sha2::{Digest, Sha256};

/// Prefix of every inline representation.
pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Re-encode a decoded image as baseline JPEG.
///
/// The image is flattened to 8-bit RGB first: alpha and high bit depth are
/// discarded. Output is deterministic for identical pixels and quality.
pub fn encode_jpeg(image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
    let rgb = image.to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.value())
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| BackendError::EncodeFailed(format!("JPEG encode failed: {e}")))?;
    Ok(buf)
}

/// Wrap JPEG bytes as a `data:image/jpeg;base64,...` URI.
pub fn jpeg_data_uri(jpeg: &[u8]) -> String {
    let mut uri = String::with_capacity(JPEG_DATA_URI_PREFIX.len() + jpeg.len().div_ceil(3) * 4);
    uri.push_str(JPEG_DATA_URI_PREFIX);
    general_purpose::STANDARD.encode_string(jpeg, &mut uri);
    uri
}

/// SHA-256 of the raw decoded pixel buffer, as a hex string.
///
/// Two files with the same pixels fingerprint identically regardless of
/// container format or metadata.
pub fn pixel_fingerprint(image: &DynamicImage) -> String {
    format!("{:x}", Sha256::digest(image.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::decode_data_uri;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }))
    }

    #[test]
    fn encode_jpeg_produces_jpeg_magic() {
        let bytes = encode_jpeg(&gradient(16, 8), Quality::default()).unwrap();
        assert_eq!(bytes[..3], [0xFFu8, 0xD8, 0xFF]);
    }

    #[test]
    fn encode_jpeg_is_deterministic() {
        let img = gradient(40, 30);
        let a = encode_jpeg(&img, Quality::default()).unwrap();
        let b = encode_jpeg(&img, Quality::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn encode_jpeg_drops_alpha() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(12, 9, Rgba([10, 20, 30, 0])));
        let bytes = encode_jpeg(&rgba, Quality::default()).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(!decoded.color().has_alpha());
        assert_eq!((decoded.width(), decoded.height()), (12, 9));
    }

    #[test]
    fn higher_quality_is_not_smaller() {
        let img = gradient(64, 64);
        let low = encode_jpeg(&img, Quality::new(10)).unwrap();
        let high = encode_jpeg(&img, Quality::new(95)).unwrap();
        assert!(high.len() >= low.len());
    }

    #[test]
    fn data_uri_roundtrips_bytes() {
        let bytes = encode_jpeg(&gradient(8, 8), Quality::default()).unwrap();
        let uri = jpeg_data_uri(&bytes);
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert_eq!(decode_data_uri(&uri), bytes);
    }

    #[test]
    fn data_uri_of_empty_input_is_bare_prefix() {
        assert_eq!(jpeg_data_uri(&[]), JPEG_DATA_URI_PREFIX);
    }

    #[test]
    fn fingerprint_is_stable_and_pixel_sensitive() {
        let a = gradient(10, 10);
        let mut b = gradient(10, 10);
        assert_eq!(pixel_fingerprint(&a), pixel_fingerprint(&b));

        if let DynamicImage::ImageRgb8(buf) = &mut b {
            buf.put_pixel(0, 0, Rgb([255, 255, 255]));
        }
        assert_ne!(pixel_fingerprint(&a), pixel_fingerprint(&b));
        assert_eq!(pixel_fingerprint(&a).len(), 64);
    }
}
