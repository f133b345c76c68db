//! Image decoding and encoding in pure Rust, with no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` with format sniffing |
//! | **Encode → JPEG** | `image::codecs::jpeg::JpegEncoder` |
//! | **Inline data URI** | `base64` standard engine |
//! | **Pixel fingerprint** | `sha2::Sha256` over raw pixel bytes |
//!
//! The module is split into:
//! - **Parameters**: [`Quality`] for lossy encoding
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Encode**: JPEG re-encoding, data URIs and fingerprints

pub mod backend;
pub mod encode;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use encode::{encode_jpeg, jpeg_data_uri, pixel_fingerprint};
pub use params::Quality;
pub use rust_backend::{RustBackend, supported_input_extensions};
