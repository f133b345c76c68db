//! # Image Grid Viewer
//!
//! Prepares image files for a paginated grid viewer component. The viewer
//! itself is a front-end bundle that lays images out `columns × rows` per
//! page; this crate produces the data it needs and nothing more.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      images/          →  ordered paths      (optional, CLI only)
//! 2. Prepare   paths + options  →  ViewerRequest      (decode, represent, size, name)
//! 3. Bridge    ViewerRequest    →  JSON payload       (handed to the component)
//! ```
//!
//! ```no_run
//! use image_grid_viewer::prepare;
//!
//! let request = prepare(&["img/a.png", "img/b.jpg"], 2, 1, true, None)?;
//! assert_eq!(request.names(), vec!["a.png", "b.jpg"]);
//! # Ok::<(), image_grid_viewer::PrepareError>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`prepare`](mod@prepare) | Layout validation, per-image decode and representation, [`ViewerRequest`] |
//! | [`layout`] | [`LayoutSpec`]: validated columns and rows |
//! | [`imaging`] | Decoding backend, JPEG re-encoding, data URIs, pixel fingerprints |
//! | [`assets`] | Content-addressed asset cache for the cached-URL strategy |
//! | [`bridge`] | Payload contract and the [`ComponentBridge`] seam |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`scan`](mod@scan) | Source directory discovery |
//! | [`output`] | CLI summaries |
//!
//! # Design Decisions
//!
//! ## Fail before reading
//!
//! Layout values are checked before any file is opened, and the first image
//! that fails to decode aborts the batch. A caller either gets a request that
//! covers every input path, in order, or an error naming what went wrong.
//!
//! ## Two representations
//!
//! The default inline strategy embeds each image as a base64 JPEG data URI.
//! It needs no server and is deterministic, at the price of re-encoding
//! (alpha and the original format are lost). The cached-URL strategy writes a
//! PNG copy (RGB) to an [`assets::AssetCache`] under an identifier built
//! from the pixel fingerprint and the viewer's instance key, and hands the
//! viewer a relative URL instead.
//!
//! ## No ambient state
//!
//! Display preferences travel as an explicit [`ViewerOptions`] value (usually
//! derived from a [`config::ViewerConfig`]). Every call is independent.

pub mod assets;
pub mod bridge;
pub mod config;
pub mod imaging;
pub mod layout;
pub mod output;
pub mod prepare;
pub mod scan;

pub use bridge::{BridgePayload, ComponentBridge};
pub use layout::{InvalidLayoutError, LayoutSpec};
pub use prepare::{
    ImageEntry, PrepareError, Preparer, Strategy, ViewerOptions, ViewerRequest, prepare,
};

#[cfg(test)]
pub(crate) mod test_helpers;
