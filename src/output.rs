//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`, no I/O) and
//! a `print_*` wrapper. Summaries go to stderr so stdout stays free for the
//! JSON payload.
//!
//! ## Scan
//!
//! ```text
//! Images (2 found in images/)
//! 001 cat.jpg
//!     Source: images/cat.jpg
//! 002 dog.png
//!     Source: images/dog.png
//! ```
//!
//! ## Prepare
//!
//! ```text
//! Viewer 3x2: 2 images, 1 page, names shown
//! 001 cat.jpg 640x480
//!     inline JPEG, 41.2 KB
//! 002 dog.png 200x300
//!     media/imageviewer-5e1f...-none.png
//! ```

use crate::assets::CacheStats;
use crate::imaging::encode::JPEG_DATA_URI_PREFIX;
use crate::prepare::{ImageEntry, ViewerRequest, display_name};
use std::path::{Path, PathBuf};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: u64, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Human-readable byte count.
fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Short description of an entry's representation.
///
/// Inline payloads are summarized by decoded size instead of being echoed.
fn describe_representation(entry: &ImageEntry) -> String {
    match entry.representation.strip_prefix(JPEG_DATA_URI_PREFIX) {
        Some(b64) => {
            let padding = b64.bytes().rev().take_while(|&b| b == b'=').count();
            let decoded = (b64.len() / 4 * 3).saturating_sub(padding);
            format!("inline JPEG, {}", format_bytes(decoded))
        }
        None => entry.representation.clone(),
    }
}

pub fn format_scan_output(paths: &[PathBuf], root: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Images ({} found in {})",
        paths.len(),
        root.display()
    )];
    for (i, path) in paths.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), display_name(path)));
        lines.push(format!("{}Source: {}", indent(1), path.display()));
    }
    lines
}

pub fn print_scan_output(paths: &[PathBuf], root: &Path) {
    for line in format_scan_output(paths, root) {
        eprintln!("{}", line);
    }
}

pub fn format_prepare_output(request: &ViewerRequest, cache: Option<&CacheStats>) -> Vec<String> {
    let mut header = format!(
        "Viewer {}x{}: {}, {}, names {}",
        request.layout.columns(),
        request.layout.rows(),
        plural(request.entries.len() as u64, "image", "images"),
        plural(request.page_count(), "page", "pages"),
        if request.show_names { "shown" } else { "hidden" },
    );
    if let Some(key) = &request.key {
        header.push_str(&format!(", key {key}"));
    }

    let mut lines = vec![header];
    for (i, entry) in request.entries.iter().enumerate() {
        lines.push(format!(
            "{} {} {}x{}",
            format_index(i + 1),
            entry.display_name,
            entry.size.width,
            entry.size.height
        ));
        lines.push(format!("{}{}", indent(1), describe_representation(entry)));
    }
    if let Some(stats) = cache {
        lines.push(format!("Assets: {}", stats));
    }
    lines
}

pub fn print_prepare_output(request: &ViewerRequest, cache: Option<&CacheStats>) {
    for line in format_prepare_output(request, cache) {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{Dimensions, jpeg_data_uri};
    use crate::layout::LayoutSpec;

    fn entry(name: &str, representation: String) -> ImageEntry {
        ImageEntry {
            representation,
            size: Dimensions {
                width: 640,
                height: 480,
            },
            display_name: name.to_string(),
        }
    }

    fn request(entries: Vec<ImageEntry>, key: Option<&str>) -> ViewerRequest {
        ViewerRequest {
            entries,
            layout: LayoutSpec::new(3, 2).unwrap(),
            show_names: true,
            key: key.map(str::to_string),
        }
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn format_bytes_units() {
        assert_eq!(format_bytes(12), "12 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn scan_output_lists_sources() {
        let paths = vec![PathBuf::from("img/cat.jpg"), PathBuf::from("img/dog.png")];
        let lines = format_scan_output(&paths, Path::new("img"));
        assert_eq!(
            lines,
            vec![
                "Images (2 found in img)",
                "001 cat.jpg",
                "    Source: img/cat.jpg",
                "002 dog.png",
                "    Source: img/dog.png",
            ]
        );
    }

    #[test]
    fn prepare_output_summarizes_inline_payload() {
        let uri = jpeg_data_uri(&[0u8; 10]);
        let lines = format_prepare_output(&request(vec![entry("cat.jpg", uri)], None), None);
        assert_eq!(lines[0], "Viewer 3x2: 1 image, 1 page, names shown");
        assert_eq!(lines[1], "001 cat.jpg 640x480");
        assert_eq!(lines[2], "    inline JPEG, 10 B");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn prepare_output_shows_urls_key_and_cache() {
        let stats = CacheStats { hits: 1, stored: 0 };
        let lines = format_prepare_output(
            &request(
                vec![entry("a.png", "media/imageviewer-x-left.png".into())],
                Some("left"),
            ),
            Some(&stats),
        );
        assert!(lines[0].ends_with(", key left"));
        assert_eq!(lines[2], "    media/imageviewer-x-left.png");
        assert_eq!(lines.last().unwrap(), "Assets: 1 cached, 0 stored (1 total)");
    }

    #[test]
    fn prepare_output_empty_request() {
        let lines = format_prepare_output(&request(vec![], None), None);
        assert_eq!(lines, vec!["Viewer 3x2: 0 images, 0 pages, names shown"]);
    }
}
