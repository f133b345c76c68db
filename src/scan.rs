//! Image discovery.
//!
//! Turns a source directory into the ordered path list the preparer takes:
//! every regular file whose extension (case-insensitive) is in the configured
//! set, sorted by path so the grid order is stable between runs.
//!
//! ```text
//! images/
//! ├── config.toml        # ignored (not an image extension)
//! ├── 01-cat.jpg         # → 1st
//! ├── 02-dog.PNG         # → 2nd (extension match ignores case)
//! ├── notes.txt          # ignored
//! └── archive/           # only walked when scan.recursive = true
//!     └── old.jpg
//! ```
//!
//! Unreadable entries are skipped with a warning rather than failing the
//! scan; decoding problems are left for the preparer to report.

use crate::config::ScanConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Source is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Collect image paths under `root` in sorted order.
pub fn scan(root: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_extension(p, &config.extensions))
        .collect();

    paths.sort();
    tracing::info!(root = %root.display(), found = paths.len(), "scan complete");
    Ok(paths)
}

/// Case-insensitive extension check.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}
