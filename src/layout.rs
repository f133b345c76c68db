//! Grid layout parameters.
//!
//! A [`LayoutSpec`] can only be obtained through [`LayoutSpec::new`], which
//! rejects anything below one column or one row. Callers pass signed integers
//! so that zero and negative values coming from a command line or config file
//! surface as a typed error instead of wrapping.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "columns and rows must be positive integers greater than or equal to 1 \
     (got columns={columns}, rows={rows})"
)]
pub struct InvalidLayoutError {
    pub columns: i64,
    pub rows: i64,
}

/// Validated grid shape: how many images fit on one page of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSpec {
    columns: u32,
    rows: u32,
}

impl LayoutSpec {
    pub fn new(columns: i64, rows: i64) -> Result<Self, InvalidLayoutError> {
        match (u32::try_from(columns), u32::try_from(rows)) {
            (Ok(c), Ok(r)) if c >= 1 && r >= 1 => Ok(Self {
                columns: c,
                rows: r,
            }),
            _ => Err(InvalidLayoutError { columns, rows }),
        }
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Images shown on a single page.
    pub fn per_page(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }

    /// Number of pages needed for `count` images. Zero images need zero pages.
    pub fn page_count(&self, count: usize) -> u64 {
        (count as u64).div_ceil(self.per_page())
    }
}
