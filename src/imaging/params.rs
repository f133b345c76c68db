//! Parameter types for image encoding.

/// Quality setting for lossy JPEG encoding (1-100).
///
/// Only [`Quality::new`] and [`Default`] construct one, so the value is
/// always in range:
///
/// ```compile_fail
/// let _ = image_grid_viewer::imaging::Quality(0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    /// Matches the quality most imaging libraries pick when none is given.
    fn default() -> Self {
        Self(75)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_75() {
        assert_eq!(Quality::default().value(), 75);
    }
}
