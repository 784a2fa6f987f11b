// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster pixel density shared by the JPEG and TIFF decoders.

/// Reported when no density tag in the file validates.
pub const DEFAULT_DPI: u32 = 72;
/// Upper bound for a plausible density. Anything above is corrupt metadata.
pub const MAX_DENSITY: f64 = 10_000.0;
pub const CM_PER_INCH: f64 = 2.54;

/// Horizontal and vertical density in dots per inch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    pub x: u32,
    pub y: u32,
    /// Whether any axis came from the file rather than the default.
    pub detected: bool,
}

impl Default for Density {
    fn default() -> Self {
        Self {
            x: DEFAULT_DPI,
            y: DEFAULT_DPI,
            detected: false,
        }
    }
}

impl Density {
    /// The figure used for the verdict: the finer of the two axes.
    pub fn effective(&self) -> u32 {
        self.x.max(self.y)
    }

    pub fn set_x(&mut self, dpi: u32) {
        self.x = dpi;
        self.detected = true;
    }

    pub fn set_y(&mut self, dpi: u32) {
        self.y = dpi;
        self.detected = true;
    }
}

/// Keep `value` only if it lies in `[1, MAX_DENSITY]`.
pub fn plausible(value: f64) -> Option<f64> {
    (1.0..=MAX_DENSITY).contains(&value).then_some(value)
}

/// Convert a per-centimetre density to per-inch and round to whole dots.
pub fn per_cm_to_dpi(value: f64) -> u32 {
    to_dpi(value * CM_PER_INCH)
}

/// Round a validated density to whole dots.
pub fn to_dpi(value: f64) -> u32 {
    value.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_undetected_72() {
        let density = Density::default();
        assert_eq!(density.effective(), 72);
        assert!(!density.detected);
    }

    #[test]
    fn effective_is_the_larger_axis() {
        let mut density = Density::default();
        density.set_x(150);
        assert_eq!(density.effective(), 150);
        density.set_y(300);
        assert_eq!(density.effective(), 300);
        assert!(density.detected);
    }

    #[test]
    fn plausibility_bounds_are_inclusive() {
        assert_eq!(plausible(1.0), Some(1.0));
        assert_eq!(plausible(10_000.0), Some(10_000.0));
        assert_eq!(plausible(0.5), None);
        assert_eq!(plausible(10_000.5), None);
        assert_eq!(plausible(f64::NAN), None);
    }

    #[test]
    fn centimetre_conversion_rounds() {
        assert_eq!(per_cm_to_dpi(118.0), 300);
        assert_eq!(per_cm_to_dpi(28.35), 72);
    }
}
