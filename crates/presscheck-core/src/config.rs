// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printability thresholds.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PresscheckError, Result};

/// Thresholds consulted by the printability policy.
///
/// Missing keys in a config file take the newsprint defaults, so a file
/// containing only `{"minPrintDpi": 250}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyConfig {
    /// Smallest PDF font size (points) considered legible on newsprint.
    pub min_font_size_pt: f64,
    /// Raster resolution below which a file cannot go to press.
    pub min_print_dpi: u32,
    /// Raster resolution below which text in the image is illegible.
    pub min_text_dpi: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_font_size_pt: 6.0,
            min_print_dpi: 200,
            min_text_dpi: 150,
        }
    }
}

impl PolicyConfig {
    /// Parse a config from JSON text and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Reject thresholds that would make every file pass or fail.
    pub fn validate(&self) -> Result<()> {
        if !self.min_font_size_pt.is_finite() || self.min_font_size_pt <= 0.0 {
            return Err(PresscheckError::Config(format!(
                "minFontSizePt must be a positive number, got {}",
                self.min_font_size_pt
            )));
        }
        if self.min_print_dpi == 0 || self.min_text_dpi == 0 {
            return Err(PresscheckError::Config(
                "resolution thresholds must be greater than zero".into(),
            ));
        }
        if self.min_text_dpi > self.min_print_dpi {
            return Err(PresscheckError::Config(format!(
                "minTextDpi ({}) cannot exceed minPrintDpi ({})",
                self.min_text_dpi, self.min_print_dpi
            )));
        }
        Ok(())
    }
}
