// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Presscheck print-readiness report.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;

/// Input formats the analyzer engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "JPG")]
    Jpeg,
    #[serde(rename = "TIFF")]
    Tiff,
    #[serde(rename = "EPS")]
    Eps,
}

impl FileFormat {
    /// Label used as `fileType` in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Jpeg => "JPG",
            Self::Tiff => "TIFF",
            Self::Eps => "EPS",
        }
    }

    /// MIME type, used when building preview payloads.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Tiff => "image/tiff",
            Self::Eps => "application/postscript",
        }
    }

    /// Infer the format from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "tif" | "tiff" => Some(Self::Tiff),
            "eps" => Some(Self::Eps),
            _ => None,
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The bytes of one file together with its name and declared format.
#[derive(Debug, Clone, Copy)]
pub struct RawDocument<'a> {
    pub bytes: &'a [u8],
    pub file_name: &'a str,
    pub format: FileFormat,
}

impl<'a> RawDocument<'a> {
    pub fn new(bytes: &'a [u8], file_name: &'a str, format: FileFormat) -> Self {
        Self {
            bytes,
            file_name,
            format,
        }
    }
}

/// Unit of a [`Dimensions`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Mm,
    Px,
}

/// Width and height in a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub unit: LengthUnit,
}

impl Dimensions {
    pub fn mm(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            unit: LengthUnit::Mm,
        }
    }

    pub fn px(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
            unit: LengthUnit::Px,
        }
    }
}

/// Colour model detected in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSpace {
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "CMYK")]
    Cmyk,
    Grayscale,
    #[serde(rename = "unknown")]
    Unknown,
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Rgb => "RGB",
            Self::Cmyk => "CMYK",
            Self::Grayscale => "Grayscale",
            Self::Unknown => "unknown",
        })
    }
}

/// ICC profiles recognised by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IccProfileName {
    #[serde(rename = "ISONewspaper")]
    IsoNewspaper,
    #[serde(rename = "Euroestándar")]
    Euroestandar,
    #[serde(rename = "sRGB")]
    Srgb,
    #[serde(rename = "Adobe RGB")]
    AdobeRgb,
    #[serde(rename = "Display P3")]
    DisplayP3,
    #[serde(rename = "CMYK Profile")]
    CmykProfile,
}

impl IccProfileName {
    pub fn label(&self) -> &'static str {
        match self {
            Self::IsoNewspaper => "ISONewspaper",
            Self::Euroestandar => "Euroestándar",
            Self::Srgb => "sRGB",
            Self::AdobeRgb => "Adobe RGB",
            Self::DisplayP3 => "Display P3",
            Self::CmykProfile => "CMYK Profile",
        }
    }
}

impl std::fmt::Display for IccProfileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Presence and identity of an embedded colour profile.
///
/// `present` without a `name` means a profile is embedded but none of the
/// known keywords appeared in it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IccProfileInfo {
    #[serde(rename = "hasICCProfile")]
    pub present: bool,
    #[serde(rename = "iccProfile", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<IccProfileName>,
}

impl IccProfileInfo {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn embedded(name: Option<IccProfileName>) -> Self {
        Self {
            present: true,
            name,
        }
    }
}

/// Legibility classification of text in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadabilityStatus {
    Legible,
    Warning,
    NoLegible,
    Unknown,
}

/// Whether text will survive newsprint reproduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextReadability {
    pub is_legible: bool,
    pub status: ReadabilityStatus,
    pub details: Vec<String>,
    /// Smallest font size found, in points. PDF only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_font_size: Option<f64>,
}

/// Resolution figure: a DPI number, or the literal `"Vector"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionValue {
    Dpi(u32),
    Vector,
}

impl Serialize for ResolutionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Dpi(dpi) => serializer.serialize_u32(*dpi),
            Self::Vector => serializer.serialize_str("Vector"),
        }
    }
}

impl<'de> Deserialize<'de> for ResolutionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Dpi(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Dpi(dpi) => Ok(Self::Dpi(dpi)),
            Raw::Text(text) if text == "Vector" => Ok(Self::Vector),
            Raw::Text(text) => Err(serde::de::Error::custom(format!(
                "expected a DPI number or \"Vector\", got {text:?}"
            ))),
        }
    }
}

/// How the resolution figure was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    /// Read from a density tag in the file.
    Detected,
    /// Nothing usable in the file; a fixed figure is reported.
    Default,
    /// Vector artwork; resolution does not apply.
    Vector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub value: ResolutionValue,
    pub status: ResolutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall print readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Ready,
    Warning,
    Error,
}

/// Output of the printability policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintabilityVerdict {
    pub status: VerdictStatus,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Status and issues as they appear in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Printability {
    pub status: VerdictStatus,
    pub issues: Vec<String>,
}

/// Complete print-readiness report for one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub file_name: String,
    pub file_type: FileFormat,
    pub file_size: String,
    pub dimensions: Dimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_dimensions: Option<Dimensions>,
    pub resolution: Resolution,
    pub color_space: ColorSpace,
    #[serde(flatten)]
    pub icc: IccProfileInfo,
    pub text_readability: TextReadability,
    pub printability: Printability,
    pub recommendations: Vec<String>,
}

/// Success/failure envelope handed to presentation code.
///
/// Serializes as `{"success":true,"data":{..}}` or
/// `{"success":false,"error":".."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisOutcome {
    pub fn success(report: AnalysisReport) -> Self {
        Self {
            success: true,
            data: Some(report),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl From<Result<AnalysisReport>> for AnalysisOutcome {
    fn from(result: Result<AnalysisReport>) -> Self {
        match result {
            Ok(report) => Self::success(report),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}
