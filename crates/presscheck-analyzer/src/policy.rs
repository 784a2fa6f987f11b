// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printability policy: turns decoded attributes into a ready/warning/error
// verdict with ordered issues and recommendations.
//
// Each format has its own error triggers because the analyzers default
// differently: JPEG assumes RGB when no frame header says otherwise, TIFF
// has no default and treats an unknown colour model as fatal, and EPS is
// vector artwork with no resolution at all.

use presscheck_core::{
    ColorSpace, FileFormat, IccProfileInfo, IccProfileName, PolicyConfig, PrintabilityVerdict,
    ReadabilityStatus, TextReadability, VerdictStatus,
};

use crate::report::round_tenths;

const READY_FOR_NEWSPRINT: &str = "File ready for newsprint printing";
const READY_VECTOR: &str = "Vector file ready for printing";
const CONVERT_TO_CMYK: &str = "Convert to CMYK with an ISONewspaper or Euroestándar profile";
const CONVERT_PROFILE: &str = "Convert to an ISONewspaper or Euroestándar profile";
const VERIFY_COLOR_SPACE: &str = "Verify the color space manually";
const NO_ICC: &str = "No embedded ICC profile detected";
const UNKNOWN_COLOR_SPACE: &str = "The color space could not be detected";

/// Attributes the policy looks at, independent of the source format.
#[derive(Debug, Clone, Copy)]
pub struct PrintAttributes<'a> {
    pub color_space: ColorSpace,
    pub icc: IccProfileInfo,
    /// Effective raster resolution. `None` for PDF and EPS.
    pub dpi: Option<u32>,
    pub text: &'a TextReadability,
}

/// Evaluate `attrs` under the rules for `format`.
pub fn evaluate(
    format: FileFormat,
    attrs: &PrintAttributes<'_>,
    config: &PolicyConfig,
) -> PrintabilityVerdict {
    match format {
        FileFormat::Pdf => document_verdict(attrs, config),
        FileFormat::Jpeg => raster_verdict(attrs, config, false),
        FileFormat::Tiff => raster_verdict(attrs, config, true),
        FileFormat::Eps => vector_verdict(attrs),
    }
}

/// Legibility of PDF text from the font sizes found in content streams.
pub fn font_readability(sizes: &[f64], config: &PolicyConfig) -> TextReadability {
    let Some(min) = sizes.iter().copied().reduce(f64::min) else {
        return TextReadability {
            is_legible: true,
            status: ReadabilityStatus::Unknown,
            details: vec!["No font-size definitions detected".into()],
            min_font_size: None,
        };
    };

    let rounded = round_tenths(min);
    let threshold = config.min_font_size_pt;
    if min < threshold {
        TextReadability {
            is_legible: false,
            status: ReadabilityStatus::NoLegible,
            details: vec![format!(
                "Minimum detected font size: {rounded}pt (recommended minimum: {threshold}pt)"
            )],
            min_font_size: Some(rounded),
        }
    } else {
        TextReadability {
            is_legible: true,
            status: ReadabilityStatus::Legible,
            details: vec![format!("Minimum detected font size: {rounded}pt")],
            min_font_size: Some(rounded),
        }
    }
}

/// Legibility of text rasterised into an image at `dpi`.
pub fn raster_readability(dpi: u32, config: &PolicyConfig) -> TextReadability {
    let (is_legible, status, details) = if dpi < config.min_text_dpi {
        (
            false,
            ReadabilityStatus::NoLegible,
            vec![
                format!("Resolution of {dpi} dpi is insufficient for legible text"),
                "Text in the image will probably not reproduce clearly".to_string(),
            ],
        )
    } else if dpi < config.min_print_dpi {
        (
            true,
            ReadabilityStatus::Warning,
            vec![format!("Resolution of {dpi} dpi may affect text legibility")],
        )
    } else {
        (
            true,
            ReadabilityStatus::Legible,
            vec![format!("Resolution of {dpi} dpi is adequate for legible text")],
        )
    };

    TextReadability {
        is_legible,
        status,
        details,
        min_font_size: None,
    }
}

/// Vector text scales without loss.
pub fn vector_readability() -> TextReadability {
    TextReadability {
        is_legible: true,
        status: ReadabilityStatus::Legible,
        details: vec!["Vector file - text is scalable and always legible".into()],
        min_font_size: None,
    }
}

// -- Per-format rules ---------------------------------------------------------

#[derive(Default)]
struct Findings {
    issues: Vec<String>,
    recommendations: Vec<String>,
}

impl Findings {
    fn flag(&mut self, issue: impl Into<String>, recommendation: Option<&str>) {
        self.issues.push(issue.into());
        if let Some(rec) = recommendation {
            self.recommendations.push(rec.to_string());
        }
    }

    fn finish(mut self, status: VerdictStatus, ready_message: &str) -> PrintabilityVerdict {
        if self.recommendations.is_empty() {
            self.recommendations.push(ready_message.to_string());
        }
        PrintabilityVerdict {
            status,
            issues: self.issues,
            recommendations: self.recommendations,
        }
    }
}

/// ICC names acceptable for newsprint. Raster files may also carry a
/// generic CMYK profile.
fn is_newsprint_profile(name: IccProfileName, raster: bool) -> bool {
    match name {
        IccProfileName::IsoNewspaper | IccProfileName::Euroestandar => true,
        IccProfileName::CmykProfile => raster,
        _ => false,
    }
}

fn check_profile(findings: &mut Findings, icc: IccProfileInfo, raster: bool, embed_advice: &str) {
    if !icc.present {
        findings.flag(NO_ICC, Some(embed_advice));
    } else if let Some(name) = icc.name.filter(|name| !is_newsprint_profile(*name, raster)) {
        findings.flag(
            format!("ICC profile \"{name}\" is not optimal for newsprint"),
            Some(CONVERT_PROFILE),
        );
    }
}

fn document_verdict(attrs: &PrintAttributes<'_>, config: &PolicyConfig) -> PrintabilityVerdict {
    let mut findings = Findings::default();

    match attrs.color_space {
        ColorSpace::Rgb => findings.flag(
            "The file is in RGB; conversion to CMYK is required",
            Some(CONVERT_TO_CMYK),
        ),
        ColorSpace::Unknown => findings.flag(UNKNOWN_COLOR_SPACE, Some(VERIFY_COLOR_SPACE)),
        ColorSpace::Cmyk | ColorSpace::Grayscale => {}
    }

    check_profile(
        &mut findings,
        attrs.icc,
        false,
        "Embed an ISONewspaper profile for newsprint printing",
    );

    if !attrs.text.is_legible {
        let advice = format!(
            "Increase the font size to at least {}pt to ensure legibility",
            config.min_font_size_pt
        );
        findings.flag("Text is too small for newsprint printing", Some(advice.as_str()));
    }

    let status = if matches!(attrs.color_space, ColorSpace::Rgb | ColorSpace::Unknown) {
        VerdictStatus::Error
    } else if !findings.issues.is_empty() {
        VerdictStatus::Warning
    } else {
        VerdictStatus::Ready
    };

    findings.finish(status, READY_FOR_NEWSPRINT)
}

fn raster_verdict(
    attrs: &PrintAttributes<'_>,
    config: &PolicyConfig,
    unknown_is_fatal: bool,
) -> PrintabilityVerdict {
    let mut findings = Findings::default();
    let low_resolution = attrs.dpi.filter(|dpi| *dpi < config.min_print_dpi);

    if let Some(dpi) = low_resolution {
        findings.flag(
            format!(
                "Resolution of {dpi} dpi is below the {} dpi minimum",
                config.min_print_dpi
            ),
            Some("Resize the image or use a higher-resolution version"),
        );
    }

    match attrs.color_space {
        ColorSpace::Rgb => findings.flag(
            "The file is in RGB; conversion to CMYK is recommended",
            Some(CONVERT_TO_CMYK),
        ),
        ColorSpace::Unknown => findings.flag(UNKNOWN_COLOR_SPACE, Some(VERIFY_COLOR_SPACE)),
        ColorSpace::Cmyk | ColorSpace::Grayscale => {}
    }

    check_profile(&mut findings, attrs.icc, true, "Embed an appropriate ICC profile");

    // Informational only: the resolution issue above already carries the fix.
    if !attrs.text.is_legible {
        findings.flag("Resolution is insufficient for legible text in print", None);
    }

    let unknown_color = attrs.color_space == ColorSpace::Unknown;
    let status = if low_resolution.is_some() || (unknown_is_fatal && unknown_color) {
        VerdictStatus::Error
    } else if attrs.color_space == ColorSpace::Rgb || !findings.issues.is_empty() {
        VerdictStatus::Warning
    } else {
        VerdictStatus::Ready
    };

    findings.finish(status, READY_FOR_NEWSPRINT)
}

fn vector_verdict(attrs: &PrintAttributes<'_>) -> PrintabilityVerdict {
    let mut findings = Findings::default();

    match attrs.color_space {
        ColorSpace::Rgb => findings.flag(
            "The file uses RGB colors",
            Some("Convert to CMYK for printing"),
        ),
        ColorSpace::Unknown => findings.flag(
            "The color space could not be determined",
            Some(VERIFY_COLOR_SPACE),
        ),
        ColorSpace::Cmyk | ColorSpace::Grayscale => {}
    }

    let status = if findings.issues.is_empty() {
        VerdictStatus::Ready
    } else {
        VerdictStatus::Warning
    };

    findings.finish(status, READY_VECTOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legible() -> TextReadability {
        vector_readability()
    }

    fn attrs<'a>(
        color_space: ColorSpace,
        icc: IccProfileInfo,
        dpi: Option<u32>,
        text: &'a TextReadability,
    ) -> PrintAttributes<'a> {
        PrintAttributes {
            color_space,
            icc,
            dpi,
            text,
        }
    }

    fn newspaper() -> IccProfileInfo {
        IccProfileInfo::embedded(Some(IccProfileName::IsoNewspaper))
    }

    #[test]
    fn cmyk_pdf_with_newspaper_profile_is_ready() {
        let text = legible();
        let verdict = evaluate(
            FileFormat::Pdf,
            &attrs(ColorSpace::Cmyk, newspaper(), None, &text),
            &PolicyConfig::default(),
        );
        assert_eq!(verdict.status, VerdictStatus::Ready);
        assert!(verdict.issues.is_empty());
        assert_eq!(verdict.recommendations, vec![READY_FOR_NEWSPRINT.to_string()]);
    }

    #[test]
    fn rgb_pdf_is_an_error() {
        let text = legible();
        let verdict = evaluate(
            FileFormat::Pdf,
            &attrs(ColorSpace::Rgb, IccProfileInfo::absent(), None, &text),
            &PolicyConfig::default(),
        );
        assert_eq!(verdict.status, VerdictStatus::Error);
        assert_eq!(verdict.issues.len(), 2);
        assert_eq!(verdict.recommendations[0], CONVERT_TO_CMYK);
    }

    #[test]
    fn small_pdf_text_warns_and_advises_font_size() {
        let text = font_readability(&[4.0, 9.5], &PolicyConfig::default());
        assert!(!text.is_legible);
        assert_eq!(text.min_font_size, Some(4.0));

        let verdict = evaluate(
            FileFormat::Pdf,
            &attrs(ColorSpace::Cmyk, newspaper(), None, &text),
            &PolicyConfig::default(),
        );
        assert_eq!(verdict.status, VerdictStatus::Warning);
        assert_eq!(
            verdict.recommendations,
            vec!["Increase the font size to at least 6pt to ensure legibility".to_string()]
        );
    }

    #[test]
    fn unidentified_profile_is_not_flagged() {
        let text = legible();
        let verdict = evaluate(
            FileFormat::Pdf,
            &attrs(ColorSpace::Grayscale, IccProfileInfo::embedded(None), None, &text),
            &PolicyConfig::default(),
        );
        assert_eq!(verdict.status, VerdictStatus::Ready);
    }

    #[test]
    fn srgb_profile_is_not_optimal() {
        let text = legible();
        let verdict = evaluate(
            FileFormat::Pdf,
            &attrs(
                ColorSpace::Cmyk,
                IccProfileInfo::embedded(Some(IccProfileName::Srgb)),
                None,
                &text,
            ),
            &PolicyConfig::default(),
        );
        assert_eq!(verdict.status, VerdictStatus::Warning);
        assert_eq!(
            verdict.issues,
            vec!["ICC profile \"sRGB\" is not optimal for newsprint".to_string()]
        );
        assert_eq!(verdict.recommendations, vec![CONVERT_PROFILE.to_string()]);
    }

    #[test]
    fn generic_cmyk_profile_is_fine_for_raster_only() {
        let text = legible();
        let cmyk = IccProfileInfo::embedded(Some(IccProfileName::CmykProfile));
        let jpeg = evaluate(
            FileFormat::Jpeg,
            &attrs(ColorSpace::Cmyk, cmyk, Some(300), &text),
            &PolicyConfig::default(),
        );
        assert_eq!(jpeg.status, VerdictStatus::Ready);

        let pdf = evaluate(
            FileFormat::Pdf,
            &attrs(ColorSpace::Cmyk, cmyk, None, &text),
            &PolicyConfig::default(),
        );
        assert_eq!(pdf.status, VerdictStatus::Warning);
    }

    #[test]
    fn low_resolution_jpeg_is_an_error() {
        let config = PolicyConfig::default();
        let text = raster_readability(72, &config);
        let verdict = evaluate(
            FileFormat::Jpeg,
            &attrs(ColorSpace::Cmyk, newspaper(), Some(72), &text),
            &config,
        );
        assert_eq!(verdict.status, VerdictStatus::Error);
        assert_eq!(
            verdict.issues,
            vec![
                "Resolution of 72 dpi is below the 200 dpi minimum".to_string(),
                "Resolution is insufficient for legible text in print".to_string(),
            ]
        );
        assert_eq!(verdict.recommendations.len(), 1);
    }

    #[test]
    fn rgb_jpeg_at_print_resolution_warns() {
        let config = PolicyConfig::default();
        let text = raster_readability(300, &config);
        let verdict = evaluate(
            FileFormat::Jpeg,
            &attrs(ColorSpace::Rgb, IccProfileInfo::absent(), Some(300), &text),
            &config,
        );
        assert_eq!(verdict.status, VerdictStatus::Warning);
        assert_eq!(verdict.issues.len(), 2);
        assert_eq!(verdict.recommendations.len(), 2);
    }

    #[test]
    fn unknown_colour_is_fatal_for_tiff_only() {
        let config = PolicyConfig::default();
        let text = raster_readability(300, &config);
        let a = attrs(ColorSpace::Unknown, newspaper(), Some(300), &text);
        assert_eq!(evaluate(FileFormat::Tiff, &a, &config).status, VerdictStatus::Error);
        assert_eq!(evaluate(FileFormat::Jpeg, &a, &config).status, VerdictStatus::Warning);
    }

    #[test]
    fn eps_rules() {
        let text = legible();
        let ready = evaluate(
            FileFormat::Eps,
            &attrs(ColorSpace::Cmyk, IccProfileInfo::absent(), None, &text),
            &PolicyConfig::default(),
        );
        assert_eq!(ready.status, VerdictStatus::Ready);
        assert_eq!(ready.recommendations, vec![READY_VECTOR.to_string()]);

        let unknown = evaluate(
            FileFormat::Eps,
            &attrs(ColorSpace::Unknown, IccProfileInfo::absent(), None, &text),
            &PolicyConfig::default(),
        );
        assert_eq!(unknown.status, VerdictStatus::Warning);
        assert_eq!(unknown.recommendations, vec![VERIFY_COLOR_SPACE.to_string()]);
    }

    #[test]
    fn raster_readability_bands() {
        let config = PolicyConfig::default();
        assert_eq!(raster_readability(149, &config).status, ReadabilityStatus::NoLegible);
        assert!(!raster_readability(149, &config).is_legible);
        assert_eq!(raster_readability(150, &config).status, ReadabilityStatus::Warning);
        assert!(raster_readability(199, &config).is_legible);
        assert_eq!(raster_readability(200, &config).status, ReadabilityStatus::Legible);
    }

    #[test]
    fn thresholds_come_from_config() {
        let strict = PolicyConfig {
            min_font_size_pt: 8.0,
            min_print_dpi: 300,
            min_text_dpi: 250,
        };
        assert!(!font_readability(&[7.0], &strict).is_legible);
        assert!(font_readability(&[7.0], &PolicyConfig::default()).is_legible);
        assert_eq!(raster_readability(260, &strict).status, ReadabilityStatus::Warning);
    }

    #[test]
    fn no_font_sizes_means_unknown_but_legible() {
        let text = font_readability(&[], &PolicyConfig::default());
        assert_eq!(text.status, ReadabilityStatus::Unknown);
        assert!(text.is_legible);
        assert_eq!(text.min_font_size, None);
    }

    #[test]
    fn every_verdict_has_recommendations() {
        let config = PolicyConfig::default();
        let spaces = [
            ColorSpace::Rgb,
            ColorSpace::Cmyk,
            ColorSpace::Grayscale,
            ColorSpace::Unknown,
        ];
        let profiles = [
            IccProfileInfo::absent(),
            IccProfileInfo::embedded(None),
            newspaper(),
        ];
        let formats = [
            FileFormat::Pdf,
            FileFormat::Jpeg,
            FileFormat::Tiff,
            FileFormat::Eps,
        ];
        for format in formats {
            for color_space in spaces {
                for icc in profiles {
                    for dpi in [72, 180, 300] {
                        let text = raster_readability(dpi, &config);
                        let verdict =
                            evaluate(format, &attrs(color_space, icc, Some(dpi), &text), &config);
                        assert!(!verdict.recommendations.is_empty());
                    }
                }
            }
        }
    }
}
