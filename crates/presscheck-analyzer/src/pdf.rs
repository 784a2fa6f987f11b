// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF analysis: scans the file as Latin-1 text for the page box, colour
// operators, output intents and font-size operators. No object model is
// built; compressed content streams simply contribute nothing.

use std::sync::LazyLock;

use presscheck_core::{
    AnalysisReport, ColorSpace, FileFormat, IccProfileInfo, PolicyConfig, RawDocument,
};
use regex::Regex;
use tracing::{debug, instrument};

use crate::byte_view::ByteView;
use crate::profile::{ProfileSource, identify_profile};
use crate::report::{self, Findings, PageFindings, PageText};

/// A4 portrait in points, used when no MediaBox can be read.
pub const A4_POINTS: (f64, f64) = (595.0, 842.0);

/// Font sizes outside `(0, MAX_FONT_SIZE)` are treated as noise.
const MAX_FONT_SIZE: f64 = 200.0;

static MEDIA_BOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/MediaBox\s*\[\s*([\d.-]+)\s+([\d.-]+)\s+([\d.-]+)\s+([\d.-]+)\s*\]")
        .expect("valid MediaBox regex")
});

static TF_OPERATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)\s+Tf").expect("valid Tf regex"));

static FONT_SIZE_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/FontSize\s+(\d+\.?\d*)").expect("valid FontSize regex"));

/// Analyze a PDF buffer. Never fails: anything unreadable keeps its default.
#[instrument(skip(bytes, config), fields(size = bytes.len()))]
pub fn analyze(bytes: &[u8], file_name: &str, config: &PolicyConfig) -> AnalysisReport {
    let doc = RawDocument::new(bytes, file_name, FileFormat::Pdf);
    let findings = decode(bytes);
    report::assemble(&doc, Findings::Page(findings), config)
}

/// Extract the page attributes the policy needs.
pub fn decode(bytes: &[u8]) -> PageFindings {
    let text = ByteView::new(bytes).to_latin1();

    let (width_pt, height_pt) = report::page_extent(&MEDIA_BOX, &text).unwrap_or(A4_POINTS);
    let color_space = color_space(&text);
    let icc = icc_profile(&text);
    let sizes = font_sizes(&text);

    debug!(
        width_pt,
        height_pt,
        %color_space,
        has_icc = icc.present,
        font_sizes = sizes.len(),
        "PDF decoded"
    );

    PageFindings {
        width_pt,
        height_pt,
        color_space,
        icc,
        text: PageText::FontSizes(sizes),
    }
}

fn color_space(text: &str) -> ColorSpace {
    if text.contains("/DeviceCMYK") || (text.contains("/ICCBased") && text.contains("CMYK")) {
        ColorSpace::Cmyk
    } else if text.contains("/DeviceRGB") {
        ColorSpace::Rgb
    } else if text.contains("/DeviceGray") {
        ColorSpace::Grayscale
    } else {
        ColorSpace::Unknown
    }
}

fn icc_profile(text: &str) -> IccProfileInfo {
    if text.contains("/ICCBased") || text.contains("/OutputIntent") {
        IccProfileInfo::embedded(identify_profile(text, ProfileSource::PdfBody))
    } else {
        IccProfileInfo::absent()
    }
}

/// Sizes from `Tf` operators followed by `/FontSize` entries.
fn font_sizes(text: &str) -> Vec<f64> {
    TF_OPERATOR
        .captures_iter(text)
        .chain(FONT_SIZE_ENTRY.captures_iter(text))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .filter(|size| *size > 0.0 && *size < MAX_FONT_SIZE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use presscheck_core::{
        Dimensions, IccProfileName, ReadabilityStatus, ResolutionStatus, ResolutionValue,
        VerdictStatus,
    };

    fn pdf(body: &str) -> Vec<u8> {
        format!("%PDF-1.7\n{body}\n%%EOF\n").into_bytes()
    }

    #[test]
    fn a4_media_box_in_millimetres() {
        let bytes = pdf("<< /Type /Page /MediaBox [0 0 595 842] >>");
        let report = analyze(&bytes, "a4.pdf", &PolicyConfig::default());
        assert_eq!(report.dimensions, Dimensions::mm(209.9, 297.0));
        assert_eq!(report.resolution.value, ResolutionValue::Dpi(300));
        assert_eq!(report.resolution.status, ResolutionStatus::Default);
        assert_eq!(
            report.resolution.message.as_deref(),
            Some("PDF - default estimated resolution")
        );
    }

    #[test]
    fn offset_media_box_uses_absolute_extent() {
        let findings = decode(&pdf("/MediaBox [ 10.5 20 -289.5 420 ]"));
        assert_eq!((findings.width_pt, findings.height_pt), (300.0, 400.0));
    }

    #[test]
    fn missing_or_garbled_media_box_defaults_to_a4() {
        let missing = decode(&pdf("<< /Type /Page >>"));
        assert_eq!((missing.width_pt, missing.height_pt), A4_POINTS);

        let garbled = decode(&pdf("/MediaBox [0 0 5-95 842]"));
        assert_eq!((garbled.width_pt, garbled.height_pt), A4_POINTS);
    }

    #[test]
    fn tiny_font_is_not_legible() {
        let bytes = pdf("/DeviceCMYK /OutputIntent ISONewspaper26v4 BT /F1 4 Tf (x) Tj ET");
        let report = analyze(&bytes, "small.pdf", &PolicyConfig::default());
        assert!(!report.text_readability.is_legible);
        assert_eq!(report.text_readability.status, ReadabilityStatus::NoLegible);
        assert_eq!(report.text_readability.min_font_size, Some(4.0));
        assert_eq!(report.printability.status, VerdictStatus::Warning);
    }

    #[test]
    fn font_sizes_from_both_sources_within_range() {
        let sizes = font_sizes("/F1 9.5 Tf /F2 0 Tf /F3 250 Tf /FontSize 7 /FontSize 12.25");
        assert_eq!(sizes, vec![9.5, 7.0, 12.25]);
    }

    #[test]
    fn no_fonts_is_unknown_readability() {
        let report = analyze(&pdf("/DeviceGray"), "scan.pdf", &PolicyConfig::default());
        assert_eq!(report.text_readability.status, ReadabilityStatus::Unknown);
        assert!(report.text_readability.is_legible);
        assert_eq!(report.text_readability.min_font_size, None);
    }

    #[test]
    fn colour_space_precedence() {
        assert_eq!(color_space("/DeviceRGB /DeviceCMYK"), ColorSpace::Cmyk);
        assert_eq!(color_space("/ICCBased ... CMYK"), ColorSpace::Cmyk);
        assert_eq!(color_space("/DeviceRGB /DeviceGray"), ColorSpace::Rgb);
        assert_eq!(color_space("/DeviceGray"), ColorSpace::Grayscale);
        assert_eq!(color_space("nothing here"), ColorSpace::Unknown);
    }

    #[test]
    fn icc_detection_and_naming() {
        assert_eq!(icc_profile("/DeviceCMYK"), IccProfileInfo::absent());
        assert_eq!(
            icc_profile("/OutputIntent Coated EuroStandard"),
            IccProfileInfo::embedded(Some(IccProfileName::Euroestandar))
        );
        assert_eq!(icc_profile("/ICCBased 5 0 R"), IccProfileInfo::embedded(None));
    }

    #[test]
    fn rgb_pdf_is_an_error() {
        let bytes = pdf("/MediaBox [0 0 595 842] /DeviceRGB BT /F1 10 Tf ET");
        let report = analyze(&bytes, "rgb.pdf", &PolicyConfig::default());
        assert_eq!(report.color_space, ColorSpace::Rgb);
        assert_eq!(report.printability.status, VerdictStatus::Error);
        assert!(!report.icc.present);
    }

    #[test]
    fn analysis_is_deterministic() {
        let bytes = pdf("/MediaBox [0 0 612 792] /DeviceCMYK /F1 8 Tf");
        let config = PolicyConfig::default();
        assert_eq!(
            analyze(&bytes, "x.pdf", &config),
            analyze(&bytes, "x.pdf", &config)
        );
    }
}
