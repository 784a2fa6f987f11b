// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report assembly: normalizes what each decoder found into the common
// `AnalysisReport` shape, running the printability policy on the way.

use presscheck_core::{
    AnalysisReport, ColorSpace, Dimensions, FileFormat, IccProfileInfo, PolicyConfig,
    Printability, RawDocument, Resolution, ResolutionStatus, ResolutionValue, TextReadability,
};
use regex::Regex;
use tracing::debug;

use crate::density::Density;
use crate::policy::{self, PrintAttributes};

/// Millimetres per PostScript point.
pub const MM_PER_POINT: f64 = 0.352778;
const MM_PER_INCH: f64 = 25.4;

/// Figure reported for PDFs, whose effective resolution depends on the
/// placed images rather than the page structure.
pub const PDF_NOMINAL_DPI: u32 = 300;

/// Decoded attributes of a page-description file (PDF or EPS).
#[derive(Debug, Clone, PartialEq)]
pub struct PageFindings {
    pub width_pt: f64,
    pub height_pt: f64,
    pub color_space: ColorSpace,
    pub icc: IccProfileInfo,
    pub text: PageText,
}

/// What a page-description file tells us about its text.
#[derive(Debug, Clone, PartialEq)]
pub enum PageText {
    /// Font sizes (points) collected from the content.
    FontSizes(Vec<f64>),
    /// Vector artwork; text scales with the page.
    Vector,
}

/// Decoded attributes of a raster image (JPEG or TIFF).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterFindings {
    pub width_px: u32,
    pub height_px: u32,
    pub density: Density,
    pub color_space: ColorSpace,
    pub icc: IccProfileInfo,
}

/// Output of any decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum Findings {
    Page(PageFindings),
    Raster(RasterFindings),
}

/// Build the final report for `doc` from its decoded findings.
pub fn assemble(
    doc: &RawDocument<'_>,
    findings: Findings,
    config: &PolicyConfig,
) -> AnalysisReport {
    match findings {
        Findings::Page(page) => assemble_page(doc, page, config),
        Findings::Raster(raster) => assemble_raster(doc, raster, config),
    }
}

fn assemble_page(
    doc: &RawDocument<'_>,
    page: PageFindings,
    config: &PolicyConfig,
) -> AnalysisReport {
    let text = match &page.text {
        PageText::FontSizes(sizes) => policy::font_readability(sizes, config),
        PageText::Vector => policy::vector_readability(),
    };

    let resolution = match doc.format {
        FileFormat::Eps => Resolution {
            value: ResolutionValue::Vector,
            status: ResolutionStatus::Vector,
            message: Some("Vector file - resolution not applicable".into()),
        },
        _ => Resolution {
            value: ResolutionValue::Dpi(PDF_NOMINAL_DPI),
            status: ResolutionStatus::Default,
            message: Some("PDF - default estimated resolution".into()),
        },
    };

    let verdict = policy::evaluate(
        doc.format,
        &PrintAttributes {
            color_space: page.color_space,
            icc: page.icc,
            dpi: None,
            text: &text,
        },
        config,
    );

    debug!(
        file = doc.file_name,
        status = ?verdict.status,
        issues = verdict.issues.len(),
        "Page report assembled"
    );

    finish(
        doc,
        Dimensions::mm(points_to_mm(page.width_pt), points_to_mm(page.height_pt)),
        None,
        resolution,
        page.color_space,
        page.icc,
        text,
        verdict,
    )
}

fn assemble_raster(
    doc: &RawDocument<'_>,
    raster: RasterFindings,
    config: &PolicyConfig,
) -> AnalysisReport {
    let dpi = raster.density.effective();
    let text = policy::raster_readability(dpi, config);

    let verdict = policy::evaluate(
        doc.format,
        &PrintAttributes {
            color_space: raster.color_space,
            icc: raster.icc,
            dpi: Some(dpi),
            text: &text,
        },
        config,
    );

    let (resolution, physical) = if raster.density.detected {
        (
            Resolution {
                value: ResolutionValue::Dpi(dpi),
                status: ResolutionStatus::Detected,
                message: None,
            },
            Some(Dimensions::mm(
                px_to_mm(raster.width_px, dpi),
                px_to_mm(raster.height_px, dpi),
            )),
        )
    } else {
        (
            Resolution {
                value: ResolutionValue::Dpi(dpi),
                status: ResolutionStatus::Default,
                message: Some(format!("Resolution not detected, using {dpi} dpi default")),
            },
            None,
        )
    };

    debug!(
        file = doc.file_name,
        dpi,
        detected = raster.density.detected,
        status = ?verdict.status,
        "Raster report assembled"
    );

    finish(
        doc,
        Dimensions::px(raster.width_px, raster.height_px),
        physical,
        resolution,
        raster.color_space,
        raster.icc,
        text,
        verdict,
    )
}

#[allow(clippy::too_many_arguments)]
fn finish(
    doc: &RawDocument<'_>,
    dimensions: Dimensions,
    physical_dimensions: Option<Dimensions>,
    resolution: Resolution,
    color_space: ColorSpace,
    icc: IccProfileInfo,
    text_readability: TextReadability,
    verdict: presscheck_core::PrintabilityVerdict,
) -> AnalysisReport {
    AnalysisReport {
        file_name: doc.file_name.to_string(),
        file_type: doc.format,
        file_size: format_file_size(doc.bytes.len()),
        dimensions,
        physical_dimensions,
        resolution,
        color_space,
        icc,
        text_readability,
        printability: Printability {
            status: verdict.status,
            issues: verdict.issues,
        },
        recommendations: verdict.recommendations,
    }
}

// -- Unit helpers -------------------------------------------------------------

/// Round to one decimal place.
pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Width and height of the first box matched by `pattern`, whose four
/// captures are the corners `x0 y0 x1 y1`. `None` if any corner fails to
/// parse.
pub fn page_extent(pattern: &Regex, text: &str) -> Option<(f64, f64)> {
    let caps = pattern.captures(text)?;
    let mut corners = [0.0_f64; 4];
    for (slot, idx) in corners.iter_mut().zip(1..=4) {
        *slot = caps.get(idx)?.as_str().parse().ok()?;
    }
    let [x0, y0, x1, y1] = corners;
    Some(((x1 - x0).abs(), (y1 - y0).abs()))
}

/// PostScript points to millimetres, one decimal.
pub fn points_to_mm(points: f64) -> f64 {
    round_tenths(points * MM_PER_POINT)
}

/// Pixels at `dpi` to millimetres, one decimal.
pub fn px_to_mm(px: u32, dpi: u32) -> f64 {
    if dpi == 0 {
        return 0.0;
    }
    round_tenths(f64::from(px) / f64::from(dpi) * MM_PER_INCH)
}

/// Human-readable size: bytes below 1 KiB, then KB and MB with two decimals.
pub fn format_file_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let size = bytes as f64;
    if bytes < 1024 {
        format!("{bytes} B")
    } else if size < KIB * KIB {
        format!("{:.2} KB", size / KIB)
    } else {
        format!("{:.2} MB", size / (KIB * KIB))
    }
}
