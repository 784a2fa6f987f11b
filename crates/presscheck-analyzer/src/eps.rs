// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// EPS analysis from DSC comments and PostScript colour operators.

use std::sync::LazyLock;

use presscheck_core::{
    AnalysisReport, ColorSpace, FileFormat, IccProfileInfo, PolicyConfig, RawDocument,
};
use regex::Regex;
use tracing::{debug, instrument};

use crate::byte_view::ByteView;
use crate::report::{self, Findings, PageFindings, PageText};

static BOUNDING_BOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%%BoundingBox:\s*(-?\d+)\s+(-?\d+)\s+(-?\d+)\s+(-?\d+)")
        .expect("valid BoundingBox regex")
});

static HIRES_BOUNDING_BOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%%HiResBoundingBox:\s*([\d.-]+)\s+([\d.-]+)\s+([\d.-]+)\s+([\d.-]+)")
        .expect("valid HiResBoundingBox regex")
});

#[instrument(skip(bytes, config), fields(size = bytes.len()))]
pub fn analyze(bytes: &[u8], file_name: &str, config: &PolicyConfig) -> AnalysisReport {
    let doc = RawDocument::new(bytes, file_name, FileFormat::Eps);
    report::assemble(&doc, Findings::Page(decode(bytes)), config)
}

pub fn decode(bytes: &[u8]) -> PageFindings {
    let text = ByteView::new(bytes).to_latin1();

    let (width_pt, height_pt) = report::page_extent(&HIRES_BOUNDING_BOX, &text)
        .or_else(|| report::page_extent(&BOUNDING_BOX, &text))
        .unwrap_or((0.0, 0.0));
    let color_space = color_space(&text);

    debug!(width_pt, height_pt, %color_space, "EPS decoded");

    PageFindings {
        width_pt,
        height_pt,
        color_space,
        icc: IccProfileInfo::absent(),
        text: PageText::Vector,
    }
}

fn color_space(text: &str) -> ColorSpace {
    if text.contains("setcmykcolor") || text.contains("/DeviceCMYK") {
        ColorSpace::Cmyk
    } else if text.contains("setrgbcolor") || text.contains("/DeviceRGB") {
        ColorSpace::Rgb
    } else if text.contains("setgray") || text.contains("/DeviceGray") {
        ColorSpace::Grayscale
    } else {
        ColorSpace::Unknown
    }
}
