// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JPEG analysis: walks the marker stream and collects density (JFIF,
// EXIF, Photoshop), frame size, component count and ICC profile.
//
// Every segment handler receives a sub-view bounded by the segment's
// declared length, so a corrupt length can never make a handler read
// into the next segment or past the file.

pub mod exif;
pub mod photoshop;

use presscheck_core::{
    AnalysisReport, ColorSpace, FileFormat, IccProfileInfo, PolicyConfig, PresscheckError,
    RawDocument, Result,
};
use tracing::{debug, instrument, trace};

use crate::byte_view::ByteView;
use crate::density::{self, Density};
use crate::profile::{ProfileSource, identify_profile};
use crate::report::{self, Findings, RasterFindings};

// -- Markers ------------------------------------------------------------------

const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const TEM: u8 = 0x01;
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const APP2: u8 = 0xE2;
const APP13: u8 = 0xED;

const JFIF_SIGNATURE: &[u8] = b"JFIF\0";
const ICC_SIGNATURE: &[u8] = b"ICC_PROFILE\0";
/// ICC_PROFILE signature plus chunk sequence number and chunk count.
const ICC_HEADER_LEN: usize = 14;

/// Markers that carry no length field.
fn is_standalone(marker: u8) -> bool {
    matches!(marker, SOI | TEM | 0xD0..=0xD7)
}

/// Start-of-frame markers (baseline, progressive, lossless, arithmetic).
/// C4 (DHT), C8 (JPG) and CC (DAC) are excluded.
fn is_start_of_frame(marker: u8) -> bool {
    matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF)
}

// -- Analysis -----------------------------------------------------------------

#[instrument(skip(bytes, config), fields(size = bytes.len()))]
pub fn analyze(bytes: &[u8], file_name: &str, config: &PolicyConfig) -> Result<AnalysisReport> {
    let findings = decode(bytes)?;
    let doc = RawDocument::new(bytes, file_name, FileFormat::Jpeg);
    Ok(report::assemble(&doc, Findings::Raster(findings), config))
}

/// Walk every marker up to EOI. Fails only when the SOI signature is missing.
pub fn decode(bytes: &[u8]) -> Result<RasterFindings> {
    let view = ByteView::new(bytes);
    if !view.starts_with_at(0, &[0xFF, SOI]) {
        return Err(PresscheckError::InvalidFormat("invalid JPEG file".into()));
    }

    let mut findings = RasterFindings {
        width_px: 0,
        height_px: 0,
        density: Density::default(),
        color_space: ColorSpace::Rgb,
        icc: IccProfileInfo::absent(),
    };

    let len = view.len();
    let mut offset = 2;
    while offset + 1 < len {
        if view.read_u8(offset) != 0xFF {
            offset += 1;
            continue;
        }
        // Fill bytes: advance to the last FF before the marker code.
        while offset + 1 < len && view.read_u8(offset + 1) == 0xFF {
            offset += 1;
        }
        if offset + 1 >= len {
            break;
        }

        let marker = view.read_u8(offset + 1);
        if marker == EOI {
            break;
        }
        if is_standalone(marker) {
            offset += 2;
            continue;
        }
        if offset + 3 >= len {
            break;
        }

        let length = usize::from(view.read_u16_be(offset + 2));
        if length < 2 {
            offset += 2;
            continue;
        }

        let segment = view.slice(offset + 4, offset + 2 + length);
        trace!(marker, offset, length, "Segment");
        handle_segment(marker, segment, &mut findings);
        offset += 2 + length;
    }

    debug!(
        width = findings.width_px,
        height = findings.height_px,
        dpi_x = findings.density.x,
        dpi_y = findings.density.y,
        detected = findings.density.detected,
        color_space = %findings.color_space,
        has_icc = findings.icc.present,
        "JPEG decoded"
    );

    Ok(findings)
}

fn handle_segment(marker: u8, segment: ByteView<'_>, findings: &mut RasterFindings) {
    match marker {
        APP0 if segment.len() >= 12 => read_jfif(segment, &mut findings.density),
        APP1 if segment.len() >= 8 => exif::apply_resolution(segment, &mut findings.density),
        APP2 if segment.len() >= ICC_HEADER_LEN => read_icc(segment, &mut findings.icc),
        APP13 if !findings.density.detected && segment.len() >= photoshop::SIGNATURE.len() => {
            if let Some(info) = photoshop::read_resolution(segment) {
                info.apply(&mut findings.density);
            }
        }
        m if is_start_of_frame(m) && segment.len() >= 6 => {
            findings.height_px = u32::from(segment.read_u16_be(1));
            findings.width_px = u32::from(segment.read_u16_be(3));
            match segment.read_u8(5) {
                1 => findings.color_space = ColorSpace::Grayscale,
                3 => findings.color_space = ColorSpace::Rgb,
                4 => findings.color_space = ColorSpace::Cmyk,
                _ => {}
            }
        }
        _ => {}
    }
}

/// JFIF density: unit byte at 7, X/Y density at 8/10.
/// Unit 0 only describes the aspect ratio and is ignored. An implausible X
/// rejects the segment; a zero or implausible Y repeats X.
fn read_jfif(segment: ByteView<'_>, density: &mut Density) {
    if !segment.starts_with_at(0, JFIF_SIGNATURE) {
        return;
    }
    let units = segment.read_u8(7);
    let x = segment.read_u16_be(8);
    if density::plausible(f64::from(x)).is_none() {
        return;
    }
    let y = segment.read_u16_be(10);
    let y = if density::plausible(f64::from(y)).is_some() {
        y
    } else {
        x
    };
    match units {
        1 => {
            density.set_x(u32::from(x));
            density.set_y(u32::from(y));
        }
        2 => {
            density.set_x(density::per_cm_to_dpi(f64::from(x)));
            density.set_y(density::per_cm_to_dpi(f64::from(y)));
        }
        _ => {}
    }
}

/// Mark the profile present and keep the last name identified across
/// chunks.
fn read_icc(segment: ByteView<'_>, icc: &mut IccProfileInfo) {
    if !segment.starts_with_at(0, ICC_SIGNATURE) {
        return;
    }
    let text = segment.latin1(ICC_HEADER_LEN, segment.len());
    let name = identify_profile(&text, ProfileSource::JpegSegment).or(icc.name);
    *icc = IccProfileInfo::embedded(name);
}
