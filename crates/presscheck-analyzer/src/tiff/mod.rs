// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// TIFF analysis: reads the first image directory for dimensions,
// resolution, photometric interpretation and an embedded ICC profile.

pub mod ifd;

use presscheck_core::{
    AnalysisReport, ColorSpace, FileFormat, IccProfileInfo, PolicyConfig, PresscheckError,
    RawDocument, Result,
};
use tracing::{debug, instrument, warn};

use crate::byte_view::ByteView;
use crate::density::Density;
use crate::profile::{ProfileSource, identify_profile};
use crate::report::{self, Findings, RasterFindings};

use ifd::{
    Ifd, ResolutionTags, TAG_ICC_PROFILE, TAG_IMAGE_LENGTH, TAG_IMAGE_WIDTH, TAG_PHOTOMETRIC,
};

/// Entries read from IFD0 before giving up on a runaway directory.
pub const MAX_ENTRIES: usize = 100;
/// Leading profile bytes searched for a profile name.
pub const ICC_SNIFF_LEN: usize = 500;

#[instrument(skip(bytes, config), fields(size = bytes.len()))]
pub fn analyze(bytes: &[u8], file_name: &str, config: &PolicyConfig) -> Result<AnalysisReport> {
    let findings = decode(bytes)?;
    let doc = RawDocument::new(bytes, file_name, FileFormat::Tiff);
    Ok(report::assemble(&doc, Findings::Raster(findings), config))
}

/// Decode IFD0. Fails only when the header is not TIFF.
pub fn decode(bytes: &[u8]) -> Result<RasterFindings> {
    let view = ByteView::new(bytes);
    let header = ifd::read_header(&view).ok_or_else(|| {
        warn!("TIFF header rejected");
        PresscheckError::InvalidFormat("invalid TIFF file".into())
    })?;

    let dir = Ifd::new(view, header.endian, header.ifd0);
    let mut findings = RasterFindings {
        width_px: 0,
        height_px: 0,
        density: Density::default(),
        color_space: ColorSpace::Unknown,
        icc: IccProfileInfo::absent(),
    };
    let mut resolution = ResolutionTags::default();

    for entry in dir.entries(MAX_ENTRIES) {
        match entry.tag {
            TAG_IMAGE_WIDTH => findings.width_px = dir.dimension(&entry),
            TAG_IMAGE_LENGTH => findings.height_px = dir.dimension(&entry),
            TAG_PHOTOMETRIC => findings.color_space = photometric(dir.short(&entry)),
            TAG_ICC_PROFILE => {
                let text = dir.text(&entry, ICC_SNIFF_LEN);
                findings.icc =
                    IccProfileInfo::embedded(identify_profile(&text, ProfileSource::TiffTag));
            }
            _ => resolution.record(&dir, &entry, false),
        }
    }
    resolution.apply(&mut findings.density);

    debug!(
        width = findings.width_px,
        height = findings.height_px,
        dpi_x = findings.density.x,
        dpi_y = findings.density.y,
        color_space = %findings.color_space,
        has_icc = findings.icc.present,
        "TIFF decoded"
    );

    Ok(findings)
}

/// PhotometricInterpretation: 0/1 gray, 2 RGB, 5 separated (CMYK).
fn photometric(value: u16) -> ColorSpace {
    match value {
        0 | 1 => ColorSpace::Grayscale,
        2 => ColorSpace::Rgb,
        5 => ColorSpace::Cmyk,
        _ => ColorSpace::Unknown,
    }
}
