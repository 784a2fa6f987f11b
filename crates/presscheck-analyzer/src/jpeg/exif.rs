// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// EXIF (APP1) resolution tags.

use tracing::{debug, warn};

use crate::byte_view::ByteView;
use crate::density::Density;
use crate::tiff::ifd::{self, Ifd, ResolutionTags};

pub const SIGNATURE: &[u8] = b"Exif\0\0";

/// Directories declaring this many entries or more are treated as corrupt.
pub const MAX_ENTRIES: u16 = 200;

/// Read XResolution/YResolution/ResolutionUnit from IFD0 of the embedded
/// TIFF structure and let any valid axis override `density`.
pub fn apply_resolution(segment: ByteView<'_>, density: &mut Density) {
    if !segment.starts_with_at(0, SIGNATURE) {
        return;
    }
    let tiff = segment.slice(SIGNATURE.len(), segment.len());
    let Some(header) = ifd::read_header(&tiff) else {
        debug!("EXIF payload has no TIFF header");
        return;
    };

    let dir = Ifd::new(tiff, header.endian, header.ifd0);
    let count = dir.entry_count();
    if count == 0 || count >= MAX_ENTRIES {
        warn!(count, "EXIF IFD0 entry count out of range, skipping");
        return;
    }

    let mut tags = ResolutionTags::default();
    for entry in dir.entries(usize::from(count)) {
        tags.record(&dir, &entry, true);
    }
    tags.apply(density);
}
