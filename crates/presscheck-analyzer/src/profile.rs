// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ICC profile identification by keyword sniffing.

use presscheck_core::IccProfileName;

/// Where the profile text came from. Each source recognises a slightly
/// different keyword set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSource {
    /// Whole PDF body.
    PdfBody,
    /// Payload of a JPEG `ICC_PROFILE` APP2 segment.
    JpegSegment,
    /// Leading bytes of a TIFF InterColorProfile (tag 34675).
    TiffTag,
}

struct Keyword {
    needle: &'static str,
    name: IccProfileName,
    sources: &'static [ProfileSource],
}

const ALL: &[ProfileSource] = &[
    ProfileSource::PdfBody,
    ProfileSource::JpegSegment,
    ProfileSource::TiffTag,
];
const RASTER: &[ProfileSource] = &[ProfileSource::JpegSegment, ProfileSource::TiffTag];
const JPEG: &[ProfileSource] = &[ProfileSource::JpegSegment];

// Checked in order; the first hit wins.
const KEYWORDS: &[Keyword] = &[
    Keyword {
        needle: "ISONewspaper",
        name: IccProfileName::IsoNewspaper,
        sources: ALL,
    },
    Keyword {
        needle: "ISOnewspaper",
        name: IccProfileName::IsoNewspaper,
        sources: ALL,
    },
    Keyword {
        needle: "Eurostandard",
        name: IccProfileName::Euroestandar,
        sources: ALL,
    },
    Keyword {
        needle: "EuroStandard",
        name: IccProfileName::Euroestandar,
        sources: ALL,
    },
    Keyword {
        needle: "sRGB",
        name: IccProfileName::Srgb,
        sources: ALL,
    },
    Keyword {
        needle: "AdobeRGB",
        name: IccProfileName::AdobeRgb,
        sources: ALL,
    },
    Keyword {
        needle: "Adobe RGB",
        name: IccProfileName::AdobeRgb,
        sources: RASTER,
    },
    Keyword {
        needle: "Display P3",
        name: IccProfileName::DisplayP3,
        sources: JPEG,
    },
    Keyword {
        needle: "CMYK",
        name: IccProfileName::CmykProfile,
        sources: JPEG,
    },
];

/// Name the profile described by `text`, if any known keyword occurs in it.
pub fn identify_profile(text: &str, source: ProfileSource) -> Option<IccProfileName> {
    KEYWORDS
        .iter()
        .filter(|kw| kw.sources.contains(&source))
        .find(|kw| text.contains(kw.needle))
        .map(|kw| kw.name)
}
