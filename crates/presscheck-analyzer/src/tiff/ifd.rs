// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// TIFF header and image file directory (IFD) walking, shared by standalone
// TIFF files and the TIFF structure embedded in JPEG EXIF segments.
//
// All offsets are relative to the start of the view handed in, which is
// the TIFF header. For EXIF that view is the APP1 payload after the
// `Exif\0\0` signature, so nothing can be read outside the segment.

use crate::byte_view::{ByteView, Endian};
use crate::density::{self, Density};

pub const TIFF_MAGIC: u16 = 42;
/// Size of one IFD entry in bytes.
pub const IFD_ENTRY_LEN: usize = 12;

pub const TAG_IMAGE_WIDTH: u16 = 256;
pub const TAG_IMAGE_LENGTH: u16 = 257;
pub const TAG_PHOTOMETRIC: u16 = 262;
pub const TAG_X_RESOLUTION: u16 = 282;
pub const TAG_Y_RESOLUTION: u16 = 283;
pub const TAG_RESOLUTION_UNIT: u16 = 296;
pub const TAG_ICC_PROFILE: u16 = 34675;

pub const TYPE_SHORT: u16 = 3;
pub const TYPE_RATIONAL: u16 = 5;

/// ResolutionUnit value for centimetres.
pub const UNIT_CENTIMETRE: u16 = 3;
/// ResolutionUnit default (inches).
pub const UNIT_INCH: u16 = 2;

/// Byte order and first-directory offset from the TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    pub endian: Endian,
    pub ifd0: usize,
}

/// Validate the byte-order mark and magic number. `None` if either is wrong.
/// A header cut short after the magic yields IFD offset 0.
pub fn read_header(view: &ByteView<'_>) -> Option<TiffHeader> {
    let endian = Endian::from_mark([view.read_u8(0), view.read_u8(1)])?;
    if endian.read_u16(view, 2) != TIFF_MAGIC {
        return None;
    }
    Some(TiffHeader {
        endian,
        ifd0: endian.read_u32(view, 4) as usize,
    })
}

/// One 12-byte directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    pub tag: u16,
    pub field_type: u16,
    pub count: u32,
    /// Position of the 4-byte value/offset field within the view.
    pub value_pos: usize,
}

/// A directory located at `offset` within a TIFF view.
#[derive(Debug, Clone, Copy)]
pub struct Ifd<'a> {
    view: ByteView<'a>,
    endian: Endian,
    offset: usize,
}

impl<'a> Ifd<'a> {
    pub fn new(view: ByteView<'a>, endian: Endian, offset: usize) -> Self {
        Self {
            view,
            endian,
            offset,
        }
    }

    /// Declared number of entries. 0 when the directory lies past the end.
    pub fn entry_count(&self) -> u16 {
        self.endian.read_u16(&self.view, self.offset)
    }

    /// Up to `limit` entries, stopping early at the first one that does
    /// not fit in the view.
    pub fn entries(&self, limit: usize) -> impl Iterator<Item = IfdEntry> + use<'a> {
        let Self {
            view,
            endian,
            offset,
        } = *self;
        let count = usize::from(self.entry_count()).min(limit);
        (0..count)
            .map(move |i| offset.saturating_add(2 + i * IFD_ENTRY_LEN))
            .take_while(move |pos| pos.saturating_add(IFD_ENTRY_LEN) <= view.len())
            .map(move |pos| IfdEntry {
                tag: endian.read_u16(&view, pos),
                field_type: endian.read_u16(&view, pos + 2),
                count: endian.read_u32(&view, pos + 4),
                value_pos: pos + 8,
            })
    }

    /// SHORT stored in place.
    pub fn short(&self, entry: &IfdEntry) -> u16 {
        self.endian.read_u16(&self.view, entry.value_pos)
    }

    /// LONG stored in place, or the offset of an out-of-line value.
    pub fn long(&self, entry: &IfdEntry) -> u32 {
        self.endian.read_u32(&self.view, entry.value_pos)
    }

    /// A dimension tag: SHORT read in place, anything else as LONG.
    pub fn dimension(&self, entry: &IfdEntry) -> u32 {
        if entry.field_type == TYPE_SHORT {
            u32::from(self.short(entry))
        } else {
            self.long(entry)
        }
    }

    /// RATIONAL at the entry's value offset, kept only when both terms are
    /// non-zero and the quotient is a plausible density.
    pub fn rational(&self, entry: &IfdEntry) -> Option<f64> {
        let pos = self.long(entry) as usize;
        if pos.saturating_add(8) > self.view.len() {
            return None;
        }
        let numerator = self.endian.read_u32(&self.view, pos);
        let denominator = self.endian.read_u32(&self.view, pos + 4);
        if numerator == 0 || denominator == 0 {
            return None;
        }
        density::plausible(f64::from(numerator) / f64::from(denominator))
    }

    /// Latin-1 text of the out-of-line bytes of `entry`, capped at `max` bytes.
    pub fn text(&self, entry: &IfdEntry, max: usize) -> String {
        let start = self.long(entry) as usize;
        let len = (entry.count as usize).min(max);
        self.view.latin1(start, start.saturating_add(len))
    }
}

/// XResolution, YResolution and ResolutionUnit gathered from one directory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionTags {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub unit: u16,
}

impl Default for ResolutionTags {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            unit: UNIT_INCH,
        }
    }
}

impl ResolutionTags {
    /// Record `entry` if it is one of the resolution tags. With
    /// `strict_types`, only SHORT units and single RATIONAL values count.
    pub fn record(&mut self, ifd: &Ifd<'_>, entry: &IfdEntry, strict_types: bool) {
        let rational_ok =
            !strict_types || (entry.field_type == TYPE_RATIONAL && entry.count == 1);
        match entry.tag {
            TAG_RESOLUTION_UNIT if !strict_types || entry.field_type == TYPE_SHORT => {
                self.unit = ifd.short(entry);
            }
            TAG_X_RESOLUTION if rational_ok => self.x = ifd.rational(entry),
            TAG_Y_RESOLUTION if rational_ok => self.y = ifd.rational(entry),
            _ => {}
        }
    }

    /// Convert to dots per inch and write each axis that survives the
    /// conversion into `density`.
    pub fn apply(&self, density: &mut Density) {
        if let Some(dpi) = self.x.and_then(|v| self.to_dpi(v)) {
            density.set_x(dpi);
        }
        if let Some(dpi) = self.y.and_then(|v| self.to_dpi(v)) {
            density.set_y(dpi);
        }
    }

    fn to_dpi(&self, value: f64) -> Option<u32> {
        let per_inch = if self.unit == UNIT_CENTIMETRE {
            value * density::CM_PER_INCH
        } else {
            value
        };
        density::plausible(per_inch).map(density::to_dpi)
    }
}
