// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photoshop (APP13) image resource blocks. Only ResolutionInfo (0x03ED)
// is read.
//
// Block layout: "8BIM", u16 id, Pascal name (length byte + name, padded
// to even), u32 data size, data padded to even.

use tracing::debug;

use crate::byte_view::ByteView;
use crate::density::{self, Density};

pub const SIGNATURE: &[u8] = b"Photoshop 3.0\0";
const BLOCK_TAG: &[u8] = b"8BIM";
pub const RESOLUTION_INFO: u16 = 0x03ED;
/// ResolutionInfo unit for pixels per centimetre.
const UNIT_PER_CM: u16 = 2;
const RESOLUTION_INFO_LEN: usize = 16;

/// Horizontal and vertical resolution, each present when plausible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionInfo {
    pub horizontal: Option<u32>,
    pub vertical: Option<u32>,
}

impl ResolutionInfo {
    pub fn apply(&self, density: &mut Density) {
        if let Some(dpi) = self.horizontal {
            density.set_x(dpi);
        }
        if let Some(dpi) = self.vertical {
            density.set_y(dpi);
        }
    }
}

/// Find the first ResolutionInfo block in an APP13 payload.
pub fn read_resolution(segment: ByteView<'_>) -> Option<ResolutionInfo> {
    if !segment.starts_with_at(0, SIGNATURE) {
        return None;
    }

    let mut pos = SIGNATURE.len();
    while pos.saturating_add(12) < segment.len() {
        if !segment.starts_with_at(pos, BLOCK_TAG) {
            pos += 1;
            continue;
        }

        let id = segment.read_u16_be(pos + 4);
        let name_len = usize::from(segment.read_u8(pos + 6));
        let size_pos = pos + 6 + ((name_len + 2) & !1);
        if size_pos + 4 > segment.len() {
            break;
        }
        let size = segment.read_u32_be(size_pos) as usize;
        let data_pos = size_pos + 4;

        if id == RESOLUTION_INFO {
            if data_pos + RESOLUTION_INFO_LEN > segment.len() {
                debug!("Truncated ResolutionInfo block");
                return None;
            }
            return Some(decode_block(segment.slice(data_pos, data_pos + RESOLUTION_INFO_LEN)));
        }

        pos = data_pos.saturating_add(size.saturating_add(1) & !1);
    }
    None
}

/// hRes (16.16 fixed), hResUnit, widthUnit, vRes, vResUnit, heightUnit.
fn decode_block(block: ByteView<'_>) -> ResolutionInfo {
    let axis = |value_pos: usize, unit_pos: usize| {
        let value = f64::from(block.read_u32_be(value_pos)) / 65536.0;
        let value = density::plausible(value)?;
        Some(if block.read_u16_be(unit_pos) == UNIT_PER_CM {
            density::per_cm_to_dpi(value)
        } else {
            density::to_dpi(value)
        })
    };
    ResolutionInfo {
        horizontal: axis(0, 4),
        vertical: axis(8, 12),
    }
}
