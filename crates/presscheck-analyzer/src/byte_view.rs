// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fail-soft, bounds-checked reads over an immutable byte buffer.
//
// Every read that would run past the end yields 0 (or an empty string)
// instead of panicking, so a truncated segment degrades to "not detected"
// rather than aborting the whole scan.

/// Byte order of a TIFF structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// Decode a TIFF byte-order mark (`II` or `MM`).
    pub fn from_mark(mark: [u8; 2]) -> Option<Self> {
        match &mark {
            b"II" => Some(Self::Little),
            b"MM" => Some(Self::Big),
            _ => None,
        }
    }

    #[inline]
    pub fn read_u16(self, view: &ByteView<'_>, pos: usize) -> u16 {
        match self {
            Self::Little => view.read_u16_le(pos),
            Self::Big => view.read_u16_be(pos),
        }
    }

    #[inline]
    pub fn read_u32(self, view: &ByteView<'_>, pos: usize) -> u32 {
        match self {
            Self::Little => view.read_u32_le(pos),
            Self::Big => view.read_u32_be(pos),
        }
    }
}

/// Read-only view over a byte slice. Cheap to copy.
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    data: &'a [u8],
}

impl<'a> ByteView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// `N` bytes starting at `pos`, or `None` if any of them is missing.
    #[inline]
    fn array<const N: usize>(&self, pos: usize) -> Option<[u8; N]> {
        let end = pos.checked_add(N)?;
        self.data.get(pos..end)?.try_into().ok()
    }

    #[inline]
    pub fn read_u8(&self, pos: usize) -> u8 {
        self.data.get(pos).copied().unwrap_or(0)
    }

    #[inline]
    pub fn read_u16_be(&self, pos: usize) -> u16 {
        self.array(pos).map(u16::from_be_bytes).unwrap_or(0)
    }

    #[inline]
    pub fn read_u16_le(&self, pos: usize) -> u16 {
        self.array(pos).map(u16::from_le_bytes).unwrap_or(0)
    }

    #[inline]
    pub fn read_u32_be(&self, pos: usize) -> u32 {
        self.array(pos).map(u32::from_be_bytes).unwrap_or(0)
    }

    #[inline]
    pub fn read_u32_le(&self, pos: usize) -> u32 {
        self.array(pos).map(u32::from_le_bytes).unwrap_or(0)
    }

    /// Whether the bytes at `pos` equal `signature` exactly.
    pub fn starts_with_at(&self, pos: usize, signature: &[u8]) -> bool {
        pos.checked_add(signature.len())
            .and_then(|end| self.data.get(pos..end))
            .is_some_and(|bytes| bytes == signature)
    }

    /// Sub-view over `[start, end)`, clamped to the buffer. Offsets in the
    /// returned view are relative to `start`.
    pub fn slice(&self, start: usize, end: usize) -> ByteView<'a> {
        let end = end.min(self.data.len());
        let start = start.min(end);
        ByteView::new(&self.data[start..end])
    }

    /// Decode `[start, end)` as Latin-1. Every byte maps to exactly one
    /// char, so binary content never fails to decode.
    pub fn latin1(&self, start: usize, end: usize) -> String {
        self.slice(start, end)
            .data
            .iter()
            .map(|&b| char::from(b))
            .collect()
    }

    /// The whole buffer as Latin-1 text.
    pub fn to_latin1(&self) -> String {
        self.latin1(0, self.data.len())
    }
}
