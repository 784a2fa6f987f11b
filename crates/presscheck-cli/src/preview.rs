// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preview payloads for front ends that want to show the submitted file
// next to its report. JPEGs become a data URL an <img> can load directly,
// PDFs become raw base64 for an embedded viewer; nothing else is previewed.

use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use presscheck_core::{FileFormat, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    Image,
    Pdf,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    #[serde(rename = "type")]
    pub kind: PreviewKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Preview {
    pub fn none() -> Self {
        Self {
            kind: PreviewKind::None,
            data: None,
        }
    }
}

/// Build the preview for `bytes` of the given format.
pub fn encode(bytes: &[u8], format: Option<FileFormat>) -> Preview {
    match format {
        Some(FileFormat::Jpeg) => Preview {
            kind: PreviewKind::Image,
            data: Some(format!(
                "data:{};base64,{}",
                FileFormat::Jpeg.mime_type(),
                BASE64.encode(bytes)
            )),
        },
        Some(FileFormat::Pdf) => Preview {
            kind: PreviewKind::Pdf,
            data: Some(BASE64.encode(bytes)),
        },
        _ => Preview::none(),
    }
}

/// Read `path` and build its preview. Formats without a preview are not read.
pub fn load(path: &Path) -> Result<Preview> {
    let format = FileFormat::from_path(path);
    if !matches!(format, Some(FileFormat::Jpeg | FileFormat::Pdf)) {
        return Ok(Preview::none());
    }
    let bytes = std::fs::read(path)?;
    Ok(encode(&bytes, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_is_a_data_url() {
        let preview = encode(&[0xFF, 0xD8, 0xFF, 0xD9], Some(FileFormat::Jpeg));
        assert_eq!(preview.kind, PreviewKind::Image);
        assert_eq!(preview.data.as_deref(), Some("data:image/jpeg;base64,/9j/2Q=="));
    }

    #[test]
    fn pdf_is_raw_base64() {
        let preview = encode(b"%PDF", Some(FileFormat::Pdf));
        assert_eq!(preview.kind, PreviewKind::Pdf);
        assert_eq!(preview.data.as_deref(), Some("JVBERg=="));
    }

    #[test]
    fn other_formats_have_no_preview() {
        assert_eq!(encode(b"II*\0", Some(FileFormat::Tiff)), Preview::none());
        assert_eq!(encode(b"%!PS", Some(FileFormat::Eps)), Preview::none());
        assert_eq!(encode(b"", None), Preview::none());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_string(&encode(b"%PDF", Some(FileFormat::Pdf))).unwrap();
        assert_eq!(json, r#"{"type":"pdf","data":"JVBERg=="}"#);
        let json = serde_json::to_string(&Preview::none()).unwrap();
        assert_eq!(json, r#"{"type":"none"}"#);
    }

    #[test]
    fn load_skips_unpreviewable_files_without_reading() {
        let preview = load(Path::new("/nonexistent/scan.tif")).unwrap();
        assert_eq!(preview, Preview::none());
        assert!(load(Path::new("/nonexistent/ad.pdf")).is_err());
    }

    #[test]
    fn load_reads_jpeg_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpeg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xD9]).unwrap();
        let preview = load(&path).unwrap();
        assert_eq!(preview.kind, PreviewKind::Image);
    }
}
