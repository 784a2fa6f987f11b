// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Format dispatch and file loading.
//
// Routes a buffer to the analyzer for its format, and wraps the result in
// an `AnalysisOutcome` so that batch callers see failures as values.

use std::path::{Path, PathBuf};

use presscheck_core::{
    AnalysisOutcome, AnalysisReport, FileFormat, PolicyConfig, PresscheckError, Result,
};
use tracing::{info, instrument, warn};

use crate::{eps, jpeg, pdf, tiff};

/// Analyze `bytes` as `format`.
pub fn analyze(
    bytes: &[u8],
    file_name: &str,
    format: FileFormat,
    config: &PolicyConfig,
) -> Result<AnalysisReport> {
    match format {
        FileFormat::Pdf => Ok(pdf::analyze(bytes, file_name, config)),
        FileFormat::Jpeg => jpeg::analyze(bytes, file_name, config),
        FileFormat::Tiff => tiff::analyze(bytes, file_name, config),
        FileFormat::Eps => Ok(eps::analyze(bytes, file_name, config)),
    }
}

/// Analyze `bytes`, choosing the format from the extension of `file_name`.
pub fn analyze_named(
    bytes: &[u8],
    file_name: &str,
    config: &PolicyConfig,
) -> Result<AnalysisReport> {
    let format = format_for(Path::new(file_name))?;
    analyze(bytes, file_name, format, config)
}

/// Read `path` and analyze it. The extension is checked before any I/O.
#[instrument(skip(path, config), fields(path = %path.display()))]
pub fn analyze_path(path: &Path, config: &PolicyConfig) -> Result<AnalysisReport> {
    let format = format_for(path)?;
    let file_name = display_name(path);

    let bytes = std::fs::read(path)?;
    let report = analyze(&bytes, &file_name, format, config)?;
    info!(
        format = %format,
        status = ?report.printability.status,
        "Analyzed"
    );
    Ok(report)
}

/// Like [`analyze_path`] but never fails: errors become a failed outcome.
pub fn analyze_outcome(path: &Path, config: &PolicyConfig) -> AnalysisOutcome {
    let result = analyze_path(path, config);
    if let Err(err) = &result {
        warn!(path = %path.display(), error = %err, "Analysis failed");
    }
    AnalysisOutcome::from(result)
}

/// One entry of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    pub path: PathBuf,
    pub outcome: AnalysisOutcome,
}

/// Analyze every path in order. A failing file yields a failed outcome and
/// the batch continues.
pub fn analyze_batch<P: AsRef<Path>>(paths: &[P], config: &PolicyConfig) -> Vec<BatchItem> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            BatchItem {
                path: path.to_path_buf(),
                outcome: analyze_outcome(path, config),
            }
        })
        .collect()
}

fn format_for(path: &Path) -> Result<FileFormat> {
    FileFormat::from_path(path).ok_or_else(|| {
        let ext = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_else(|| display_name(path));
        PresscheckError::UnsupportedExtension(ext)
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use presscheck_core::VerdictStatus;
    use std::fs;

    const PDF: &[u8] = b"%PDF-1.4\n/MediaBox [0 0 595 842] /DeviceCMYK /F1 10 Tf\n%%EOF";

    #[test]
    fn unknown_extension_is_rejected_before_analysis() {
        let err = analyze_named(b"PK\x03\x04", "letter.docx", &PolicyConfig::default())
            .unwrap_err();
        assert!(matches!(err, PresscheckError::UnsupportedExtension(ref ext) if ext == ".docx"));

        let err = analyze_path(Path::new("/nonexistent/letter.docx"), &PolicyConfig::default())
            .unwrap_err();
        assert!(matches!(err, PresscheckError::UnsupportedExtension(_)));
    }

    #[test]
    fn extension_selects_the_analyzer() {
        let report = analyze_named(PDF, "Page.PDF", &PolicyConfig::default()).unwrap();
        assert_eq!(report.file_type, FileFormat::Pdf);
        assert_eq!(report.file_name, "Page.PDF");
    }

    #[test]
    fn signature_failures_propagate() {
        let err = analyze(b"not a jpeg", "x.jpg", FileFormat::Jpeg, &PolicyConfig::default())
            .unwrap_err();
        assert!(matches!(err, PresscheckError::InvalidFormat(_)));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ad.pdf");
        fs::write(&path, PDF).unwrap();

        let report = analyze_path(&path, &PolicyConfig::default()).unwrap();
        assert_eq!(report.file_name, "ad.pdf");
        assert_eq!(report.printability.status, VerdictStatus::Warning);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = analyze_path(&dir.path().join("gone.tif"), &PolicyConfig::default()).unwrap_err();
        assert!(matches!(err, PresscheckError::Io(_)));
    }

    #[test]
    fn batch_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.pdf");
        let bad = dir.path().join("bad.tif");
        let odd = dir.path().join("notes.txt");
        fs::write(&good, PDF).unwrap();
        fs::write(&bad, b"MM\x00\x2b").unwrap();
        fs::write(&odd, b"hello").unwrap();

        let items = analyze_batch(&[&bad, &odd, &good], &PolicyConfig::default());
        assert_eq!(items.len(), 3);
        assert!(!items[0].outcome.success);
        assert_eq!(
            items[0].outcome.error.as_deref(),
            Some("invalid file format: invalid TIFF file")
        );
        assert!(!items[1].outcome.success);
        assert!(items[2].outcome.success);
        assert_eq!(items[2].path, good);
    }

    #[test]
    fn repeated_analysis_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twice.eps");
        fs::write(&path, b"%!PS\n%%BoundingBox: 0 0 100 100\n1 0 0 setrgbcolor\n").unwrap();
        let config = PolicyConfig::default();
        let first = serde_json::to_string(&analyze_outcome(&path, &config)).unwrap();
        let second = serde_json::to_string(&analyze_outcome(&path, &config)).unwrap();
        assert_eq!(first, second);
    }
}
