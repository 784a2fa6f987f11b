// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// presscheck-analyzer — Print-readiness analyzers for newsprint submissions.
//
// Byte-level decoders for PDF, JPEG, TIFF and EPS extract dimensions,
// resolution, colour model, ICC profile and text-size hints; the policy
// module turns those into a ready/warning/error verdict, and the report
// module assembles the uniform `AnalysisReport`.

pub mod byte_view;
pub mod density;
pub mod dispatch;
pub mod eps;
pub mod jpeg;
pub mod pdf;
pub mod policy;
pub mod profile;
pub mod report;
pub mod tiff;

// Re-export the entry points at the crate root.
pub use dispatch::{
    BatchItem, analyze, analyze_batch, analyze_named, analyze_outcome, analyze_path,
};
