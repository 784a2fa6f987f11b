// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-text rendering of reports and failures.

use std::fmt::Write as _;

use presscheck_core::human_errors::{HumanError, Severity};
use presscheck_core::{
    AnalysisReport, Dimensions, IccProfileInfo, LengthUnit, ReadabilityStatus, ResolutionValue,
    VerdictStatus,
};

pub fn report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "== {} ({}, {}) ==",
        report.file_name, report.file_type, report.file_size
    );
    let _ = writeln!(out, "Status:       {}", status_label(report.printability.status));

    let mut dims = dimensions(&report.dimensions);
    if let Some(physical) = &report.physical_dimensions {
        let _ = write!(dims, " ({})", dimensions(physical));
    }
    let _ = writeln!(out, "Dimensions:   {dims}");

    let resolution = match report.resolution.value {
        ResolutionValue::Dpi(dpi) => format!("{dpi} dpi"),
        ResolutionValue::Vector => "vector".to_string(),
    };
    match &report.resolution.message {
        Some(message) => {
            let _ = writeln!(out, "Resolution:   {resolution} ({message})");
        }
        None => {
            let _ = writeln!(out, "Resolution:   {resolution}");
        }
    }
    let _ = writeln!(out, "Color space:  {}", report.color_space);
    let _ = writeln!(out, "ICC profile:  {}", icc(&report.icc));

    let text = &report.text_readability;
    let _ = writeln!(out, "Text:         {}", readability_label(text.status));
    for detail in &text.details {
        let _ = writeln!(out, "              {detail}");
    }

    if !report.printability.issues.is_empty() {
        let _ = writeln!(out, "Issues:");
        for issue in &report.printability.issues {
            let _ = writeln!(out, "  - {issue}");
        }
    }
    let _ = writeln!(out, "Recommendations:");
    for rec in &report.recommendations {
        let _ = writeln!(out, "  - {rec}");
    }
    out
}

pub fn failure(name: &str, err: &HumanError) -> String {
    let tag = match err.severity {
        Severity::Transient => "temporary error",
        Severity::ActionRequired => "action required",
        Severity::Permanent => "error",
    };
    let mut out = format!("== {name} ==\n{tag}: {}\n  {}\n", err.message, err.suggestion);
    if err.retriable {
        out.push_str("  Running the check again may succeed.\n");
    }
    out
}

fn dimensions(dims: &Dimensions) -> String {
    match dims.unit {
        LengthUnit::Px => format!("{} x {} px", dims.width, dims.height),
        LengthUnit::Mm => format!("{:.1} x {:.1} mm", dims.width, dims.height),
    }
}

fn icc(info: &IccProfileInfo) -> String {
    match (info.present, info.name) {
        (false, _) => "none".to_string(),
        (true, Some(name)) => name.to_string(),
        (true, None) => "embedded (unidentified)".to_string(),
    }
}

fn status_label(status: VerdictStatus) -> &'static str {
    match status {
        VerdictStatus::Ready => "READY",
        VerdictStatus::Warning => "WARNING",
        VerdictStatus::Error => "ERROR",
    }
}

fn readability_label(status: ReadabilityStatus) -> &'static str {
    match status {
        ReadabilityStatus::Legible => "legible",
        ReadabilityStatus::Warning => "borderline",
        ReadabilityStatus::NoLegible => "not legible",
        ReadabilityStatus::Unknown => "unknown",
    }
}
