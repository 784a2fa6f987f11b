// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for prepress operators.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives how the CLI presents the failure.

use crate::error::PresscheckError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something outside the file went wrong (disk, permissions). Try again.
    Transient,
    /// User must do something (fix the config, pick another file).
    ActionRequired,
    /// The file itself cannot be checked as-is.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether running the same check again could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `PresscheckError` into a `HumanError` an operator can act on.
pub fn humanize_error(err: &PresscheckError) -> HumanError {
    match err {
        // -- Analysis errors --
        PresscheckError::InvalidFormat(detail) => HumanError {
            message: "This file is damaged or isn't the type its name says.".into(),
            suggestion: format!(
                "Export the file again from the application that created it, then re-check it. ({detail})"
            ),
            retriable: false,
            severity: Severity::Permanent,
        },

        PresscheckError::UnsupportedExtension(ext) => HumanError {
            message: "This type of file can't be checked.".into(),
            suggestion: format!(
                "Save the artwork as PDF, JPEG, TIFF or EPS and check that copy instead. (File type: {ext})"
            ),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- Configuration --
        PresscheckError::Config(detail) => HumanError {
            message: "The threshold settings don't make sense.".into(),
            suggestion: format!("Fix the config file and run the check again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PresscheckError::Serialization(_) => HumanError {
            message: "The settings file couldn't be read.".into(),
            suggestion: "Make sure the config file is valid JSON, or run without --config to use the defaults.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Storage --
        PresscheckError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "Presscheck doesn't have permission to read that file.".into(),
                    suggestion: "Check the file permissions, or copy the file to a different location first.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading the file.".into(),
                    suggestion: "Try again. If this keeps happening, the disk or network share may be unavailable.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }
    }
}
