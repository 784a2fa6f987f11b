// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Presscheck.

use thiserror::Error;

/// Top-level error type for all Presscheck operations.
///
/// Only structural failures surface here. Truncated segments, bad offsets
/// and unparseable metadata blocks are absorbed by the analyzers, which
/// leave the affected field at its default.
#[derive(Debug, Error)]
pub enum PresscheckError {
    // -- Analysis errors --
    #[error("invalid file format: {0}")]
    InvalidFormat(String),

    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    // -- Configuration --
    #[error("invalid policy configuration: {0}")]
    Config(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PresscheckError>;
