// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Restamp.

use thiserror::Error;

/// Top-level error type for all Restamp operations.
#[derive(Debug, Error)]
pub enum RestampError {
    // -- Document errors --
    #[error("PDF parse failed: {0}")]
    Parse(String),

    #[error("page {number} not found (document has {count} pages)")]
    PageNotFound { number: u32, count: usize },

    #[error("content stream serialization failed: {0}")]
    Serialization(String),

    // -- Pattern errors --
    #[error("invalid pattern: {0}")]
    Pattern(String),

    #[error("mutation predicate failed: {0}")]
    Predicate(String),

    // -- Rule files --
    #[error("rule file {path}: {reason}")]
    RuleFile { path: String, reason: String },

    // -- I/O --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RestampError>;
