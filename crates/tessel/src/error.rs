//! Error types for Tessel operations.
//!
//! This module provides the main error type [`TesselError`] which wraps
//! the error conditions that can occur while turning a scene into code.
//! Formatting failures are deliberately absent: they are recovered inside
//! [`crate::format`] by falling back to unformatted output.

use std::io;

use thiserror::Error;

/// The main error type for Tessel operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the scene source next to the JSON error so
/// callers can point at the offending line and column.
#[derive(Debug, Error)]
pub enum TesselError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: serde_json::Error, src: String },

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for TesselError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TesselError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
