//! # Error Types
//!
//! The error taxonomy shared across cisgap. Library crates define their own
//! `thiserror` enums and convert into [`CisgapError`] so the binary can react
//! to each outcome (re-prompt, exit code) instead of only printing it.

use thiserror::Error;

/// Top-level error type for cisgap.
#[derive(Error, Debug)]
pub enum CisgapError {
    /// The input file extension is not one of the supported formats.
    #[error("unsupported file format: {extension:?}; use PDF, DOCX, TXT, or CSV")]
    UnsupportedFormat {
        /// The offending extension, lower-cased, without the leading dot.
        extension: String,
    },

    /// A file of a recognized format could not be read or extracted.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// Path of the document being parsed.
        path: String,
        /// Underlying cause.
        reason: String,
    },

    /// The user declined to choose an input.
    #[error("no {what} selected")]
    NoSelection {
        /// Which input was being requested.
        what: String,
    },

    /// An operation was requested before its prerequisite step produced output.
    #[error("{operation} requested before {prerequisite}")]
    PrematureOperation {
        /// The operation that was attempted.
        operation: String,
        /// The step that has to run first.
        prerequisite: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CisgapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
