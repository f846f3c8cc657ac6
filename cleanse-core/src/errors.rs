//! errors.rs - Custom error types for the cleanse-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that the runner uses to decide whether
//! a failure is local to one file or must abort the whole batch.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// This enum represents all possible error types in the `cleanse-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CleanseError {
    #[error("Couldn't find {0}")]
    MissingFile(PathBuf),

    #[error("{path}: long-form sensitive marker has no terminating '{terminator}' line")]
    MalformedSensitiveHeader { path: PathBuf, terminator: String },

    #[error("{0}: file is not valid UTF-8 text")]
    Encoding(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CleanseError {
    /// Wraps an I/O error, mapping `NotFound` to [`CleanseError::MissingFile`].
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            CleanseError::MissingFile(path)
        } else {
            CleanseError::Io { path, source }
        }
    }

    /// Whether this error should abort the batch when running fail-fast.
    ///
    /// Only a malformed marker is batch-fatal: it points at a tool/version
    /// mismatch and must not produce partially redacted output.
    pub fn is_batch_fatal(&self) -> bool {
        matches!(self, CleanseError::MalformedSensitiveHeader { .. })
    }
}
