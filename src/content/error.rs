//! Error types for the content access layer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading publication content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Requested content does not exist.
    #[error("content not found: {0}")]
    NotFound(String),

    /// Image name contained a path separator or parent reference.
    #[error("invalid image name: {0}")]
    InvalidImageName(String),

    /// Current-issue pointer file did not contain an integer.
    #[error("invalid current-issue pointer: {0:?}")]
    InvalidIssuePointer(String),

    /// File could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decoding or encoding failed.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

impl ContentError {
    /// Whether this error maps to a missing-resource response.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidImageName(_))
    }
}
