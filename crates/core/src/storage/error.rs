//! Error types for the storage module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while materializing a submission on disk.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to create a category directory.
    #[error("Failed to create directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed while writing file contents.
    #[error("Failed to write file: {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The upload exceeded the configured cap.
    #[error("File too large. Maximum size is {limit} bytes")]
    TooLarge { limit: u64 },

    /// The incoming body stream broke before completion.
    #[error("Upload stream failed: {reason}")]
    SourceFailed { reason: String },
}

impl StorageError {
    /// Whether the caller caused this error.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::TooLarge { .. } | Self::SourceFailed { .. })
    }
}

/// Failure of [`write_stream`](super::write_stream), generic over the source error.
#[derive(Debug, Error)]
pub enum StreamError<E> {
    #[error("source stream failed: {0}")]
    Source(E),

    #[error("I/O error writing {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stream exceeded limit of {limit} bytes")]
    LimitExceeded { limit: u64 },
}
