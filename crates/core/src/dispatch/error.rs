//! Error types for the dispatch module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when launching the transcoder.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The transcoder process could not be started.
    #[error("Failed to start transcoder '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The file to hand off does not exist.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },
}

impl DispatchError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SpawnFailed { .. } => "spawn_failed",
            Self::InputNotFound { .. } => "input_not_found",
        }
    }
}
