//! Error types for the acquire module.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while acquiring a remote video.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// URL is malformed or not http/https.
    #[error("Invalid source URL '{url}': {reason}")]
    InvalidSource { url: String, reason: String },

    /// Redirect chain exceeded the hop budget.
    #[error("Too many redirects (limit {max})")]
    TooManyRedirects { max: u32, last_url: String },

    /// Upstream sent a `Location` that is unparsable or not http/https.
    #[error("Invalid redirect target '{location}': {reason}")]
    InvalidRedirect { location: String, reason: String },

    /// Server answered with a status we do not download from.
    #[error("Failed to download: {status}")]
    DownloadFailed { status: u16 },

    /// Transport-level failure (DNS, connect, reset, body read).
    #[error("Network error: {reason}")]
    Network { reason: String },

    /// The per-attempt deadline expired.
    #[error("Download timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Local filesystem failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AcquireError {
    /// Creates a new invalid source error.
    pub fn invalid_source(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new invalid redirect error.
    pub fn invalid_redirect(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRedirect {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new network error.
    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network {
            reason: reason.into(),
        }
    }

    /// Whether the caller supplied bad input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidSource { .. })
    }

    /// Short stable label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidSource { .. } => "invalid_source",
            Self::TooManyRedirects { .. } => "too_many_redirects",
            Self::InvalidRedirect { .. } => "invalid_redirect",
            Self::DownloadFailed { .. } => "download_failed",
            Self::Network { .. } => "network",
            Self::Timeout { .. } => "timeout",
            Self::Storage(_) => "storage",
        }
    }
}
