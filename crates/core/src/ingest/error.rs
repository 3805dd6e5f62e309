use thiserror::Error;

use crate::acquire::AcquireError;
use crate::dispatch::DispatchError;
use crate::storage::StorageError;

/// Any failure while ingesting one submission. Always request-scoped.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Acquire(#[from] AcquireError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IngestError {
    /// Whether the caller caused this error (maps to a 400-class response).
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Acquire(e) => e.is_client_error(),
            Self::Dispatch(_) => false,
            Self::Storage(e) => e.is_client_error(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Acquire(e) => e.kind(),
            Self::Dispatch(e) => e.kind(),
            Self::Storage(_) => "storage",
        }
    }
}
