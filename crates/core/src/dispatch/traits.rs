//! Trait definitions for the dispatch module.

use std::path::Path;

use super::error::DispatchError;
use super::types::InvocationHandle;

/// Launches downstream processing for a materialized file.
pub trait Dispatcher: Send + Sync {
    /// Returns the name of this dispatcher implementation.
    fn name(&self) -> &str;

    /// Starts processing `input` without waiting for it to finish.
    ///
    /// Must be called from within a tokio runtime.
    fn dispatch(&self, input: &Path) -> Result<InvocationHandle, DispatchError>;
}
