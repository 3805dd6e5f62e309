//! Mock dispatcher for testing.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::dispatch::{DispatchError, Dispatcher, InvocationHandle};

/// Mock implementation of the Dispatcher trait.
///
/// Records every input path and never starts a process.
#[derive(Debug)]
pub struct MockDispatcher {
    inputs: Arc<Mutex<Vec<PathBuf>>>,
    /// If set, the next dispatch fails with this error.
    next_error: Arc<Mutex<Option<DispatchError>>>,
}

impl Default for MockDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

// Dispatch is synchronous, so plain mutexes; a poisoned lock still holds usable data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockDispatcher {
    /// Create a new mock dispatcher.
    pub fn new() -> Self {
        Self {
            inputs: Arc::new(Mutex::new(Vec::new())),
            next_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Get all dispatched input paths.
    pub async fn recorded_inputs(&self) -> Vec<PathBuf> {
        lock(&self.inputs).clone()
    }

    /// Configure the next dispatch to fail with the given error.
    pub async fn set_next_error(&self, error: DispatchError) {
        *lock(&self.next_error) = Some(error);
    }
}

impl Dispatcher for MockDispatcher {
    fn name(&self) -> &str {
        "mock"
    }

    fn dispatch(&self, input: &Path) -> Result<InvocationHandle, DispatchError> {
        if let Some(err) = lock(&self.next_error).take() {
            return Err(err);
        }

        lock(&self.inputs).push(input.to_path_buf());

        Ok(InvocationHandle::detached(
            "mock",
            vec!["--input".to_string(), input.to_string_lossy().to_string()],
        ))
    }
}
