//! Mock acquirer for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::acquire::{AcquireError, Acquirer, DownloadTask};
use crate::naming::{derive_file_name, prefixed};
use crate::storage::{LocalFile, StorageError};

/// A recorded acquire call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedAcquire {
    pub url: String,
    pub dest_dir: PathBuf,
    pub deadline: Duration,
}

/// Mock implementation of the Acquirer trait.
///
/// Writes a small file instead of downloading. URLs are still validated, so
/// malformed input fails the same way as with the real acquirer.
#[derive(Debug)]
pub struct MockAcquirer {
    calls: Arc<RwLock<Vec<RecordedAcquire>>>,
    /// If set, the next call fails with this error.
    next_error: Arc<RwLock<Option<AcquireError>>>,
    /// Bytes written for each successful call.
    content: Arc<RwLock<Vec<u8>>>,
    /// Simulated download duration.
    delay: Arc<RwLock<Duration>>,
}

impl Default for MockAcquirer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAcquirer {
    /// Create a new mock acquirer.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            content: Arc::new(RwLock::new(b"mock video".to_vec())),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
        }
    }

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedAcquire> {
        self.calls.read().await.clone()
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: AcquireError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the bytes written on success.
    pub async fn set_content(&self, content: impl Into<Vec<u8>>) {
        *self.content.write().await = content.into();
    }

    /// Set the simulated download duration.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }
}

#[async_trait]
impl Acquirer for MockAcquirer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn acquire(
        &self,
        url: &str,
        dest_dir: &Path,
        deadline: Duration,
    ) -> Result<LocalFile, AcquireError> {
        self.calls.write().await.push(RecordedAcquire {
            url: url.to_string(),
            dest_dir: dest_dir.to_path_buf(),
            deadline,
        });

        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let source = DownloadTask::parse_source(url)?;
        let path = dest_dir.join(prefixed(&derive_file_name(&source)));
        let content = self.content.read().await.clone();

        let write_err = |source| StorageError::WriteFailed {
            path: path.clone(),
            source,
        };
        tokio::fs::create_dir_all(dest_dir)
            .await
            .map_err(write_err)?;
        tokio::fs::write(&path, content).await.map_err(write_err)?;
        let file = LocalFile::read_back(&path).await.map_err(write_err)?;
        Ok(file)
    }
}
