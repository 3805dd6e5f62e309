//! reqwest-based acquirer implementation.

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{redirect, Client, Url};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::fs;
use tokio::time::timeout;

use super::error::AcquireError;
use super::traits::Acquirer;
use super::types::DownloadTask;
use crate::config::AcquirerConfig;
use crate::naming::{derive_file_name, prefixed};
use crate::storage::{write_stream, LocalFile, StorageError, StreamError};

/// Result of a single HTTP hop.
enum Hop {
    Complete,
    Redirect(String),
}

/// Downloads over HTTP(S), following redirects by hand.
pub struct HttpAcquirer {
    client: Client,
    config: AcquirerConfig,
}

impl HttpAcquirer {
    /// Creates a new acquirer with the given configuration.
    pub fn new(config: AcquirerConfig) -> Result<Self, reqwest::Error> {
        // Redirects are walked manually so the hop budget and per-hop deadline apply.
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// Creates an acquirer with default configuration.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(AcquirerConfig::default())
    }

    pub fn config(&self) -> &AcquirerConfig {
        &self.config
    }

    async fn prepare_dir(dest_dir: &Path) -> Result<PathBuf, AcquireError> {
        let dir_err = |source| StorageError::DirectoryCreationFailed {
            path: dest_dir.to_path_buf(),
            source,
        };

        fs::create_dir_all(dest_dir).await.map_err(dir_err)?;
        let dir = fs::canonicalize(dest_dir).await.map_err(dir_err)?;
        Ok(dir)
    }

    /// Performs one GET. Streams the body to `destination` on 2xx.
    async fn attempt(
        &self,
        url: &Url,
        destination: &Path,
        deadline: Duration,
    ) -> Result<Hop, AcquireError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify(e, deadline))?;

        let status = response.status();
        tracing::debug!(url = %url, status = %status, "Got response");

        if status.is_redirection() {
            if let Some(location) = response.headers().get(LOCATION) {
                let location = location
                    .to_str()
                    .map_err(|_| AcquireError::DownloadFailed {
                        status: status.as_u16(),
                    })?;
                return Ok(Hop::Redirect(location.to_string()));
            }
        }

        if !status.is_success() {
            return Err(AcquireError::DownloadFailed {
                status: status.as_u16(),
            });
        }

        write_stream(destination, response.bytes_stream(), None)
            .await
            .map_err(|e| match e {
                StreamError::Source(e) => classify(e, deadline),
                StreamError::Io { path, source } => {
                    StorageError::WriteFailed { path, source }.into()
                }
                StreamError::LimitExceeded { limit } => StorageError::TooLarge { limit }.into(),
            })?;

        Ok(Hop::Complete)
    }

    async fn run(&self, task: &mut DownloadTask, destination: &Path) -> Result<(), AcquireError> {
        loop {
            let hop = timeout(
                task.deadline,
                self.attempt(&task.url, destination, task.deadline),
            )
            .await;

            match hop {
                Ok(Ok(Hop::Complete)) => return Ok(()),
                Ok(Ok(Hop::Redirect(location))) => {
                    task.follow(&location, self.config.max_redirects)?;
                    tracing::debug!(
                        url = %task.url,
                        hop = task.redirects,
                        "Following redirect"
                    );
                }
                Ok(Err(e)) => return Err(e),
                Err(_) => {
                    return Err(AcquireError::Timeout {
                        timeout_ms: task.deadline.as_millis() as u64,
                    })
                }
            }
        }
    }
}

fn classify(error: reqwest::Error, deadline: Duration) -> AcquireError {
    if error.is_timeout() {
        AcquireError::Timeout {
            timeout_ms: deadline.as_millis() as u64,
        }
    } else {
        AcquireError::network(error.to_string())
    }
}

#[async_trait]
impl Acquirer for HttpAcquirer {
    fn name(&self) -> &str {
        "http"
    }

    async fn acquire(
        &self,
        url: &str,
        dest_dir: &Path,
        deadline: Duration,
    ) -> Result<LocalFile, AcquireError> {
        let source = DownloadTask::parse_source(url)?;
        let dest_dir = Self::prepare_dir(dest_dir).await?;

        let file_name = prefixed(&derive_file_name(&source));
        let destination = dest_dir.join(&file_name);

        tracing::info!(
            url = %source,
            destination = %destination.display(),
            "Downloading video"
        );

        let started = Instant::now();
        let mut task = DownloadTask::new(source, dest_dir, deadline);

        if let Err(e) = self.run(&mut task, &destination).await {
            tracing::warn!(
                url = %task.url,
                redirects = task.redirects,
                kind = e.kind(),
                error = %e,
                "Download failed"
            );
            return Err(e);
        }

        let file = LocalFile::read_back(&destination)
            .await
            .map_err(|source| StorageError::WriteFailed {
                path: destination.clone(),
                source,
            })?;

        tracing::info!(
            path = %file.path.display(),
            size_bytes = file.size_bytes,
            redirects = task.redirects,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Video downloaded"
        );

        Ok(file)
    }
}
