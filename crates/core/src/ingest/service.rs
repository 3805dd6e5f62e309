use bytes::Bytes;
use futures::Stream;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use super::error::IngestError;
use super::types::{IngestReceipt, Submission, SubmissionSource};
use crate::acquire::Acquirer;
use crate::category::Category;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::storage::{CategoryStore, LocalFile};

/// Runs submissions through acquisition (for URLs) and dispatch.
///
/// Each call is independent; nothing is queued, persisted or retried.
pub struct Ingestor {
    store: CategoryStore,
    acquirer: Arc<dyn Acquirer>,
    dispatcher: Arc<dyn Dispatcher>,
    download_timeout: Duration,
    max_upload_bytes: u64,
}

impl Ingestor {
    pub fn new(
        store: CategoryStore,
        acquirer: Arc<dyn Acquirer>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        let defaults = Config::default();
        Self {
            store,
            acquirer,
            dispatcher,
            download_timeout: defaults.acquirer.timeout(),
            max_upload_bytes: defaults.storage.max_upload_bytes,
        }
    }

    /// Builds an ingestor with limits taken from config.
    pub fn from_config(
        config: &Config,
        acquirer: Arc<dyn Acquirer>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self::new(
            CategoryStore::new(config.storage.input_root.clone()),
            acquirer,
            dispatcher,
        )
        .with_download_timeout(config.acquirer.timeout())
        .with_max_upload_bytes(config.storage.max_upload_bytes)
    }

    pub fn with_download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }

    pub fn with_max_upload_bytes(mut self, max: u64) -> Self {
        self.max_upload_bytes = max;
        self
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    /// Streams an uploaded body to disk under the category directory.
    pub async fn store_upload<S, E>(
        &self,
        category: Category,
        original_name: Option<&str>,
        body: S,
    ) -> Result<LocalFile, IngestError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Display,
    {
        Ok(self
            .store
            .store_upload(category, original_name, body, self.max_upload_bytes)
            .await?)
    }

    /// Materializes the submission if needed, then hands it to the dispatcher.
    pub async fn submit(&self, submission: Submission) -> Result<IngestReceipt, IngestError> {
        let category = submission.category;

        let (file, source_url, message) = match submission.source {
            SubmissionSource::Url(url) => {
                tracing::info!(category = %category, url = %url, "Received video URL");
                let dir = self.store.ensure_dir(category).await?;
                let file = self
                    .acquirer
                    .acquire(&url, &dir, self.download_timeout)
                    .await?;
                let message = format!(
                    "{} video downloaded and processing started",
                    category.dir_name()
                );
                (file, Some(url), message)
            }
            SubmissionSource::Uploaded(file) => {
                tracing::info!(category = %category, file = %file.file_name, "Received video upload");
                let message = format!(
                    "{} video uploaded and processing started",
                    category.label()
                );
                (file, None, message)
            }
        };

        let invocation = self.dispatcher.dispatch(&file.path)?;
        tracing::info!(
            category = %category,
            invocation = %invocation.id,
            dispatcher = self.dispatcher.name(),
            "Processing started"
        );

        Ok(IngestReceipt {
            category,
            file,
            invocation_id: invocation.id,
            message,
            source_url,
        })
    }
}
