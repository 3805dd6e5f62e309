//! Category directory management and upload materialization.

use bytes::Bytes;
use futures::Stream;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::error::{StorageError, StreamError};
use super::stream::write_stream;
use super::types::LocalFile;
use crate::category::Category;
use crate::naming::{prefixed, upload_file_name};

/// The `input/` tree with one subdirectory per category.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    root: PathBuf,
}

impl CategoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for a category (not created).
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// Creates the root directory if missing.
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageError::DirectoryCreationFailed {
                path: self.root.clone(),
                source,
            })
    }

    /// Creates the category directory if missing and returns its absolute path.
    ///
    /// Safe to race: an already existing directory is not an error.
    pub async fn ensure_dir(&self, category: Category) -> Result<PathBuf, StorageError> {
        let dir = self.category_dir(category);
        let dir_err = |source| StorageError::DirectoryCreationFailed {
            path: dir.clone(),
            source,
        };

        fs::create_dir_all(&dir).await.map_err(dir_err)?;
        fs::canonicalize(&dir).await.map_err(dir_err)
    }

    /// Writes an uploaded body into the category directory.
    ///
    /// The name goes through the same sanitize and prefix rules as downloads.
    /// Exceeding `limit` bytes removes the partial file and fails with
    /// [`StorageError::TooLarge`].
    pub async fn store_upload<S, E>(
        &self,
        category: Category,
        original_name: Option<&str>,
        stream: S,
        limit: u64,
    ) -> Result<LocalFile, StorageError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Display,
    {
        let dir = self.ensure_dir(category).await?;
        let path = dir.join(prefixed(&upload_file_name(original_name)));

        write_stream(&path, stream, Some(limit))
            .await
            .map_err(|e| match e {
                StreamError::Source(e) => StorageError::SourceFailed {
                    reason: e.to_string(),
                },
                StreamError::Io { path, source } => StorageError::WriteFailed { path, source },
                StreamError::LimitExceeded { limit } => StorageError::TooLarge { limit },
            })?;

        let file = LocalFile::read_back(&path)
            .await
            .map_err(|source| StorageError::WriteFailed {
                path: path.clone(),
                source,
            })?;

        tracing::info!(
            category = %category,
            path = %file.path.display(),
            size_bytes = file.size_bytes,
            "Upload stored"
        );

        Ok(file)
    }
}
