//! Trait definitions for the acquire module.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use super::error::AcquireError;
use crate::storage::LocalFile;

/// Something that can materialize a remote video as a local file.
#[async_trait]
pub trait Acquirer: Send + Sync {
    /// Returns the name of this acquirer implementation.
    fn name(&self) -> &str;

    /// Downloads `url` into `dest_dir`, creating the directory if needed.
    ///
    /// `deadline` bounds each attempt and is re-armed on every redirect hop.
    /// On failure no partial file is left in `dest_dir`.
    async fn acquire(
        &self,
        url: &str,
        dest_dir: &Path,
        deadline: Duration,
    ) -> Result<LocalFile, AcquireError>;
}
