use serde::Serialize;
use std::path::{Path, PathBuf};

/// A materialized submission on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalFile {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Final path component, including the prefix.
    pub file_name: String,
    /// Size read back from disk after the write completed.
    pub size_bytes: u64,
}

impl LocalFile {
    /// Builds a `LocalFile` from what is actually on disk.
    pub async fn read_back(path: &Path) -> std::io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            size_bytes: metadata.len(),
        })
    }

    /// Directory holding the file (the category directory).
    pub fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }
}
