//! Streaming writes with guaranteed cleanup of partial files.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use super::error::StreamError;

/// Path of the in-progress file for a destination.
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

/// Removes the partial file when dropped unless committed.
///
/// Covers the case where the writing future is dropped mid-stream, e.g. when
/// an outer deadline fires.
struct PartialFile {
    path: PathBuf,
    armed: bool,
}

impl PartialFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    async fn commit(mut self, destination: &Path) -> std::io::Result<()> {
        fs::rename(&self.path, destination).await?;
        self.armed = false;
        Ok(())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = std::fs::remove_file(&self.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove partial file");
                }
            } else {
                tracing::debug!(path = %self.path.display(), "Removed partial file");
            }
        }
    }
}

/// Streams chunks into `path`, returning the number of bytes written.
///
/// Data goes to `<path>.part` first and is renamed into place only after the
/// stream ends cleanly. On any error, or if the returned future is dropped,
/// no file is left behind.
pub async fn write_stream<S, E>(
    path: &Path,
    stream: S,
    limit: Option<u64>,
) -> Result<u64, StreamError<E>>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    let io_err = |source| StreamError::Io {
        path: path.to_path_buf(),
        source,
    };

    let guard = PartialFile::new(partial_path(path));
    let mut file = File::create(&guard.path).await.map_err(io_err)?;

    let mut stream = std::pin::pin!(stream);
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(StreamError::Source)?;
        written += chunk.len() as u64;
        if let Some(limit) = limit {
            if written > limit {
                return Err(StreamError::LimitExceeded { limit });
            }
        }
        file.write_all(&chunk).await.map_err(io_err)?;
    }

    file.flush().await.map_err(io_err)?;
    file.sync_all().await.map_err(io_err)?;
    drop(file);

    guard.commit(path).await.map_err(io_err)?;
    Ok(written)
}
