//! Core of the vidhook ingestion gateway.
//!
//! Submissions arrive either as a remote URL or as an uploaded body. They are
//! routed to a [`Category`], materialized under the category directory, and
//! handed to the external transcoder.

pub mod acquire;
pub mod category;
pub mod config;
pub mod dispatch;
pub mod ingest;
pub mod naming;
pub mod storage;
pub mod testing;

pub use acquire::{AcquireError, Acquirer, DownloadTask, HttpAcquirer};
pub use category::{resolve_category, Category};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, AcquirerConfig,
    Config, ConfigError, ServerConfig, StorageConfig, TranscoderConfig,
};
pub use dispatch::{DispatchError, Dispatcher, InvocationHandle, OutputStream, ProcessDispatcher};
pub use ingest::{IngestError, IngestReceipt, Ingestor, Submission, SubmissionSource};
pub use naming::{derive_file_name, sanitize_file_name, FALLBACK_FILE_NAME, VIDEO_EXTENSIONS};
pub use storage::{CategoryStore, LocalFile, StorageError};
