//! Ingestion: turns a routed submission into a dispatched local file.

mod error;
mod service;
mod types;

pub use error::IngestError;
pub use service::Ingestor;
pub use types::{IngestReceipt, Submission, SubmissionSource};
