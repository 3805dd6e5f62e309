use serde::Serialize;
use uuid::Uuid;

use crate::category::Category;
use crate::storage::LocalFile;

/// Where a submission's bytes come from. Exactly one source per submission.
#[derive(Debug, Clone)]
pub enum SubmissionSource {
    /// Remote URL still to be acquired.
    Url(String),
    /// Body already written by the upload path.
    Uploaded(LocalFile),
}

/// A routed submission, ready for ingestion.
#[derive(Debug, Clone)]
pub struct Submission {
    pub category: Category,
    pub source: SubmissionSource,
}

impl Submission {
    pub fn from_url(category: Category, url: impl Into<String>) -> Self {
        Self {
            category,
            source: SubmissionSource::Url(url.into()),
        }
    }

    pub fn from_upload(category: Category, file: LocalFile) -> Self {
        Self {
            category,
            source: SubmissionSource::Uploaded(file),
        }
    }
}

/// Outcome of a successful ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReceipt {
    pub category: Category,
    pub file: LocalFile,
    pub invocation_id: Uuid,
    pub message: String,
    /// Set when the submission came in as a URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}
