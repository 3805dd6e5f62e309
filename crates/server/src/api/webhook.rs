//! `POST /webhook/video-upload/*` handler.
//!
//! One handler serves every category; the category comes from the request
//! path. The body is either multipart (a `video` file or a `videoUrl` text
//! field) or JSON `{"videoUrl": "..."}`.

use axum::{
    extract::{FromRequest, Multipart, OriginalUri, Request, State},
    http::header,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vidhook_core::{resolve_category, Category, IngestReceipt, LocalFile, Submission};

use super::error::ApiError;
use crate::metrics::{record_submission, INGESTED_BYTES_TOTAL};
use crate::state::AppState;

const VIDEO_FIELD: &str = "video";
const VIDEO_URL_FIELD: &str = "videoUrl";

#[derive(Debug, Deserialize)]
pub struct VideoUrlRequest {
    #[serde(rename = "videoUrl")]
    pub video_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    #[serde(rename = "videoUrl", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl From<IngestReceipt> for UploadResponse {
    fn from(receipt: IngestReceipt) -> Self {
        Self {
            success: true,
            message: receipt.message,
            filename: receipt.file.file_name,
            video_url: receipt.source_url,
        }
    }
}

/// What the request body resolved to, before ingestion.
enum Payload {
    Url(String),
    Upload(LocalFile),
}

/// POST /webhook/video-upload/{*rest}
pub async fn video_upload(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    request: Request,
) -> Result<Json<UploadResponse>, ApiError> {
    let category = resolve_category(uri.path());

    let payload = if is_multipart(&request) {
        read_multipart(&state, category, request).await?
    } else {
        read_json(request).await?
    };

    let (submission, source) = match payload {
        Payload::Url(url) => (Submission::from_url(category, url), "url"),
        Payload::Upload(file) => {
            INGESTED_BYTES_TOTAL
                .with_label_values(&["upload"])
                .inc_by(file.size_bytes);
            (Submission::from_upload(category, file), "upload")
        }
    };

    match state.ingestor().submit(submission).await {
        Ok(receipt) => {
            if source == "url" {
                INGESTED_BYTES_TOTAL
                    .with_label_values(&["url"])
                    .inc_by(receipt.file.size_bytes);
            }
            record_submission(category.dir_name(), source, "ok");
            Ok(Json(receipt.into()))
        }
        Err(e) => {
            record_submission(category.dir_name(), source, e.kind());
            tracing::error!(category = %category, error = %e, kind = e.kind(), "Submission failed");
            Err(e.into())
        }
    }
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

async fn read_json(request: Request) -> Result<Payload, ApiError> {
    let Json(body) = Json::<VideoUrlRequest>::from_request(request, &())
        .await
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    match body.video_url.map(|u| u.trim().to_string()) {
        Some(url) if !url.is_empty() => Ok(Payload::Url(url)),
        _ => Err(ApiError::bad_request("No video URL provided")),
    }
}

/// Walks the multipart fields, streaming a `video` file straight to disk.
///
/// Supplying both a file and a URL is rejected, and the stored file removed.
async fn read_multipart(
    state: &AppState,
    category: Category,
    request: Request,
) -> Result<Payload, ApiError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let mut upload: Option<LocalFile> = None;
    let mut url: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                discard(upload.take()).await;
                return Err(ApiError::bad_request(e.body_text()));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            VIDEO_FIELD if upload.is_none() => {
                let original_name = field.file_name().map(str::to_owned);
                let file = state
                    .ingestor()
                    .store_upload(category, original_name.as_deref(), field)
                    .await;
                match file {
                    Ok(file) => upload = Some(file),
                    Err(e) => {
                        record_submission(category.dir_name(), "upload", e.kind());
                        return Err(e.into());
                    }
                }
            }
            VIDEO_URL_FIELD => match field.text().await {
                Ok(text) if !text.trim().is_empty() => url = Some(text.trim().to_string()),
                Ok(_) => {}
                Err(e) => {
                    discard(upload.take()).await;
                    return Err(ApiError::bad_request(e.body_text()));
                }
            },
            other => tracing::debug!(field = other, "Ignoring multipart field"),
        }
    }

    match (upload, url) {
        (Some(file), None) => Ok(Payload::Upload(file)),
        (None, Some(url)) => Ok(Payload::Url(url)),
        (Some(file), Some(_)) => {
            discard(Some(file)).await;
            Err(ApiError::bad_request(
                "Provide either a video file or a videoUrl, not both",
            ))
        }
        (None, None) => Err(ApiError::bad_request("No video file or URL provided")),
    }
}

async fn discard(file: Option<LocalFile>) {
    if let Some(file) = file {
        if let Err(e) = tokio::fs::remove_file(&file.path).await {
            tracing::warn!(path = %file.path.display(), error = %e, "Failed to remove rejected upload");
        }
    }
}
