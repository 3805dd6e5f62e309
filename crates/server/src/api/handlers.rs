use axum::{http::header, response::IntoResponse, Json};
use serde::Serialize;

use crate::metrics::encode_metrics;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub modes: Vec<String>,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Video transcoder webhook server running (URL + Upload mode)".to_string(),
        modes: vec!["url-download".to_string(), "file-upload".to_string()],
    })
}

/// GET /metrics
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        encode_metrics(),
    )
}
