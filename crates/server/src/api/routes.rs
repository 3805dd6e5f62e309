use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::middleware::metrics_middleware;
use super::webhook;
use crate::state::AppState;

/// Headroom above the upload cap for multipart boundaries and text fields.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = state
        .config()
        .storage
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/webhook/video-upload/{*rest}", post(webhook::video_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
