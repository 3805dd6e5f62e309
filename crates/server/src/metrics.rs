//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the vidhook server:
//! - HTTP request metrics (latency, counts)
//! - Submission outcomes by category and source (dispatch failures included)
//! - Bytes ingested per source

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "vidhook_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.005, 0.025, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 300.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("vidhook_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "vidhook_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Ingest Metrics
// =============================================================================

/// Submissions by category, source (url/upload) and outcome (ok or error kind).
pub static SUBMISSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("vidhook_submissions_total", "Video submissions by outcome"),
        &["category", "source", "outcome"],
    )
    .unwrap()
});

/// Bytes materialized on disk by source.
pub static INGESTED_BYTES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "vidhook_ingested_bytes_total",
            "Bytes written to the input directory",
        ),
        &["source"],
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(HTTP_REQUEST_DURATION.clone()),
        Box::new(HTTP_REQUESTS_TOTAL.clone()),
        Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()),
        Box::new(SUBMISSIONS_TOTAL.clone()),
        Box::new(INGESTED_BYTES_TOTAL.clone()),
    ];

    for collector in collectors {
        if let Err(e) = registry.register(collector) {
            tracing::warn!(error = %e, "Failed to register metric");
        }
    }
}

/// Records the outcome of one submission.
pub fn record_submission(category: &str, source: &str, outcome: &str) {
    SUBMISSIONS_TOTAL
        .with_label_values(&[category, source, outcome])
        .inc();
}

/// Encodes all registered metrics in the Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
