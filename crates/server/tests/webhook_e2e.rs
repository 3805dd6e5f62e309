//! End-to-end tests for the webhook surface, run in-process against mocks.

mod common;

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use serde_json::json;
use vidhook_core::{AcquireError, Category, DispatchError};

use common::{Part, TestFixture};

// =============================================================================
// URL submissions
// =============================================================================

#[tokio::test]
async fn test_url_submission_downloads_and_dispatches() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_json(
            "/webhook/video-upload/short-form",
            json!({ "videoUrl": "https://cdn.example.com/clips/launch.mp4" }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(
        response.body["message"],
        "short_form_9_16 video downloaded and processing started"
    );
    assert_eq!(
        response.body["videoUrl"],
        "https://cdn.example.com/clips/launch.mp4"
    );
    let filename = response.body["filename"].as_str().unwrap();
    assert!(filename.ends_with("_launch.mp4"), "got {}", filename);

    assert_eq!(fixture.files_in(Category::ShortForm), vec![filename]);

    let calls = fixture.acquirer.recorded_calls().await;
    assert_eq!(calls.len(), 1);
    assert!(calls[0].dest_dir.ends_with("short_form_9_16"));

    let inputs = fixture.dispatcher.recorded_inputs().await;
    assert_eq!(inputs.len(), 1);
    assert!(inputs[0].exists());
    assert!(inputs[0].ends_with(filename));
}

#[tokio::test]
async fn test_each_endpoint_routes_to_its_category() {
    let fixture = TestFixture::new().await;

    for (endpoint, category) in [
        ("short-form", Category::ShortForm),
        ("long-form", Category::LongForm),
        ("listings", Category::Listings),
        ("something-else", Category::Unknown),
    ] {
        let response = fixture
            .post_json(
                &format!("/webhook/video-upload/{}", endpoint),
                json!({ "videoUrl": "https://cdn.example.com/a.mov" }),
            )
            .await;

        assert_status!(response, StatusCode::OK);
        assert_eq!(fixture.files_in(category).len(), 1, "{}", endpoint);
    }
}

#[tokio::test]
async fn test_url_without_extension_falls_back() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_json(
            "/webhook/video-upload/listings",
            json!({ "videoUrl": "https://cdn.example.com/stream?id=42" }),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    let filename = response.body["filename"].as_str().unwrap();
    assert!(filename.ends_with("_video.mp4"), "got {}", filename);
}

#[tokio::test]
async fn test_multipart_video_url_field() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_multipart(
            "/webhook/video-upload/long-form",
            &[Part::Text {
                name: "videoUrl",
                value: "https://cdn.example.com/talk.mkv",
            }],
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["videoUrl"], "https://cdn.example.com/talk.mkv");
    assert_eq!(fixture.files_in(Category::LongForm).len(), 1);
}

#[tokio::test]
async fn test_missing_video_url_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_json("/webhook/video-upload/short-form", json!({}))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "No video URL provided");
    assert!(fixture.acquirer.recorded_calls().await.is_empty());
}

#[tokio::test]
async fn test_blank_video_url_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_json(
            "/webhook/video-upload/short-form",
            json!({ "videoUrl": "   " }),
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_raw(
            "/webhook/video-upload/short-form",
            "{not json",
            "application/json",
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_invalid_url_is_client_error() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_json(
            "/webhook/video-upload/short-form",
            json!({ "videoUrl": "ftp://cdn.example.com/a.mp4" }),
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(fixture.dispatcher.recorded_inputs().await.is_empty());
}

#[tokio::test]
async fn test_download_failure_is_server_error() {
    let fixture = TestFixture::new().await;
    fixture
        .acquirer
        .set_next_error(AcquireError::DownloadFailed { status: 404 })
        .await;

    let response = fixture
        .post_json(
            "/webhook/video-upload/short-form",
            json!({ "videoUrl": "https://cdn.example.com/gone.mp4" }),
        )
        .await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "Failed to download: 404");
    assert!(fixture.dispatcher.recorded_inputs().await.is_empty());
}

#[tokio::test]
async fn test_redirect_and_timeout_failures_are_server_errors() {
    let fixture = TestFixture::new().await;

    for error in [
        AcquireError::TooManyRedirects {
            max: 5,
            last_url: "https://cdn.example.com/loop".to_string(),
        },
        AcquireError::invalid_redirect("ftp://elsewhere/clip.mp4", "unsupported scheme 'ftp'"),
        AcquireError::Timeout { timeout_ms: 100 },
        AcquireError::network("connection reset"),
    ] {
        fixture.acquirer.set_next_error(error).await;
        let response = fixture
            .post_json(
                "/webhook/video-upload/listings",
                json!({ "videoUrl": "https://cdn.example.com/a.mp4" }),
            )
            .await;
        assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[tokio::test]
async fn test_spawn_failure_is_server_error() {
    let fixture = TestFixture::new().await;
    fixture
        .dispatcher
        .set_next_error(DispatchError::SpawnFailed {
            program: "python3".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
        .await;

    let response = fixture
        .post_json(
            "/webhook/video-upload/short-form",
            json!({ "videoUrl": "https://cdn.example.com/a.mp4" }),
        )
        .await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("python3"));
}

#[tokio::test]
async fn test_slow_downloads_are_handled_concurrently() {
    let fixture = TestFixture::new().await;
    fixture.acquirer.set_delay(Duration::from_millis(500)).await;

    let started = Instant::now();
    let (first, second) = tokio::join!(
        fixture.post_json(
            "/webhook/video-upload/short-form",
            json!({ "videoUrl": "https://cdn.example.com/one.mp4" }),
        ),
        fixture.post_json(
            "/webhook/video-upload/long-form",
            json!({ "videoUrl": "https://cdn.example.com/two.mp4" }),
        ),
    );
    let elapsed = started.elapsed();

    assert_status!(first, StatusCode::OK);
    assert_status!(second, StatusCode::OK);
    assert!(elapsed < Duration::from_millis(900), "took {:?}", elapsed);
    assert_eq!(fixture.acquirer.recorded_calls().await.len(), 2);
}

// =============================================================================
// Uploads
// =============================================================================

#[tokio::test]
async fn test_upload_is_stored_and_dispatched() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_multipart(
            "/webhook/video-upload/long-form",
            &[Part::File {
                name: "video",
                file_name: "my clip.mp4",
                content: b"fake video bytes",
            }],
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        "Long form video uploaded and processing started"
    );
    assert!(response.body.get("videoUrl").is_none());

    let filename = response.body["filename"].as_str().unwrap();
    assert!(filename.ends_with("_my_clip.mp4"), "got {}", filename);

    let path = fixture.category_dir(Category::LongForm).join(filename);
    assert_eq!(std::fs::read(&path).unwrap(), b"fake video bytes");

    assert!(fixture.acquirer.recorded_calls().await.is_empty());
    let inputs = fixture.dispatcher.recorded_inputs().await;
    assert_eq!(inputs.len(), 1);
    assert!(inputs[0].ends_with(filename));
}

#[tokio::test]
async fn test_upload_name_cannot_escape_category_dir() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_multipart(
            "/webhook/video-upload/short-form",
            &[Part::File {
                name: "video",
                file_name: "../../etc/evil.mp4",
                content: b"x",
            }],
        )
        .await;

    assert_status!(response, StatusCode::OK);
    let files = fixture.files_in(Category::ShortForm);
    assert_eq!(files.len(), 1);
    assert!(!files[0].contains('/'));
    assert!(common::list_files(fixture.temp_dir.path())
        .iter()
        .all(|name| name == "input"));
}

#[tokio::test]
async fn test_oversized_upload_is_rejected_without_leftovers() {
    let fixture = TestFixture::with_max_upload(16).await;

    let response = fixture
        .post_multipart(
            "/webhook/video-upload/short-form",
            &[Part::File {
                name: "video",
                file_name: "big.mp4",
                content: &[7u8; 64],
            }],
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert!(fixture.files_in(Category::ShortForm).is_empty());
    assert!(fixture.dispatcher.recorded_inputs().await.is_empty());
}

#[tokio::test]
async fn test_upload_at_cap_is_accepted() {
    let fixture = TestFixture::with_max_upload(16).await;

    let response = fixture
        .post_multipart(
            "/webhook/video-upload/short-form",
            &[Part::File {
                name: "video",
                file_name: "exact.mp4",
                content: &[7u8; 16],
            }],
        )
        .await;

    assert_status!(response, StatusCode::OK);
}

#[tokio::test]
async fn test_multipart_without_video_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_multipart(
            "/webhook/video-upload/short-form",
            &[Part::Text {
                name: "title",
                value: "no video here",
            }],
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "No video file or URL provided");
}

#[tokio::test]
async fn test_file_and_url_together_are_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .post_multipart(
            "/webhook/video-upload/short-form",
            &[
                Part::File {
                    name: "video",
                    file_name: "clip.mp4",
                    content: b"bytes",
                },
                Part::Text {
                    name: "videoUrl",
                    value: "https://cdn.example.com/a.mp4",
                },
            ],
        )
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert!(fixture.files_in(Category::ShortForm).is_empty());
    assert!(fixture.acquirer.recorded_calls().await.is_empty());
    assert!(fixture.dispatcher.recorded_inputs().await.is_empty());
}

// =============================================================================
// Health and metrics
// =============================================================================

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/health").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "OK");
    assert_eq!(response.body["modes"], json!(["url-download", "file-upload"]));
}

#[tokio::test]
async fn test_metrics_exposes_request_and_submission_counters() {
    let fixture = TestFixture::new().await;

    fixture
        .post_json(
            "/webhook/video-upload/short-form",
            json!({ "videoUrl": "https://cdn.example.com/a.mp4" }),
        )
        .await;
    let response = fixture.get("/metrics").await;

    assert_status!(response, StatusCode::OK);
    assert!(response.raw.contains("vidhook_http_requests_total"));
    assert!(response.raw.contains("/webhook/video-upload/{*rest}"));
    assert!(response.raw.contains("vidhook_submissions_total"));
}

#[tokio::test]
async fn test_get_on_webhook_is_not_allowed() {
    let fixture = TestFixture::new().await;

    let response = fixture.get("/webhook/video-upload/short-form").await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}
