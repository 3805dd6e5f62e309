//! Common test utilities for E2E testing with mocks.
//!
//! The fixture builds the real router around an [`Ingestor`] whose acquirer
//! and dispatcher are mocks, with the input root in a temp directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use vidhook_core::{
    testing::{MockAcquirer, MockDispatcher},
    Category, Config, Ingestor,
};
use vidhook_server::api::create_router;
use vidhook_server::state::AppState;

const BOUNDARY: &str = "vidhook-test-boundary";

/// Test fixture with controllable mocks and a throwaway input root.
pub struct TestFixture {
    pub router: Router,
    pub acquirer: Arc<MockAcquirer>,
    pub dispatcher: Arc<MockDispatcher>,
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub raw: String,
}

/// One part of a multipart body.
pub enum Part<'a> {
    File {
        name: &'a str,
        file_name: &'a str,
        content: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

impl TestFixture {
    pub async fn new() -> Self {
        Self::with_max_upload(Config::default().storage.max_upload_bytes).await
    }

    /// Fixture with a custom upload cap.
    pub async fn with_max_upload(max_upload_bytes: u64) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let mut config = Config::default();
        config.storage.input_root = temp_dir.path().join("input");
        config.storage.max_upload_bytes = max_upload_bytes;

        let acquirer = Arc::new(MockAcquirer::new());
        let dispatcher = Arc::new(MockDispatcher::new());

        let ingestor = Ingestor::from_config(&config, acquirer.clone(), dispatcher.clone());
        let state = Arc::new(AppState::new(config, ingestor));

        Self {
            router: create_router(state),
            acquirer,
            dispatcher,
            temp_dir,
        }
    }

    pub fn input_root(&self) -> PathBuf {
        self.temp_dir.path().join("input")
    }

    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.input_root().join(category.dir_name())
    }

    /// Names of finished files in a category directory.
    pub fn files_in(&self, category: Category) -> Vec<String> {
        list_files(&self.category_dir(category))
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        self.post_raw(path, &body.to_string(), "application/json")
            .await
    }

    pub async fn post_raw(&self, path: &str, body: &str, content_type: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_multipart(&self, path: &str, parts: &[Part<'_>]) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let raw = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, raw }
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File {
                name,
                file_name,
                content,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: video/mp4\r\n\r\n");
                body.extend_from_slice(content);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn list_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.raw
        );
    };
}
