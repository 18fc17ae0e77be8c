//! Common test utilities.
//!
//! Note: `#[allow(dead_code)]` because each test file compiles `common/`
//! separately.

use std::path::PathBuf;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use kidspos_db::{Database, DbConfig};
use kidspos_server::{create_router, AppState, Config};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "kidsposboundary";

/// A router over an in-memory database and a temporary upload directory.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut Config),
    {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

        let mut config = Config {
            apk_upload_dir: temp_dir.path().join("apk"),
            ..Default::default()
        };
        modifier(&mut config);

        let db = Database::new(DbConfig::in_memory())
            .await
            .expect("Failed to open in-memory database");

        let state = AppState::new(db, config);
        let router = create_router(state.clone());

        TestServer {
            router,
            state,
            temp_dir,
        }
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.temp_dir.path().join("apk")
    }

    /// Number of files in the upload directory.
    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.upload_dir())
            .map(|dir| dir.count())
            .unwrap_or(0)
    }

    /// Sends a request and returns status, headers and the raw body.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, body)
    }

    /// Sends a JSON request and parses the JSON response.
    pub async fn json(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(v) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_vec(&v).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let (status, _, body) = self.send(request).await;
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Posts an urlencoded form and returns status, headers and the body text.
    pub async fn form(&self, uri: &str, body: &str) -> (StatusCode, HeaderMap, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, headers, body) = self.send(request).await;
        (status, headers, String::from_utf8_lossy(&body).into_owned())
    }

    /// GETs a page and returns status and the body text.
    pub async fn page(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, _, body) = self.send(request).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    /// Posts a multipart APK upload to `uri`.
    pub async fn upload(&self, uri: &str, parts: &[Part<'_>]) -> (StatusCode, Bytes) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        let (status, _, body) = self.send(request).await;
        (status, body)
    }
}

/// One multipart part. `file_name` makes it a file part.
#[allow(dead_code)]
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub data: &'a [u8],
}

#[allow(dead_code)]
pub fn text_part<'a>(name: &'a str, value: &'a str) -> Part<'a> {
    Part {
        name,
        file_name: None,
        data: value.as_bytes(),
    }
}

#[allow(dead_code)]
pub fn file_part<'a>(file_name: &'a str, data: &'a [u8]) -> Part<'a> {
    Part {
        name: "file",
        file_name: Some(file_name),
        data,
    }
}

/// Standard APK upload form for `version` / `code`.
#[allow(dead_code)]
pub fn apk_form<'a>(version: &'a str, code: &'a str, data: &'a [u8]) -> Vec<Part<'a>> {
    vec![
        text_part("version", version),
        text_part("versionCode", code),
        text_part("releaseNotes", "bug fixes"),
        file_part("app-release.apk", data),
    ]
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    part.name, file_name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name).as_bytes(),
            ),
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
