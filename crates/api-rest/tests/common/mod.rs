#![allow(dead_code)]

use api_rest::{build_router, AppState, RouterOptions};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use folio_core::{CoreConfig, DeploymentMode, LocalFs, ResourceStore};
use http_body_util::BodyExt;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "folio-test-boundary";

/// A router over a fresh public tree and upload directory.
pub struct TestApp {
    _dir: TempDir,
    pub public_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let public_dir = dir.path().join("public");
        let upload_dir = dir.path().join("uploads");
        std::fs::create_dir_all(&upload_dir).unwrap();

        let cfg = CoreConfig::new(
            public_dir.clone(),
            upload_dir.clone(),
            DeploymentMode::Production,
            3020,
        );
        let store = ResourceStore::open(Arc::new(LocalFs::new()), &cfg).unwrap();
        let options = RouterOptions {
            max_upload_bytes: 1024 * 1024,
            permissive_cors: false,
            static_dir: Some(public_dir.clone()),
        };
        let router = build_router(AppState::new(store, upload_dir.clone()), &options);

        Self {
            _dir: dir,
            public_dir,
            upload_dir,
            router,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    pub async fn json(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let (status, bytes) = self.send(request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Number of files left behind in the upload directory.
    pub fn leftover_uploads(&self) -> usize {
        std::fs::read_dir(&self.upload_dir).unwrap().count()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a `multipart/form-data` request with text `fields` and an optional `images` file.
pub fn multipart_request(
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
    image: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"images\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
