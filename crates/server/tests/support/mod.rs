#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::Service;
use uuid::Uuid;

use server::auth::AdminCredentials;
use server::routes;
use server::state::{CatalogState, RegistryState};
use service::catalog::FileCatalog;
use service::registry::InMemoryRegistry;
use service::storage::upload_store::UploadStore;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "test-pass";
pub const BOUNDARY: &str = "projects-test-boundary";

pub fn registry_app() -> Router {
    let state = RegistryState {
        registry: Arc::new(InMemoryRegistry::seeded()),
        credentials: Arc::new(AdminCredentials::new(ADMIN_USER, ADMIN_PASS)),
    };
    routes::build_registry_router(state, routes::registry_cors())
}

/// Temporary data file + uploads directory, removed on drop.
pub struct CatalogDir {
    pub root: PathBuf,
}

impl CatalogDir {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("catalog_it_{}", Uuid::new_v4()));
        std::fs::create_dir_all(root.join("uploads")).expect("create temp uploads");
        Self { root }
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join("projects.json")
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }

    /// A router over this directory; call again to simulate a restart.
    pub fn app(&self, body_limit: usize) -> Router {
        let uploads = UploadStore::new(self.uploads_dir());
        let state = CatalogState { catalog: FileCatalog::new(self.data_file(), uploads.clone()) };
        routes::build_catalog_router(state, &uploads, body_limit, routes::catalog_cors())
    }
}

impl Drop for CatalogDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap_or(Value::Null)
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<TestResponse> {
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?.to_vec();
    Ok(TestResponse { status, headers, bytes })
}

/// One part of a multipart body; `file_name` makes it a file part.
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self { name, file_name: None, data: value.as_bytes() }
    }

    pub fn file(name: &'a str, file_name: &'a str, data: &'a [u8]) -> Self {
        Self { name, file_name: Some(file_name), data }
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        part.name, file_name
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name).as_bytes(),
                );
            }
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(method: &str, uri: &str, parts: &[Part<'_>]) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(parts)))?)
}
