// Shared across test binaries; not every binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;

use acervo_api::setup::routes::build_router;
use acervo_api::state::AppState;
use acervo_core::ArrayFieldPolicy;
use acervo_db::MemoryDocumentStore;
use acervo_repositorio::{FileUploader, RepositorioError};

/// Uploader stub: hands back a deterministic URL per file name.
#[derive(Default)]
pub struct StubUploader;

#[async_trait]
impl FileUploader for StubUploader {
    async fn upload(&self, _data: Bytes, file_name: &str) -> Result<String, RepositorioError> {
        Ok(format!("https://cdn.example/espolios/{}", file_name))
    }
}

/// Uploader stub that always fails, as if the external service kept
/// rejecting the credentials.
pub struct FailingUploader;

#[async_trait]
impl FileUploader for FailingUploader {
    async fn upload(&self, _data: Bytes, _file_name: &str) -> Result<String, RepositorioError> {
        Err(RepositorioError::Unauthorized)
    }
}

/// Test application: the real router over the in-memory store.
pub struct TestApp {
    pub server: TestServer,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(Arc::new(StubUploader))
}

pub fn setup_test_app_with(uploader: Arc<dyn FileUploader>) -> TestApp {
    let state = Arc::new(AppState {
        store: Arc::new(MemoryDocumentStore::new()),
        uploader,
        array_fields: ArrayFieldPolicy::new(["materiais", "categoria", "lugares", "tecnicas"]),
    });
    let server = TestServer::new(build_router(state)).expect("Failed to build test server");
    TestApp { server }
}

pub const BOUNDARY: &str = "acervo-test-boundary";

pub enum TestPart<'a> {
    Field { name: &'a str, value: &'a str },
    File { file_name: &'a str, data: &'a [u8] },
}

/// Encode a multipart/form-data body with the fixed test boundary.
pub fn multipart_body(parts: &[TestPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            TestPart::Field { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            TestPart::File { file_name, data } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
