use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;

/// Errors talking to the repository service.
#[derive(Debug, thiserror::Error)]
pub enum RepositorioError {
    #[error("login rejected with status {0}")]
    LoginFailed(StatusCode),

    #[error("unauthorized after token refresh")]
    Unauthorized,

    #[error("upload rejected with status {0}")]
    UploadFailed(StatusCode),

    #[error("malformed response from repository service: {0}")]
    MalformedResponse(#[source] reqwest::Error),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Uploads one file and returns its public URL.
///
/// Object-safe so the pipeline can be tested against a stub.
#[async_trait]
pub trait FileUploader: Send + Sync {
    async fn upload(&self, data: Bytes, file_name: &str) -> Result<String, RepositorioError>;
}
