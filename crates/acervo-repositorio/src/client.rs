//! HTTP client for the repository service.
//!
//! Login exchange plus multipart file upload. The upload path carries the
//! one-shot retry: a 401 invalidates the cached token, logs in again, and
//! resends the same request exactly once. Every other failure is terminal
//! for the call.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::token::TokenCache;
use crate::uploader::{FileUploader, RepositorioError};

const LOGIN_PATH: &str = "/auth/login";
const UPLOAD_PATH: &str = "/repositorio/files";

/// Connection settings for [`RepositorioClient`].
#[derive(Clone, Debug)]
pub struct RepositorioConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Destination folder sent with every upload.
    pub folder: String,
    /// Applied to both the login and the upload call.
    pub timeout: Duration,
}

pub struct RepositorioClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    folder: String,
    token: TokenCache,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

impl RepositorioClient {
    pub fn new(config: RepositorioConfig) -> Result<Self, RepositorioError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username,
            password: config.password,
            folder: config.folder,
            token: TokenCache::new(),
        })
    }

    async fn login(&self) -> Result<String, RepositorioError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, LOGIN_PATH))
            .json(&LoginRequest {
                username: &self.username,
                password: &self.password,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RepositorioError::LoginFailed(status));
        }
        let body: LoginResponse = response
            .json()
            .await
            .map_err(RepositorioError::MalformedResponse)?;
        tracing::debug!("repository login succeeded");
        Ok(body.token)
    }

    /// Cached token, logging in first if the slot is empty.
    async fn current_token(&self) -> Result<String, RepositorioError> {
        if let Some(token) = self.token.get().await {
            return Ok(token);
        }
        let token = self.login().await?;
        self.token.set(token.clone()).await;
        Ok(token)
    }

    async fn send_upload(
        &self,
        token: &str,
        data: Bytes,
        file_name: &str,
    ) -> Result<reqwest::Response, RepositorioError> {
        let file = Part::stream(data).file_name(file_name.to_owned());
        let form = Form::new()
            .part("file", file)
            .text("publicFile", "true")
            .text("folder", self.folder.clone());

        let response = self
            .http
            .post(format!("{}{}", self.base_url, UPLOAD_PATH))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl FileUploader for RepositorioClient {
    async fn upload(&self, data: Bytes, file_name: &str) -> Result<String, RepositorioError> {
        let token = self.current_token().await?;
        let mut response = self.send_upload(&token, data.clone(), file_name).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(file_name, "repository rejected the token, refreshing and retrying once");
            self.token.invalidate().await;
            let fresh = self.current_token().await?;
            response = self.send_upload(&fresh, data, file_name).await?;
            if response.status() == StatusCode::UNAUTHORIZED {
                return Err(RepositorioError::Unauthorized);
            }
        }

        let status = response.status();
        if !status.is_success() {
            return Err(RepositorioError::UploadFailed(status));
        }
        let body: UploadResponse = response
            .json()
            .await
            .map_err(RepositorioError::MalformedResponse)?;
        tracing::debug!(file_name, url = %body.url, "file uploaded to repository");
        Ok(body.url)
    }
}
