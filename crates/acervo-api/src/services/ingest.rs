//! Ingestion pipeline.
//!
//! Builds the working document for `POST` and `PUT`. JSON bodies pass
//! through without validation; multipart bodies are
//! consumed part by part in arrival order: file parts go to the upload
//! client and their URL lands at the fixed image path, field parts go
//! through the field-path mapper. Parts are never processed concurrently -
//! array accumulation and the single image slot depend on arrival order.
//! Any failure aborts the request before anything reaches the store.

use acervo_core::{apply, ArrayFieldPolicy, Document, FieldPath, PathError};
use acervo_repositorio::{FileUploader, RepositorioError};
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde_json::Value;

use crate::constants::ATTACHMENT_IMAGE_PATH;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("invalid multipart payload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("invalid field name: {0}")]
    Path(#[from] PathError),

    #[error("file upload failed: {0}")]
    Upload(#[from] RepositorioError),

    #[error("unreadable request body: {0}")]
    Body(String),

    #[error("request body is not a JSON object")]
    NotAnObject,
}

/// Assemble the working document from a `POST`/`PUT` body, dispatching on
/// the content type.
pub async fn assemble_document(
    state: &AppState,
    request: Request,
) -> Result<Document, IngestError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|rejection| IngestError::Body(rejection.body_text()))?;
        ingest_multipart(multipart, &state.array_fields, state.uploader.as_ref()).await
    } else {
        let Json(value) = Json::<Value>::from_request(request, &())
            .await
            .map_err(|rejection| IngestError::Body(rejection.body_text()))?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(IngestError::NotAnObject),
        }
    }
}

/// Consume a multipart stream into one nested document.
pub async fn ingest_multipart(
    mut multipart: Multipart,
    policy: &ArrayFieldPolicy,
    uploader: &dyn FileUploader,
) -> Result<Document, IngestError> {
    let image_path = FieldPath::parse(ATTACHMENT_IMAGE_PATH)?;
    let mut document = Document::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);

        if let Some(file_name) = field.file_name().map(str::to_owned) {
            let data = field.bytes().await?;
            let url = uploader.upload(data, &file_name).await?;
            // single image slot: a later file part overwrites an earlier one
            apply(&mut document, &image_path, Value::String(url), false);
        } else {
            let Some(name) = name else {
                tracing::warn!("skipping unnamed multipart field");
                continue;
            };
            let path = FieldPath::parse(&name)?;
            let is_array = policy.is_multi_valued(path.leaf());
            let value = field.text().await?;
            apply(&mut document, &path, Value::String(value), is_array);
        }
    }

    Ok(document)
}
