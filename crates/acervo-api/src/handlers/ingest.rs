//! Create and update handlers.
//!
//! Both accept a JSON document or a multipart form; the body is assembled by
//! the ingestion pipeline before any store call, so a failed upload never
//! leaves a partial write behind.

use std::sync::Arc;

use acervo_core::strip_id;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::constants::{MSG_CREATE_FAILED, MSG_UPDATE_FAILED};
use crate::error::ApiError;
use crate::services::ingest::assemble_document;
use crate::state::AppState;

pub async fn create_document(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    request: Request,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    tracing::debug!(%collection, "creating document");
    let document = assemble_document(&state, request)
        .await
        .map_err(|e| ApiError::internal(MSG_CREATE_FAILED, e))?;

    let created = state
        .store
        .insert(&collection, document)
        .await
        .map_err(|e| ApiError::from_store(e, MSG_CREATE_FAILED))?;

    // answer with the stored state, not the request echo
    let stored = state
        .store
        .find_by_id(&collection, &created.id.to_string())
        .await
        .map_err(|e| ApiError::from_store(e, MSG_CREATE_FAILED))?;

    Ok((StatusCode::CREATED, Json(stored.into_value())))
}

pub async fn update_document(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
    request: Request,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!(%collection, %id, "updating document");
    let mut patch = assemble_document(&state, request)
        .await
        .map_err(|e| ApiError::internal(MSG_UPDATE_FAILED, e))?;

    // the identifier is immutable; a caller-supplied one never reaches the store
    strip_id(&mut patch);

    let updated = state
        .store
        .update_by_id(&collection, &id, patch)
        .await
        .map_err(|e| ApiError::from_store(e, MSG_UPDATE_FAILED))?;

    Ok(Json(updated.into_value()))
}
