//! Read and delete handlers: straight pass-throughs to the store with
//! outcome-to-status translation.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::constants::{MSG_DELETE_FAILED, MSG_GET_FAILED, MSG_LIST_FAILED};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    tracing::debug!(%collection, "listing documents");
    let documents = state
        .store
        .find_all(&collection)
        .await
        .map_err(|e| ApiError::from_store(e, MSG_LIST_FAILED))?;
    Ok(Json(
        documents.into_iter().map(|d| d.into_value()).collect(),
    ))
}

pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!(%collection, %id, "fetching document");
    let document = state
        .store
        .find_by_id(&collection, &id)
        .await
        .map_err(|e| ApiError::from_store(e, MSG_GET_FAILED))?;
    Ok(Json(document.into_value()))
}

pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!(%collection, %id, "deleting document");
    state
        .store
        .delete_by_id(&collection, &id)
        .await
        .map_err(|e| ApiError::from_store(e, MSG_DELETE_FAILED))?;
    Ok(StatusCode::NO_CONTENT)
}
