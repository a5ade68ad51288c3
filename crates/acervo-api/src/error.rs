//! HTTP error response conversion.
//!
//! Handlers return `Result<_, ApiError>`. Absence maps to 404 with the fixed
//! not-found message; every other failure is logged and collapsed into a 500
//! with the short per-endpoint message supplied at the failure site.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use acervo_db::StoreError;

use crate::constants::MSG_NOT_FOUND;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("item not found")]
    NotFound,

    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn internal(
        message: &'static str,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        ApiError::Internal {
            message,
            source: source.into(),
        }
    }

    /// Map a store failure: absence is 404, anything else (including a
    /// malformed identifier) is a collaborator-level 500.
    pub fn from_store(err: StoreError, message: &'static str) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
            other => ApiError::internal(message, other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: MSG_NOT_FOUND.to_string(),
                }),
            )
                .into_response(),
            ApiError::Internal { message, source } => {
                tracing::error!(error = %format!("{:#}", source), "{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: message.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn store_not_found_becomes_404() {
        let err = ApiError::from_store(StoreError::NotFound(Uuid::new_v4()), "msg");
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn malformed_id_becomes_internal() {
        let err = ApiError::from_store(StoreError::InvalidId("abc".to_string()), "msg");
        assert!(matches!(err, ApiError::Internal { message: "msg", .. }));
    }
}
