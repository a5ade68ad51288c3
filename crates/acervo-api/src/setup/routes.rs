//! Route configuration and setup

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::constants::MAX_BODY_BYTES;
use crate::handlers::{espolios, ingest};
use crate::state::AppState;

/// Build the application router. Collection names are path parameters and
/// are not validated against any schema.
pub fn build_router(state: Arc<AppState>) -> Router {
    // the API serves a browser frontend; origins are not restricted
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/espolios/{collection}",
            get(espolios::list_documents).post(ingest::create_document),
        )
        .route(
            "/espolios/{collection}/{id}",
            get(espolios::get_document)
                .put(ingest::update_document)
                .delete(espolios::delete_document),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
