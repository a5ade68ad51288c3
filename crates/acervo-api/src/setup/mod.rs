//! Application setup and initialization
//!
//! All wiring lives here so `main` stays a thin shell and integration tests
//! can build the same router with test collaborators.

pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use acervo_core::{ArrayFieldPolicy, Config};
use acervo_db::PgDocumentStore;
use acervo_repositorio::{RepositorioClient, RepositorioConfig};

use crate::state::AppState;

/// Initialize the entire application.
pub async fn initialize_app(config: &Config) -> Result<(Arc<AppState>, axum::Router)> {
    let pool = database::setup_database(config).await?;
    let store = Arc::new(PgDocumentStore::new(pool));

    let uploader = Arc::new(
        RepositorioClient::new(RepositorioConfig {
            base_url: config.repositorio_base_url.clone(),
            username: config.repositorio_username.clone(),
            password: config.repositorio_password.clone(),
            folder: config.repositorio_folder.clone(),
            timeout: Duration::from_secs(config.upstream_timeout_secs),
        })
        .context("Failed to create repository client")?,
    );

    let state = Arc::new(AppState {
        store,
        uploader,
        array_fields: ArrayFieldPolicy::new(config.array_fields.clone()),
    });

    let router = routes::build_router(state.clone());
    Ok((state, router))
}
