//! Application state shared by all handlers.

use std::sync::Arc;

use acervo_core::ArrayFieldPolicy;
use acervo_db::DocumentStore;
use acervo_repositorio::FileUploader;

/// Collaborators behind the HTTP surface. Both seams are trait objects so
/// tests can wire the in-memory store and a stub uploader.
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub uploader: Arc<dyn FileUploader>,
    pub array_fields: ArrayFieldPolicy,
}
