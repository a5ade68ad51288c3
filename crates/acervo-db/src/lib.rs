//! Document storage layer.
//!
//! [`DocumentStore`] is the seam the API works against: five primitives over
//! a named collection, keyed by an opaque identifier the store assigns at
//! insert. Two backends implement it: Postgres (JSONB) for production and an
//! in-memory map for development and tests.

pub mod memory;
pub mod postgres;
mod store;

pub use memory::MemoryDocumentStore;
pub use postgres::{run_migrations, PgDocumentStore};
pub use store::{DocumentStore, StoreError, StoreResult, StoredDocument};
