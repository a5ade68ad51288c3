//! HTTP façade over the document store.
//!
//! Five uniform endpoints under `/espolios/{collection}` expose the storage
//! primitives; `POST` and `PUT` additionally accept multipart forms, which
//! the ingestion pipeline turns into nested documents, uploading embedded
//! files to the external repository service along the way.

pub mod constants;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
