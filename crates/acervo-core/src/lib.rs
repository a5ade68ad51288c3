//! Core types for the acervo document service.
//!
//! This crate holds everything that does no I/O: configuration, the document
//! value model, and the field-path mapper that rebuilds nested documents from
//! flat multipart field names.

pub mod config;
pub mod document;
pub mod fieldpath;

pub use config::Config;
pub use document::{strip_id, Document, ID_KEY};
pub use fieldpath::{apply, ArrayFieldPolicy, FieldPath, PathError};
