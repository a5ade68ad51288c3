//! Client for the external repository service.
//!
//! The service stores uploaded files and hands back public URLs. Access is
//! bearer-token authenticated: the token comes from a login exchange, lives
//! only in memory, and is replaced the moment the service rejects it. The
//! [`FileUploader`] trait is the seam the ingestion pipeline consumes.

mod client;
mod token;
mod uploader;

pub use client::{RepositorioClient, RepositorioConfig};
pub use token::TokenCache;
pub use uploader::{FileUploader, RepositorioError};
