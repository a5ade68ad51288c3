use acervo_core::{Document, ID_KEY};
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

/// Storage operation errors.
///
/// A malformed identifier is a store-level fault, not a client error: callers
/// pass identifiers through opaquely and the API maps `InvalidId` to 500.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(Uuid),

    #[error("invalid document id: {0}")]
    InvalidId(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One stored record with its assigned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub body: Document,
}

impl StoredDocument {
    /// Client representation: the body with the identifier injected.
    pub fn into_value(self) -> Value {
        let mut body = self.body;
        body.insert(ID_KEY.to_string(), Value::String(self.id.to_string()));
        Value::Object(body)
    }
}

/// The five storage primitives every backend provides.
///
/// Collection names are taken as-is from the request path; no schema exists
/// to validate them against. Identifiers arrive as raw strings and are parsed
/// by the backend, so a malformed one surfaces as [`StoreError::InvalidId`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in a collection, in insertion order.
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>>;

    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<StoredDocument>;

    /// Insert a new document and return it with its assigned identifier.
    async fn insert(&self, collection: &str, body: Document) -> StoreResult<StoredDocument>;

    /// Merge `patch` into an existing document field by field (top-level
    /// keys) and return the updated record. Never creates a document.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> StoreResult<StoredDocument>;

    async fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<()>;
}

pub(crate) fn parse_id(id: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn into_value_injects_identifier() {
        let id = Uuid::new_v4();
        let mut body = Document::new();
        body.insert("nome".to_string(), json!("Prato"));

        let value = StoredDocument { id, body }.into_value();

        assert_eq!(value["nome"], json!("Prato"));
        assert_eq!(value["id"], json!(id.to_string()));
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(matches!(parse_id("not-a-uuid"), Err(StoreError::InvalidId(_))));
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).ok(), Some(id));
    }
}
