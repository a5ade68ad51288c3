//! In-memory backend.
//!
//! Keeps documents per collection in insertion order, with the same
//! semantics as the Postgres backend (merge updates, not-found on misses,
//! `InvalidId` for malformed identifiers). Used in tests and for running the
//! API without a database.

use std::collections::HashMap;
use std::sync::RwLock;

use acervo_core::Document;
use async_trait::async_trait;
use uuid::Uuid;

use crate::store::{parse_id, DocumentStore, StoreError, StoreResult, StoredDocument};

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let collections = self.collections.read().expect("store lock poisoned");
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<StoredDocument> {
        let id = parse_id(id)?;
        let collections = self.collections.read().expect("store lock poisoned");
        collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn insert(&self, collection: &str, body: Document) -> StoreResult<StoredDocument> {
        let stored = StoredDocument {
            id: Uuid::new_v4(),
            body,
        };
        let mut collections = self.collections.write().expect("store lock poisoned");
        collections
            .entry(collection.to_owned())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> StoreResult<StoredDocument> {
        let id = parse_id(id)?;
        let mut collections = self.collections.write().expect("store lock poisoned");
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or(StoreError::NotFound(id))?;

        for (key, value) in patch {
            doc.body.insert(key, value);
        }
        Ok(doc.clone())
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<()> {
        let id = parse_id(id)?;
        let mut collections = self.collections.write().expect("store lock poisoned");
        let docs = collections
            .get_mut(collection)
            .ok_or(StoreError::NotFound(id))?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(pairs: &[(&str, serde_json::Value)]) -> Document {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn insert_then_find_back() {
        let store = MemoryDocumentStore::new();
        let created = store
            .insert("test", doc(&[("name", json!("a"))]))
            .await
            .expect("insert");

        let fetched = store
            .find_by_id("test", &created.id.to_string())
            .await
            .expect("find");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn find_all_preserves_insertion_order() {
        let store = MemoryDocumentStore::new();
        for n in 0..3 {
            store
                .insert("test", doc(&[("n", json!(n))]))
                .await
                .expect("insert");
        }
        let all = store.find_all("test").await.expect("find_all");
        let ns: Vec<_> = all.iter().map(|d| d.body["n"].clone()).collect();
        assert_eq!(ns, vec![json!(0), json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        store
            .insert("pratos", doc(&[("n", json!(1))]))
            .await
            .expect("insert");

        assert!(store.find_all("moedas").await.expect("find_all").is_empty());
    }

    #[tokio::test]
    async fn update_merges_top_level_fields() {
        let store = MemoryDocumentStore::new();
        let created = store
            .insert("test", doc(&[("a", json!(1)), ("b", json!(2))]))
            .await
            .expect("insert");

        let updated = store
            .update_by_id(
                "test",
                &created.id.to_string(),
                doc(&[("b", json!(3)), ("c", json!(4))]),
            )
            .await
            .expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.body["a"], json!(1));
        assert_eq!(updated.body["b"], json!(3));
        assert_eq!(updated.body["c"], json!(4));
    }

    #[tokio::test]
    async fn update_missing_document_is_not_found() {
        let store = MemoryDocumentStore::new();
        let err = store
            .update_by_id("test", &Uuid::new_v4().to_string(), Document::new())
            .await
            .expect_err("should miss");
        assert!(matches!(err, StoreError::NotFound(_)));
        // and nothing was created
        assert!(store.find_all("test").await.expect("find_all").is_empty());
    }

    #[tokio::test]
    async fn delete_then_find_is_not_found() {
        let store = MemoryDocumentStore::new();
        let created = store.insert("test", Document::new()).await.expect("insert");
        let id = created.id.to_string();

        store.delete_by_id("test", &id).await.expect("delete");
        let err = store.find_by_id("test", &id).await.expect_err("gone");
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn malformed_id_is_a_store_fault() {
        let store = MemoryDocumentStore::new();
        let err = store
            .find_by_id("test", "definitely-not-a-uuid")
            .await
            .expect_err("invalid");
        assert!(matches!(err, StoreError::InvalidId(_)));
    }
}
