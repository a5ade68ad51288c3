//! Postgres backend.
//!
//! One `documents` table holds every collection: the collection name is a
//! plain text column, the body is JSONB, and the identifier is a
//! server-generated UUID. Partial updates use the JSONB `||` operator, which
//! merges top-level fields exactly like the field-level update the API
//! promises.

use acervo_core::Document;
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::{parse_id, DocumentStore, StoreError, StoreResult, StoredDocument};

/// Run pending migrations (embedded from this crate's `migrations/`).
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Document>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        StoredDocument {
            id: row.id,
            body: row.body.0,
        }
    }
}

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            "SELECT id, body FROM documents WHERE collection = $1 ORDER BY created_at, id",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<StoredDocument> {
        let id = parse_id(id)?;
        let row: Option<DocumentRow> =
            sqlx::query_as("SELECT id, body FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Into::into).ok_or(StoreError::NotFound(id))
    }

    async fn insert(&self, collection: &str, body: Document) -> StoreResult<StoredDocument> {
        let row: DocumentRow = sqlx::query_as(
            "INSERT INTO documents (collection, body) VALUES ($1, $2) RETURNING id, body",
        )
        .bind(collection)
        .bind(Json(body))
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(collection, id = %row.id, "document inserted");
        Ok(row.into())
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> StoreResult<StoredDocument> {
        let id = parse_id(id)?;
        let row: Option<DocumentRow> = sqlx::query_as(
            "UPDATE documents SET body = body || $3 \
             WHERE collection = $1 AND id = $2 RETURNING id, body",
        )
        .bind(collection)
        .bind(id)
        .bind(Json(patch))
        .fetch_optional(&self.pool)
        .await?;

        row.map(Into::into).ok_or(StoreError::NotFound(id))
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<()> {
        let id = parse_id(id)?;
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
