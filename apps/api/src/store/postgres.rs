use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

use super::{ensure_object, Collection, DocumentStore, StoreError};

/// PostgreSQL-backed store: one JSONB row per `(collection, key)`.
/// The table is created by `db::ensure_schema` at startup.
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
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(sqlx::query_scalar::<_, Value>(
            "SELECT data FROM documents WHERE collection = $1 AND key = $2",
        )
        .bind(collection.as_str())
        .bind(key)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn set(&self, collection: Collection, key: &str, doc: &Value) -> Result<(), StoreError> {
        ensure_object(collection, key, doc)?;
        sqlx::query(
            r#"
            INSERT INTO documents (collection, key, data, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (collection, key)
            DO UPDATE SET data = EXCLUDED.data, updated_at = now()
            "#,
        )
        .bind(collection.as_str())
        .bind(key)
        .bind(doc)
        .execute(&self.pool)
        .await?;

        debug!("Wrote {}/{key}", collection.as_str());
        Ok(())
    }

    async fn merge(
        &self,
        collection: Collection,
        key: &str,
        doc: &Value,
    ) -> Result<(), StoreError> {
        ensure_object(collection, key, doc)?;
        // jsonb || is a shallow, right-biased merge of top-level keys
        sqlx::query(
            r#"
            INSERT INTO documents (collection, key, data, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (collection, key)
            DO UPDATE SET data = documents.data || EXCLUDED.data, updated_at = now()
            "#,
        )
        .bind(collection.as_str())
        .bind(key)
        .bind(doc)
        .execute(&self.pool)
        .await?;

        debug!("Merged into {}/{key}", collection.as_str());
        Ok(())
    }
}
