use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{ensure_object, Collection, DocumentStore, StoreError};

/// Process-local store. Used for local development without PostgreSQL and in tests.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<HashMap<(Collection, String), Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.get(&(collection, key.to_string())).cloned())
    }

    async fn set(&self, collection: Collection, key: &str, doc: &Value) -> Result<(), StoreError> {
        ensure_object(collection, key, doc)?;
        let mut docs = self.docs.write().await;
        docs.insert((collection, key.to_string()), doc.clone());
        Ok(())
    }

    async fn merge(
        &self,
        collection: Collection,
        key: &str,
        doc: &Value,
    ) -> Result<(), StoreError> {
        ensure_object(collection, key, doc)?;
        let mut docs = self.docs.write().await;
        let slot = docs
            .entry((collection, key.to_string()))
            .or_insert_with(|| Value::Object(Default::default()));

        if let (Value::Object(existing), Value::Object(incoming)) = (slot, doc) {
            for (field, value) in incoming {
                existing.insert(field.clone(), value.clone());
            }
        }
        Ok(())
    }
}
