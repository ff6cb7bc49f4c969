//! Document Store Client — per-user JSON documents keyed by `(collection, uid)`.
//!
//! Documents are schema-on-read: the store never inspects fields. Writes are
//! last-write-wins with no versioning or conflict detection.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Briefings,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Briefings => "briefings",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Document {collection}/{key} must be a JSON object")]
    NotAnObject {
        collection: &'static str,
        key: String,
    },
}

/// Backing store for profiles and briefings.
///
/// Carried in `AppState` as `Arc<dyn DocumentStore>`; a read issued after a
/// completed write for the same key observes that write.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replaces the whole document.
    async fn set(&self, collection: Collection, key: &str, doc: &Value) -> Result<(), StoreError>;

    /// Overlays the top-level fields of `doc` onto the stored document, creating it if absent.
    async fn merge(&self, collection: Collection, key: &str, doc: &Value)
        -> Result<(), StoreError>;
}

/// Rejects non-object documents before they reach a backend.
pub(crate) fn ensure_object(
    collection: Collection,
    key: &str,
    doc: &Value,
) -> Result<(), StoreError> {
    if doc.is_object() {
        Ok(())
    } else {
        Err(StoreError::NotAnObject {
            collection: collection.as_str(),
            key: key.to_string(),
        })
    }
}
