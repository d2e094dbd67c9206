//! Document-store access layer.
//!
//! The application talks to its storage through the [`DocumentStore`]
//! capability trait so that operations never depend on a concrete backend.
//! Tests substitute their own implementation instead of patching globals.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

pub mod memory;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use memory::MemoryStore;

/// A schema-flexible record addressed by collection and identifier.
pub type Document = Value;

/// Collection names used by the application.
pub mod collections {
    pub const USERS: &str = "users";
    pub const IMAGES: &str = "images";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection failed: {0}")]
    Connection(String),

    #[error("store query failed: {0}")]
    Query(String),

    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Capability interface over the document store.
///
/// Filters are flat field/value maps matched against top-level document
/// fields; an empty filter matches every document in the collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document, assigning an `id` field when absent.
    /// Returns the document identifier.
    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError>;

    /// Find the first document matching the filter.
    async fn find_one(
        &self,
        collection: &str,
        filter: &Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Find up to `limit` documents matching the filter.
    async fn find_many(
        &self,
        collection: &str,
        filter: &Document,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError>;

    /// Merge `fields` into the first document matching the filter.
    /// Returns whether a document was updated.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Document,
        fields: &Document,
    ) -> Result<bool, StoreError>;

    /// Select one document from the collection at random.
    async fn sample_one(&self, collection: &str) -> Result<Option<Document>, StoreError>;

    /// Verify the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Connection helper: opens the store, verifies it answers, and returns the
/// process-wide handle.
pub async fn connect(namespace: &str) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let store = Arc::new(MemoryStore::new(namespace));
    store.ping().await?;
    info!(namespace = %namespace, "Document store connection established");
    Ok(store)
}
