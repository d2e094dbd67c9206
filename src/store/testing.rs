//! Substitute store implementations for tests.

use async_trait::async_trait;

use super::{Document, DocumentStore, StoreError};

/// A store whose every operation fails, for exercising 500 paths.
#[derive(Default)]
pub struct FailingStore;

impl FailingStore {
    fn fail<T>() -> Result<T, StoreError> {
        Err(StoreError::Query("injected failure".to_string()))
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert(&self, _collection: &str, _document: Document) -> Result<String, StoreError> {
        Self::fail()
    }

    async fn find_one(
        &self,
        _collection: &str,
        _filter: &Document,
    ) -> Result<Option<Document>, StoreError> {
        Self::fail()
    }

    async fn find_many(
        &self,
        _collection: &str,
        _filter: &Document,
        _limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        Self::fail()
    }

    async fn update_one(
        &self,
        _collection: &str,
        _filter: &Document,
        _fields: &Document,
    ) -> Result<bool, StoreError> {
        Self::fail()
    }

    async fn sample_one(&self, _collection: &str) -> Result<Option<Document>, StoreError> {
        Self::fail()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Self::fail()
    }
}
