//! In-process document store backed by a map of collections.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use rand::Rng;
use serde_json::Value;
use uuid::Uuid;

use super::{Document, DocumentStore, StoreError};

/// Default store implementation holding collections in memory.
///
/// Reads and writes are short, so a synchronous `RwLock` is sufficient; no
/// lock is held across an await point.
pub struct MemoryStore {
    namespace: String,
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            collections: RwLock::new(HashMap::new()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Vec<Document>>>, StoreError> {
        self.collections
            .read()
            .map_err(|_| StoreError::Connection("collection lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<Document>>>, StoreError> {
        self.collections
            .write()
            .map_err(|_| StoreError::Connection("collection lock poisoned".to_string()))
    }
}

/// A document matches when every top-level filter field equals the
/// corresponding document field. An empty filter matches everything.
fn matches(document: &Document, filter: &Document) -> bool {
    match filter.as_object() {
        Some(fields) => fields.iter().all(|(key, expected)| {
            document.get(key).map(|actual| actual == expected).unwrap_or(false)
        }),
        None => false,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, mut document: Document) -> Result<String, StoreError> {
        let object = document
            .as_object_mut()
            .ok_or_else(|| StoreError::Query("document must be a JSON object".to_string()))?;

        let id = match object.get("id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                object.insert("id".to_string(), Value::String(id.clone()));
                id
            }
        };

        let mut collections = self.write()?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Document,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|doc| matches(doc, filter)).cloned()))
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Document,
        limit: usize,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.read()?;
        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| matches(doc, filter))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Document,
        fields: &Document,
    ) -> Result<bool, StoreError> {
        let updates = fields
            .as_object()
            .ok_or_else(|| StoreError::Query("update fields must be a JSON object".to_string()))?;

        let mut collections = self.write()?;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let Some(document) = documents.iter_mut().find(|doc| matches(doc, filter)) else {
            return Ok(false);
        };
        let object = document
            .as_object_mut()
            .ok_or_else(|| StoreError::Query("stored document is not an object".to_string()))?;
        for (key, value) in updates {
            object.insert(key.clone(), value.clone());
        }
        Ok(true)
    }

    async fn sample_one(&self, collection: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.read()?;
        Ok(collections.get(collection).and_then(|documents| {
            if documents.is_empty() {
                return None;
            }
            let index = rand::thread_rng().gen_range(0..documents.len());
            documents.get(index).cloned()
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        // Reachability check: taking the lock proves the store is usable.
        self.read().map(|_| ())
    }
}
