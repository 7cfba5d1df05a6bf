//! In-process document store
//!
//! Keeps collections in memory and records every call, which makes it the
//! substitute store for exercising the exporter and importer headlessly.
//! Failures can be injected per query or per document write.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{Document, DocumentReader, DocumentWriter};
use crate::codec::Fields;
use crate::error::{Result, StoreError};

/// A call made against a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    ListCollections,
    Query { collection: String, limit: usize },
    Exists { collection: String, id: String },
    Set { collection: String, id: String },
}

impl StoreCall {
    pub fn is_write(&self) -> bool {
        matches!(self, StoreCall::Set { .. })
    }
}

type Collections = BTreeMap<String, BTreeMap<String, Fields>>;

/// In-memory document store.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
    calls: Mutex<Vec<StoreCall>>,
    /// (collection, limit); a `None` limit fails every query on the collection.
    query_failures: Vec<(String, Option<usize>)>,
    write_failures: HashSet<(String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document.
    pub fn with_document(self, collection: &str, id: &str, fields: Fields) -> Self {
        lock(&self.collections)
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        self
    }

    /// Make queries on `collection` fail; only those with `limit` if given.
    pub fn with_query_failure(mut self, collection: &str, limit: Option<usize>) -> Self {
        self.query_failures.push((collection.to_string(), limit));
        self
    }

    /// Make writes of one document fail.
    pub fn with_write_failure(mut self, collection: &str, id: &str) -> Self {
        self.write_failures
            .insert((collection.to_string(), id.to_string()));
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    /// Number of write calls made so far.
    pub fn write_count(&self) -> usize {
        lock(&self.calls).iter().filter(|c| c.is_write()).count()
    }

    /// Current body of a document.
    pub fn document(&self, collection: &str, id: &str) -> Option<Fields> {
        lock(&self.collections)
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    fn record(&self, call: StoreCall) {
        lock(&self.calls).push(call);
    }

    fn query_fails(&self, collection: &str, limit: usize) -> bool {
        self.query_failures
            .iter()
            .any(|(name, l)| name == collection && l.is_none_or(|l| l == limit))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl DocumentReader for MemoryStore {
    async fn list_collections(&self) -> Result<Vec<String>> {
        self.record(StoreCall::ListCollections);
        Ok(lock(&self.collections).keys().cloned().collect())
    }

    async fn query(&self, collection: &str, limit: usize) -> Result<Vec<Document>> {
        self.record(StoreCall::Query {
            collection: collection.to_string(),
            limit,
        });

        if self.query_fails(collection, limit) {
            return Err(StoreError::Backend(format!("query on '{collection}' failed")).into());
        }

        Ok(lock(&self.collections)
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .take(limit)
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn exists(&self, collection: &str, id: &str) -> Result<bool> {
        self.record(StoreCall::Exists {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        Ok(self.document(collection, id).is_some())
    }
}

#[async_trait]
impl DocumentWriter for MemoryStore {
    async fn set(&self, collection: &str, id: &str, fields: &Fields) -> Result<()> {
        self.record(StoreCall::Set {
            collection: collection.to_string(),
            id: id.to_string(),
        });

        if self
            .write_failures
            .contains(&(collection.to_string(), id.to_string()))
        {
            return Err(StoreError::Backend(format!("write of '{collection}/{id}' failed")).into());
        }

        lock(&self.collections)
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::FieldValue;

    fn body(n: i64) -> Fields {
        let mut fields = Fields::new();
        fields.insert("n".into(), FieldValue::Integer(n));
        fields
    }

    #[tokio::test]
    async fn test_query_respects_limit() {
        let store = MemoryStore::new()
            .with_document("c", "a", body(1))
            .with_document("c", "b", body(2))
            .with_document("c", "d", body(3));
        let docs = store.query("c", 2).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "a");
        assert!(store.query("missing", 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_replaces_and_is_recorded() {
        let store = MemoryStore::new().with_document("c", "a", body(1));
        store.set("c", "a", &body(9)).await.unwrap();
        assert_eq!(store.document("c", "a"), Some(body(9)));
        assert_eq!(store.write_count(), 1);
        assert!(store.exists("c", "a").await.unwrap());
        assert!(!store.exists("c", "zzz").await.unwrap());
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemoryStore::new()
            .with_document("c", "a", body(1))
            .with_query_failure("c", Some(100))
            .with_write_failure("c", "bad");
        assert!(store.query("c", 5).await.is_ok());
        assert!(store.query("c", 100).await.is_err());
        assert!(store.set("c", "bad", &body(0)).await.is_err());
        assert!(store.document("c", "bad").is_none());
    }
}
