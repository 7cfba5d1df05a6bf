//! Document store access
//!
//! The exporter and importer talk to the database only through the traits in
//! this module:
//! - [`DocumentReader`]: list collections, query with a limit, check existence
//! - [`DocumentWriter`]: everything a reader can do, plus full-replace writes
//!
//! The exporter only ever receives a reader, so the source database cannot be
//! written to from an export run.
//!
//! Two implementations are provided: [`FirestoreStore`] speaks the Firestore
//! REST API, and [`MemoryStore`] keeps everything in process and records
//! every call made against it.

use async_trait::async_trait;

use crate::codec::Fields;
use crate::error::Result;

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::{MemoryStore, StoreCall};

/// A document as read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Identifier, unique within its collection.
    pub id: String,
    /// Document body.
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Read-only access to a document database.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    /// Names of all top-level collections, in no particular order.
    async fn list_collections(&self) -> Result<Vec<String>>;

    /// Fetch at most `limit` documents from a collection.
    async fn query(&self, collection: &str, limit: usize) -> Result<Vec<Document>>;

    /// Whether a document with the given id exists in the collection.
    async fn exists(&self, collection: &str, id: &str) -> Result<bool>;
}

/// Read-write access to a document database.
#[async_trait]
pub trait DocumentWriter: DocumentReader {
    /// Create or fully replace a document.
    async fn set(&self, collection: &str, id: &str, fields: &Fields) -> Result<()>;
}
