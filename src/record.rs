//! On-disk export records
//!
//! These are the shapes written by the exporter and read back by the importer.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

use crate::codec;
use crate::store::Document;

/// Aggregate manifest written next to the per-collection files.
pub const MANIFEST_FILE: &str = "complete_database_structure.json";

/// File name prefix of import reports.
pub const REPORT_PREFIX: &str = "import_report_";

/// One sampled document in JSON-safe form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub data: Map<String, JsonValue>,
}

impl From<&Document> for DocumentRecord {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            data: codec::serialize_fields(&doc.fields),
        }
    }
}

/// Estimated size of a collection.
///
/// Serialized as a bare number, `"<cap>+"` when the counting query hit its cap,
/// or `"unknown"` when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimatedCount {
    Exact(usize),
    AtLeast(usize),
    Unknown,
}

impl fmt::Display for EstimatedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimatedCount::Exact(n) => write!(f, "{n}"),
            EstimatedCount::AtLeast(n) => write!(f, "{n}+"),
            EstimatedCount::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for EstimatedCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EstimatedCount::Exact(n) => serializer.serialize_u64(*n as u64),
            other => serializer.collect_str(other),
        }
    }
}

impl<'de> Deserialize<'de> for EstimatedCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountVisitor;

        impl Visitor<'_> for CountVisitor {
            type Value = EstimatedCount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a document count, \"<n>+\" or \"unknown\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(EstimatedCount::Exact(v as usize))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                usize::try_from(v)
                    .map(EstimatedCount::Exact)
                    .map_err(|_| E::custom(format!("negative count {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                if v == "unknown" {
                    return Ok(EstimatedCount::Unknown);
                }
                v.strip_suffix('+')
                    .and_then(|n| n.parse().ok())
                    .map(EstimatedCount::AtLeast)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(CountVisitor)
    }
}

/// Export of a single collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionExport {
    pub collection_name: String,
    pub estimated_document_count: EstimatedCount,
    pub sample_documents: Vec<DocumentRecord>,
    pub sample_count: usize,
    pub exported_at: String,
}

/// Placeholder for a collection whose export failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedExport {
    pub error: String,
    pub exported_at: String,
}

/// Manifest entry for one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CollectionEntry {
    Exported(CollectionExport),
    Failed(FailedExport),
}

/// Aggregate manifest of an export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseExport {
    pub project_id: String,
    pub exported_at: String,
    pub total_collections: usize,
    pub collections: BTreeMap<String, CollectionEntry>,
}

/// Local timestamp for `*_at` fields.
pub fn timestamp_now() -> String {
    chrono::Local::now().to_rfc3339()
}
