//! Database-native value types
//!
//! A closed set of the value shapes a Firestore document field can hold.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// Field name to value mapping that makes up a document body.
pub type Fields = BTreeMap<String, FieldValue>;

/// A database-native field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Timestamp(DateTime<Utc>),
    String(String),
    Bytes(Vec<u8>),
    Reference(DocumentRef),
    GeoPoint(GeoPoint),
    Array(Vec<FieldValue>),
    Map(Fields),
}

/// Reference to another document, held as its full resource path.
///
/// The path looks like
/// `projects/{project}/databases/{database}/documents/{collection}/{id}`,
/// although any `/`-separated path ending in the document id is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    path: String,
}

impl DocumentRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Full resource path of the referenced document.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Identifier of the referenced document (last path segment).
    pub fn id(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Geographic point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl FieldValue {
    /// Short type name used in logs and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Integer(_) => "integer",
            FieldValue::Double(_) => "double",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::String(_) => "string",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::Reference(_) => "reference",
            FieldValue::GeoPoint(_) => "geopoint",
            FieldValue::Array(_) => "array",
            FieldValue::Map(_) => "map",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Double(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_id_is_last_segment() {
        let r = DocumentRef::new("projects/p/databases/(default)/documents/users/alice");
        assert_eq!(r.id(), "alice");
        assert_eq!(DocumentRef::new("bob").id(), "bob");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(FieldValue::from("x").type_name(), "string");
        assert_eq!(FieldValue::Map(Fields::new()).type_name(), "map");
    }
}
