//! Value codec between database-native and JSON-safe values
//!
//! Exported documents must survive being written to plain JSON files, so every
//! native field value is mapped onto the JSON value set:
//! - mappings and sequences are converted element-wise
//! - timestamps become epoch seconds
//! - references become `ref:<id>` strings
//!
//! The inverse direction is structural only. Reference strings stay strings.

mod converter;
mod value;

pub use converter::{
    REFERENCE_PREFIX, deserialize, deserialize_fields, serialize,
    serialize_fields,
};
pub use value::{DocumentRef, FieldValue, Fields, GeoPoint};
