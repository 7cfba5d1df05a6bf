//! Conversion between native field values and JSON-safe values

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};

use super::value::{FieldValue, Fields};

/// Prefix marking a serialized document reference.
pub const REFERENCE_PREFIX: &str = "ref:";

/// Convert a native value into its JSON-safe form.
///
/// - Timestamps become fractional epoch seconds
/// - References become `ref:<document id>`; the collection path is dropped
/// - Bytes become a base64 string, geo points a `{latitude, longitude}` object
/// - Non-finite doubles become `null`
pub fn serialize(value: &FieldValue) -> JsonValue {
    match value {
        FieldValue::Null => JsonValue::Null,
        FieldValue::Boolean(b) => JsonValue::Bool(*b),
        FieldValue::Integer(n) => JsonValue::Number((*n).into()),
        FieldValue::Double(f) => double_to_json(*f),
        FieldValue::Timestamp(ts) => double_to_json(epoch_seconds(ts)),
        FieldValue::String(s) => JsonValue::String(s.clone()),
        FieldValue::Bytes(bytes) => JsonValue::String(BASE64.encode(bytes)),
        FieldValue::Reference(r) => JsonValue::String(format!("{REFERENCE_PREFIX}{}", r.id())),
        FieldValue::GeoPoint(point) => {
            let mut obj = Map::new();
            obj.insert("latitude".to_string(), double_to_json(point.latitude));
            obj.insert("longitude".to_string(), double_to_json(point.longitude));
            JsonValue::Object(obj)
        }
        FieldValue::Array(items) => JsonValue::Array(items.iter().map(serialize).collect()),
        FieldValue::Map(fields) => JsonValue::Object(serialize_fields(fields)),
    }
}

/// Convert a document body into a JSON object.
pub fn serialize_fields(fields: &Fields) -> Map<String, JsonValue> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), serialize(value)))
        .collect()
}

/// Convert a JSON-safe value back into a native value.
///
/// Strings carrying the `ref:` prefix are kept as plain strings; they are not
/// turned back into references.
pub fn deserialize(value: &JsonValue) -> FieldValue {
    match value {
        JsonValue::Null => FieldValue::Null,
        JsonValue::Bool(b) => FieldValue::Boolean(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Integer(i),
            None => n.as_f64().map(FieldValue::Double).unwrap_or(FieldValue::Null),
        },
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Array(items) => FieldValue::Array(items.iter().map(deserialize).collect()),
        JsonValue::Object(obj) => FieldValue::Map(deserialize_fields(obj)),
    }
}

/// Convert a JSON object back into a document body.
pub fn deserialize_fields(obj: &Map<String, JsonValue>) -> Fields {
    obj.iter()
        .map(|(key, value)| (key.clone(), deserialize(value)))
        .collect()
}

fn epoch_seconds(ts: &DateTime<Utc>) -> f64 {
    ts.timestamp() as f64 + f64::from(ts.timestamp_subsec_nanos()) / 1_000_000_000.0
}

fn double_to_json(f: f64) -> JsonValue {
    serde_json::Number::from_f64(f)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}
