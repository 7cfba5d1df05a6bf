//! Firestore REST value encoding
//!
//! The REST API wraps every value in a single-key object naming its type,
//! e.g. `{"integerValue": "42"}` or `{"mapValue": {"fields": {...}}}`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value as JsonValue, json};

use crate::codec::{DocumentRef, FieldValue, Fields, GeoPoint};
use crate::error::{Result, StoreError};

/// Encode a document body as a Firestore `fields` object.
pub fn encode_fields(fields: &Fields) -> JsonValue {
    JsonValue::Object(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), encode_value(value)))
            .collect(),
    )
}

/// Encode one value in Firestore's typed representation.
pub fn encode_value(value: &FieldValue) -> JsonValue {
    match value {
        FieldValue::Null => json!({ "nullValue": null }),
        FieldValue::Boolean(b) => json!({ "booleanValue": b }),
        FieldValue::Integer(n) => json!({ "integerValue": n.to_string() }),
        FieldValue::Double(f) => json!({ "doubleValue": encode_double(*f) }),
        FieldValue::Timestamp(ts) => {
            json!({ "timestampValue": ts.to_rfc3339_opts(SecondsFormat::AutoSi, true) })
        }
        FieldValue::String(s) => json!({ "stringValue": s }),
        FieldValue::Bytes(bytes) => json!({ "bytesValue": BASE64.encode(bytes) }),
        FieldValue::Reference(r) => json!({ "referenceValue": r.path() }),
        FieldValue::GeoPoint(point) => json!({
            "geoPointValue": { "latitude": point.latitude, "longitude": point.longitude }
        }),
        FieldValue::Array(items) => {
            let values: Vec<JsonValue> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        FieldValue::Map(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

/// Decode a Firestore `fields` object into a document body.
pub fn decode_fields(fields: &Map<String, JsonValue>) -> Result<Fields> {
    fields
        .iter()
        .map(|(key, value)| Ok((key.clone(), decode_value(value)?)))
        .collect()
}

/// Decode one typed Firestore value.
pub fn decode_value(value: &JsonValue) -> Result<FieldValue> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid(format!("expected typed value object, got {value}")))?;
    let (kind, inner) = match (obj.len(), obj.iter().next()) {
        (1, Some(entry)) => entry,
        _ => return Err(invalid(format!("expected exactly one value type, got {value}"))),
    };

    let decoded = match kind.as_str() {
        "nullValue" => FieldValue::Null,
        "booleanValue" => FieldValue::Boolean(
            inner
                .as_bool()
                .ok_or_else(|| invalid(format!("booleanValue {inner}")))?,
        ),
        "integerValue" => FieldValue::Integer(decode_integer(inner)?),
        "doubleValue" => FieldValue::Double(decode_double(inner)?),
        "timestampValue" => {
            let text = as_str(kind, inner)?;
            let ts = DateTime::parse_from_rfc3339(text)
                .map_err(|e| invalid(format!("timestampValue '{text}': {e}")))?;
            FieldValue::Timestamp(ts.with_timezone(&Utc))
        }
        "stringValue" => FieldValue::String(as_str(kind, inner)?.to_string()),
        "bytesValue" => {
            let text = as_str(kind, inner)?;
            let bytes = BASE64
                .decode(text)
                .map_err(|e| invalid(format!("bytesValue: {e}")))?;
            FieldValue::Bytes(bytes)
        }
        "referenceValue" => FieldValue::Reference(DocumentRef::new(as_str(kind, inner)?)),
        "geoPointValue" => FieldValue::GeoPoint(GeoPoint {
            latitude: coordinate(inner, "latitude"),
            longitude: coordinate(inner, "longitude"),
        }),
        "arrayValue" => {
            let values = match inner.get("values") {
                Some(JsonValue::Array(values)) => values
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>>>()?,
                Some(other) => return Err(invalid(format!("arrayValue.values {other}"))),
                None => Vec::new(),
            };
            FieldValue::Array(values)
        }
        "mapValue" => {
            let fields = match inner.get("fields") {
                Some(JsonValue::Object(fields)) => decode_fields(fields)?,
                Some(other) => return Err(invalid(format!("mapValue.fields {other}"))),
                None => Fields::new(),
            };
            FieldValue::Map(fields)
        }
        other => return Err(invalid(format!("unsupported value type '{other}'"))),
    };

    Ok(decoded)
}

fn encode_double(f: f64) -> JsonValue {
    if f.is_nan() {
        JsonValue::String("NaN".to_string())
    } else if f.is_infinite() {
        let text = if f > 0.0 { "Infinity" } else { "-Infinity" };
        JsonValue::String(text.to_string())
    } else {
        json!(f)
    }
}

fn decode_double(inner: &JsonValue) -> Result<f64> {
    match inner {
        JsonValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| invalid(format!("doubleValue {n}"))),
        JsonValue::String(s) => match s.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            other => other
                .parse()
                .map_err(|_| invalid(format!("doubleValue '{other}'"))),
        },
        other => Err(invalid(format!("doubleValue {other}"))),
    }
}

// int64 values arrive as strings to survive JavaScript number precision.
fn decode_integer(inner: &JsonValue) -> Result<i64> {
    match inner {
        JsonValue::String(s) => s
            .parse()
            .map_err(|_| invalid(format!("integerValue '{s}'"))),
        JsonValue::Number(n) => n
            .as_i64()
            .ok_or_else(|| invalid(format!("integerValue {n}"))),
        other => Err(invalid(format!("integerValue {other}"))),
    }
}

// Zero coordinates are omitted from responses.
fn coordinate(inner: &JsonValue, name: &str) -> f64 {
    inner.get(name).and_then(JsonValue::as_f64).unwrap_or(0.0)
}

fn as_str<'a>(kind: &str, inner: &'a JsonValue) -> Result<&'a str> {
    inner
        .as_str()
        .ok_or_else(|| invalid(format!("{kind} must be a string, got {inner}")))
}

fn invalid(msg: String) -> crate::error::SamplerError {
    StoreError::InvalidValue(msg).into()
}
