//! BSON to JSON simplification
//!
//! Exported documents are arbitrary, dynamically-shaped records; this module
//! converts their BSON values to plain JSON types rather than MongoDB
//! extended JSON:
//! - ObjectId → hex string, DateTime → RFC 3339 string
//! - Int32/Int64/Double → numbers (non-finite doubles become null)
//! - Binary → base64 string, Decimal128 → string
//! - Regex → `/pattern/options` string, Timestamp → `{ "t": ..., "i": ... }`
//!
//! serde_json orders object keys deterministically, which keeps repeated
//! exports of an unchanged collection byte-for-byte identical.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use mongodb::bson::{Bson, Document};
use serde_json::{Value as JsonValue, json};

/// Convert a BSON value to simplified JSON
pub fn bson_to_json(value: &Bson) -> JsonValue {
    match value {
        Bson::String(s) => JsonValue::String(s.clone()),
        Bson::Int32(n) => JsonValue::Number((*n).into()),
        Bson::Int64(n) => JsonValue::Number((*n).into()),
        Bson::Double(f) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Bson::Boolean(b) => JsonValue::Bool(*b),
        Bson::Null => JsonValue::Null,
        Bson::ObjectId(oid) => JsonValue::String(oid.to_hex()),
        Bson::DateTime(dt) => JsonValue::String(dt.to_chrono().to_rfc3339()),
        Bson::Decimal128(d) => JsonValue::String(d.to_string()),
        Bson::Array(arr) => JsonValue::Array(arr.iter().map(bson_to_json).collect()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Binary(bin) => JsonValue::String(BASE64.encode(&bin.bytes)),
        Bson::RegularExpression(regex) => {
            JsonValue::String(format!("/{}/{}", regex.pattern, regex.options))
        }
        Bson::Timestamp(ts) => json!({ "t": ts.time, "i": ts.increment }),
        Bson::Undefined => JsonValue::Null,
        Bson::MinKey => JsonValue::String("MinKey".to_string()),
        Bson::MaxKey => JsonValue::String("MaxKey".to_string()),
        other => JsonValue::String(format!("{other:?}")),
    }
}

/// Convert a whole BSON document to a JSON object
///
/// # Arguments
/// * `doc` - Document to convert
///
/// # Returns
/// * `JsonValue` - JSON object with every field simplified
pub fn document_to_json(doc: &Document) -> JsonValue {
    let map: serde_json::Map<String, JsonValue> = doc
        .iter()
        .map(|(key, value)| (key.clone(), bson_to_json(value)))
        .collect();
    JsonValue::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use mongodb::bson::{Binary, doc, spec::BinarySubtype};

    #[test]
    fn test_scalars() {
        assert_eq!(bson_to_json(&Bson::Int32(42)), json!(42));
        assert_eq!(bson_to_json(&Bson::Int64(1 << 40)), json!(1099511627776i64));
        assert_eq!(bson_to_json(&Bson::Double(1.5)), json!(1.5));
        assert_eq!(bson_to_json(&Bson::Boolean(true)), json!(true));
        assert_eq!(bson_to_json(&Bson::Null), JsonValue::Null);
        assert_eq!(
            bson_to_json(&Bson::String("quiz1".to_string())),
            json!("quiz1")
        );
    }

    #[test]
    fn test_nan_becomes_null() {
        assert_eq!(bson_to_json(&Bson::Double(f64::NAN)), JsonValue::Null);
    }

    #[test]
    fn test_object_id_is_hex_string() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(
            bson_to_json(&Bson::ObjectId(oid)),
            json!("507f1f77bcf86cd799439011")
        );
    }

    #[test]
    fn test_datetime_is_rfc3339() {
        let dt = mongodb::bson::DateTime::from_millis(0);
        let rendered = bson_to_json(&Bson::DateTime(dt));
        assert!(rendered.as_str().unwrap().starts_with("1970-01-01T00:00:00"));
    }

    #[test]
    fn test_binary_is_base64() {
        let bin = Binary {
            subtype: BinarySubtype::Generic,
            bytes: vec![1, 2, 3],
        };
        assert_eq!(bson_to_json(&Bson::Binary(bin)), json!("AQID"));
    }

    #[test]
    fn test_nested_document() {
        let doc = doc! {
            "name": "quiz1",
            "answers": [ { "q": 1, "correct": true }, { "q": 2, "correct": false } ],
        };
        let value = document_to_json(&doc);
        assert_eq!(value["name"], json!("quiz1"));
        assert_eq!(value["answers"][1]["correct"], json!(false));
    }

    #[test]
    fn test_regex_rendering() {
        let regex = mongodb::bson::Regex {
            pattern: "^quiz".to_string(),
            options: "i".to_string(),
        };
        assert_eq!(
            bson_to_json(&Bson::RegularExpression(regex)),
            json!("/^quiz/i")
        );
    }
}
