//! Structural checks on raw input, run before a schema is prepared.

use serde_json::Value;

use crate::schema::types::{SchemaKind, TYPE_KEY};

/// Check whether a parsed JSON value is a legal Avro schema structure.
///
/// Every type reference must be a primitive, a complex type or a row of the
/// logical table, and records, arrays and maps must nest legal schemas. An
/// object whose `type` is itself a union is accepted as well. Attributes other
/// than the nesting (names, sizes, symbols) are left to validation.
pub fn is_avro_structure(value: &Value) -> bool {
    match value {
        Value::Array(members) => members.iter().all(is_avro_structure),
        Value::String(_) => matches!(SchemaKind::classify(value), Some(SchemaKind::Primitive(_))),
        Value::Object(obj) => {
            if let Some(Value::Array(members)) = obj.get(TYPE_KEY) {
                return members.iter().all(is_avro_structure);
            }
            match SchemaKind::classify(value) {
                Some(SchemaKind::PrimitiveObject(_)) | Some(SchemaKind::Logical(_)) => true,
                Some(SchemaKind::InvalidLogical) | None => false,
                Some(SchemaKind::Record) => obj
                    .get("fields")
                    .and_then(Value::as_array)
                    .is_some_and(|fields| {
                        fields
                            .iter()
                            .all(|field| field.get(TYPE_KEY).is_some_and(is_avro_structure))
                    }),
                Some(SchemaKind::Array) => obj.get("items").is_some_and(is_avro_structure),
                Some(SchemaKind::Map) => obj.get("values").is_some_and(is_avro_structure),
                Some(SchemaKind::Enum | SchemaKind::Fixed) => true,
                Some(_) => false,
            }
        }
        _ => false,
    }
}

/// Check whether text parses as JSON whose root is an object or an array.
pub fn is_json_structure(text: &str) -> bool {
    matches!(
        serde_json::from_str::<Value>(text),
        Ok(Value::Object(_)) | Ok(Value::Array(_))
    )
}
