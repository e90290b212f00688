//! Editable schema back to canonical Avro JSON.

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::schema::id::ID_KEY;
use crate::schema::types::{
    is_array, is_enum, is_map, is_named, is_primitive_object, is_record, TYPE_KEY,
};

/// Copy and clean a schema from the additions made for editing.
///
/// - Identities are dropped.
/// - Empty-string placeholders are dropped.
/// - A union of one member becomes that member; an empty union stays empty.
/// - Primitive objects within unions become bare strings.
/// - `aliases` and enum `symbols` become arrays.
///
/// A top-level schema object is kept as an object even when it is a bare
/// primitive; only union members are collapsed to strings. Cleaning canonical
/// input returns it unchanged apart from that collapsing, so the operation is
/// idempotent.
///
/// Returns [`SchemaError::InvalidSchema`] when the value is not shaped like a
/// schema (e.g. a union member that is a number, or record `fields` that is
/// not an array).
///
/// # Example
/// ```
/// use avro_schema_builder::schema::clean_schema;
/// use serde_json::json;
///
/// let cleaned = clean_schema(&json!([{"type": "int", "id": "x1"}])).unwrap();
/// assert_eq!(cleaned, json!("int"));
/// ```
pub fn clean_schema(schema: &Value) -> Result<Value, SchemaError> {
    match schema {
        Value::Array(members) => clean_union(members),
        _ => clean_type(schema, false),
    }
}

fn clean_union(members: &[Value]) -> Result<Value, SchemaError> {
    match members {
        [] => Ok(Value::Array(Vec::new())),
        [single] => clean_type(single, true),
        _ => members
            .iter()
            .map(|member| clean_type(member, true))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
    }
}

/// Clean a value that the editor holds as a union but that may be a single
/// schema in canonical input.
fn clean_as_union(schema: &Value) -> Result<Value, SchemaError> {
    match schema {
        Value::Array(members) => clean_union(members),
        single => clean_type(single, true),
    }
}

fn clean_type(schema: &Value, collapse_primitive: bool) -> Result<Value, SchemaError> {
    let mut obj = match schema {
        Value::String(_) => return Ok(schema.clone()),
        Value::Object(obj) => obj.clone(),
        other => {
            return Err(SchemaError::InvalidSchema(format!(
                "expected a schema object or type name, found {}",
                other
            )))
        }
    };

    obj.shift_remove(ID_KEY);
    remove_empty_properties(&mut obj);

    let mut cleaned = Value::Object(obj);
    let bare = cleaned.as_object().is_some_and(|o| o.len() == 1);
    if collapse_primitive && bare && is_primitive_object(&cleaned) {
        return Ok(cleaned[TYPE_KEY].take());
    }

    if is_array(&cleaned) {
        clean_child(&mut cleaned, "items")?;
    } else if is_map(&cleaned) {
        clean_child(&mut cleaned, "values")?;
    } else if is_named(&cleaned) {
        clean_list(&mut cleaned, "aliases");
        if is_enum(&cleaned) {
            if cleaned.get("symbols").is_some() {
                clean_list(&mut cleaned, "symbols");
            }
            if cleaned.get("symbols").is_none() {
                cleaned["symbols"] = Value::Array(Vec::new());
            }
        } else if is_record(&cleaned) {
            clean_fields(&mut cleaned)?;
        }
    }
    Ok(cleaned)
}

fn clean_child(schema: &mut Value, key: &str) -> Result<(), SchemaError> {
    if let Some(child) = schema.get(key) {
        let cleaned = clean_as_union(child)?;
        schema[key] = cleaned;
    }
    Ok(())
}

fn clean_fields(record: &mut Value) -> Result<(), SchemaError> {
    let Some(fields) = record.get_mut("fields") else {
        return Ok(());
    };
    let Value::Array(fields) = fields else {
        return Err(SchemaError::InvalidSchema(
            "record fields must be an array".to_string(),
        ));
    };

    for field in fields.iter_mut() {
        let obj = field.as_object_mut().ok_or_else(|| {
            SchemaError::InvalidSchema("record field must be an object".to_string())
        })?;
        remove_empty_properties(obj);
        obj.shift_remove(ID_KEY);
        if let Some(field_type) = obj.get(TYPE_KEY) {
            let cleaned = clean_as_union(field_type)?;
            obj.insert(TYPE_KEY.to_string(), cleaned);
        }
    }
    Ok(())
}

/// Turn a comma-separated attribute into an array, dropping it when empty.
///
/// Arrays (canonical input) are kept as they are.
fn clean_list(schema: &mut Value, key: &str) {
    let Some(obj) = schema.as_object_mut() else {
        return;
    };
    let parsed = match obj.get(key) {
        Some(Value::String(csv)) => csv_to_vec(csv),
        Some(Value::Array(items)) if items.is_empty() => Vec::new(),
        _ => return,
    };
    if parsed.is_empty() && key != "symbols" {
        obj.shift_remove(key);
    } else {
        obj.insert(
            key.to_string(),
            Value::Array(parsed.into_iter().map(Value::String).collect()),
        );
    }
}

fn remove_empty_properties(obj: &mut Map<String, Value>) {
    obj.retain(|_, value| !matches!(value, Value::String(s) if s.is_empty()));
}

/// Split a comma-separated value, trimming every item and skipping empty ones.
pub(crate) fn csv_to_vec(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_union_collapse() {
        assert_eq!(clean_schema(&json!([{"type": "int"}])).unwrap(), json!("int"));
        assert_eq!(clean_schema(&json!([])).unwrap(), json!([]));
        assert_eq!(
            clean_schema(&json!([{"type": "int"}, {"type": "long"}])).unwrap(),
            json!(["int", "long"])
        );
    }

    #[test]
    fn test_top_level_object_kept() {
        assert_eq!(
            clean_schema(&json!({"type": "int", "id": "abc"})).unwrap(),
            json!({"type": "int"})
        );
    }

    #[test]
    fn test_clean_enum() {
        let cleaned = clean_schema(&json!({
            "aliases": "",
            "default": "",
            "doc": "",
            "name": "Suit",
            "namespace": "",
            "symbols": "SPADES, HEARTS,,",
            "type": "enum",
            "id": "x"
        }))
        .unwrap();
        assert_eq!(
            cleaned,
            json!({"name": "Suit", "symbols": ["SPADES", "HEARTS"], "type": "enum"})
        );
    }

    #[test]
    fn test_clean_enum_without_symbols() {
        let cleaned = clean_schema(&json!({"type": "enum", "name": "E", "symbols": ""})).unwrap();
        assert_eq!(cleaned, json!({"type": "enum", "name": "E", "symbols": []}));
    }

    #[test]
    fn test_clean_logical_fixed_aliases() {
        let cleaned = clean_schema(&json!({
            "aliases": "a, b",
            "name": "d",
            "size": 12,
            "type": "fixed",
            "logicalType": "duration"
        }))
        .unwrap();
        assert_eq!(cleaned["aliases"], json!(["a", "b"]));
    }

    #[test]
    fn test_clean_keeps_logical_primitive_object() {
        let cleaned = clean_schema(&json!([{"type": "int", "logicalType": "date", "id": "1"}])).unwrap();
        assert_eq!(cleaned, json!({"type": "int", "logicalType": "date"}));
    }

    #[test]
    fn test_clean_record_fields() {
        let cleaned = clean_schema(&json!({
            "type": "record",
            "name": "R",
            "aliases": "",
            "fields": [
                {"default": "", "doc": "", "name": "f", "type": [{"type": "int", "id": "2"}], "order": "", "id": "1"}
            ],
            "id": "0"
        }))
        .unwrap();
        assert_eq!(
            cleaned,
            json!({"type": "record", "name": "R", "fields": [{"name": "f", "type": "int"}]})
        );
    }

    #[test]
    fn test_clean_idempotent_on_canonical() {
        let canonical = json!({
            "type": "record",
            "name": "R",
            "aliases": ["Old"],
            "fields": [
                {"name": "a", "type": ["null", {"type": "array", "items": "string"}]},
                {"name": "b", "type": {"type": "enum", "name": "E", "symbols": ["X"]}}
            ]
        });
        let once = clean_schema(&canonical).unwrap();
        assert_eq!(once, canonical);
        assert_eq!(clean_schema(&once).unwrap(), once);
    }

    #[test]
    fn test_malformed_member() {
        assert!(matches!(
            clean_schema(&json!([42, "int"])),
            Err(SchemaError::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_csv_to_vec() {
        assert_eq!(csv_to_vec(" a ,b,, c"), vec!["a", "b", "c"]);
        assert!(csv_to_vec(" , ").is_empty());
    }
}
