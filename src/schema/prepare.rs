//! Canonical Avro JSON to editable schema.

use serde_json::{json, Map, Value};

use crate::schema::defaults::{merge_into, record_field_defaults, type_defaults};
use crate::schema::id::{generate_id, ID_KEY};
use crate::schema::types::{type_of, Complex, SchemaKind, TypeName, TYPE_KEY};

/// Copy and prepare a schema for editing.
///
/// - Every schema object gets the defaults of its variant underneath its own
///   attributes, so each editable attribute has a value to bind to.
/// - Array `items`, map `values` and record field `type` become unions, which
///   is what the type selector edits.
/// - Bare primitive strings become `{"type": ...}` objects.
/// - `symbols` and `aliases` arrays become comma-separated strings.
/// - Every schema object and record field gets a fresh identity under `id`.
///
/// Preparing an already prepared schema gives the same value with new
/// identities. Values that are not schemas are copied unchanged.
///
/// # Example
/// ```
/// use avro_schema_builder::schema::prepare_schema;
/// use serde_json::json;
///
/// let prepared = prepare_schema(&json!({"type": "array", "items": "int"}));
/// assert_eq!(prepared["items"][0]["type"], "int");
/// assert!(prepared["id"].is_string());
/// ```
pub fn prepare_schema(schema: &Value) -> Value {
    match schema {
        Value::Array(members) => prepare_union(members),
        _ => prepare_type(schema),
    }
}

fn prepare_union(members: &[Value]) -> Value {
    Value::Array(members.iter().map(prepare_type).collect())
}

/// Prepare a value that the editor holds as a union.
fn prepare_as_union(schema: Option<&Value>) -> Value {
    match schema {
        Some(Value::Array(members)) => prepare_union(members),
        Some(member) => prepare_union(std::slice::from_ref(member)),
        None => Value::Array(Vec::new()),
    }
}

fn prepare_type(schema: &Value) -> Value {
    match schema {
        Value::String(type_str) => json!({ TYPE_KEY: type_str, ID_KEY: generate_id() }),
        Value::Object(_) => match SchemaKind::classify(schema) {
            Some(SchemaKind::Record) => prepare_record(schema),
            Some(SchemaKind::Array) => prepare_container(schema, Complex::Array, "items"),
            Some(SchemaKind::Map) => prepare_container(schema, Complex::Map, "values"),
            kind => prepare_object(schema, kind),
        },
        other => other.clone(),
    }
}

fn prepare_container(schema: &Value, complex: Complex, child_key: &str) -> Value {
    let mut prepared = with_defaults(TypeName::Complex(complex), schema);
    set_id(&mut prepared);
    prepared[child_key] = prepare_as_union(schema.get(child_key));
    prepared
}

fn prepare_record(schema: &Value) -> Value {
    let mut prepared = with_defaults(TypeName::Complex(Complex::Record), schema);
    join_list(&mut prepared, "aliases");

    let fields: Vec<Value> = schema
        .get("fields")
        .and_then(Value::as_array)
        .map(|fields| fields.iter().map(prepare_field).collect())
        .unwrap_or_default();
    prepared["fields"] = Value::Array(fields);

    set_id(&mut prepared);
    prepared
}

fn prepare_field(field: &Value) -> Value {
    let mut prepared = record_field_defaults();
    merge_into(&mut prepared, field);
    set_id(&mut prepared);
    prepared[TYPE_KEY] = prepare_as_union(field.get(TYPE_KEY));
    prepared
}

fn prepare_object(schema: &Value, kind: Option<SchemaKind>) -> Value {
    let type_name = match kind {
        Some(SchemaKind::Logical(logical)) => Some(TypeName::Logical(logical)),
        _ => type_of(schema).and_then(TypeName::parse),
    };

    let mut prepared = match type_name {
        Some(type_name) => with_defaults(type_name, schema),
        None => schema.clone(),
    };
    join_list(&mut prepared, "symbols");
    join_list(&mut prepared, "aliases");
    set_id(&mut prepared);
    prepared
}

/// Defaults of the type with the attributes of `schema` laid over them.
fn with_defaults(type_name: TypeName, schema: &Value) -> Value {
    let mut prepared = type_defaults(type_name).unwrap_or_else(|| Value::Object(Map::new()));
    merge_into(&mut prepared, schema);
    prepared
}

fn set_id(value: &mut Value) {
    if let Some(obj) = value.as_object_mut() {
        obj.insert(ID_KEY.to_string(), Value::String(generate_id()));
    }
}

/// Join an array attribute into a comma-separated string.
fn join_list(value: &mut Value, key: &str) {
    let Some(slot) = value.get_mut(key) else {
        return;
    };
    if let Value::Array(items) = slot {
        let joined = items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(",");
        *slot = Value::String(joined);
    }
}
