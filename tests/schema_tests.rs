//! Tests for the schema type model and transformations.

use serde_json::{json, Value};

use avro_schema_builder::schema::*;
use avro_schema_builder::SchemaError;

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn strip_ids(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            obj.shift_remove(ID_KEY);
            obj.values_mut().for_each(strip_ids);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_ids),
        _ => {}
    }
}

// ============================================================================
// Type Model Tests
// ============================================================================

#[test]
fn test_classify_every_logical_row() {
    for kind in LogicalKind::ALL {
        let value = type_defaults(TypeName::Logical(kind)).unwrap();
        assert_eq!(SchemaKind::classify(&value), Some(SchemaKind::Logical(kind)), "{}", kind.label());
        assert_eq!(LogicalKind::from_pair(kind.logical_type().name(), kind.base_type()), Some(kind));
    }
}

#[test]
fn test_strict_logical_predicates() {
    let decimal_bytes = json!({"type": "bytes", "logicalType": "decimal", "precision": 4});
    let decimal_fixed = json!({"type": "fixed", "logicalType": "decimal", "name": "d", "size": 4, "precision": 4});
    assert!(is_logical_decimal_bytes(&decimal_bytes));
    assert!(!is_logical_decimal_fixed(&decimal_bytes));
    assert!(is_logical_decimal_fixed(&decimal_fixed));
    assert!(!is_logical_duration(&decimal_fixed));
    assert!(is_named(&decimal_fixed));
    assert!(!is_named(&decimal_bytes));
}

#[test]
fn test_predicates_total_on_malformed_input() {
    for value in [json!(null), json!(1), json!(true), json!({}), json!({"type": 5}), json!([])] {
        assert!(!is_primitive_object(&value));
        assert!(!is_record(&value));
        assert!(!is_logical(&value));
        assert!(!is_named(&value));
    }
}

#[test]
fn test_catalog_parse_round_trip() {
    for type_name in TypeName::catalog() {
        assert_eq!(TypeName::parse(type_name.as_str()), Some(type_name));
        assert_eq!(TypeName::catalog().nth(type_name.catalog_index()), Some(type_name));
    }
}

// ============================================================================
// Prepare / Clean Tests
// ============================================================================

#[test]
fn test_prepare_clean_record() {
    let schema = json!({
        "type": "record",
        "name": "User",
        "namespace": "com.example",
        "aliases": ["Person", "Member"],
        "doc": "A user",
        "fields": [
            {"name": "id", "type": "long", "order": "ascending"},
            {"name": "email", "type": ["null", "string"], "default": null},
            {"name": "tags", "type": {"type": "array", "items": "string"}},
            {"name": "status", "type": {"type": "enum", "name": "Status", "symbols": ["ACTIVE", "GONE"], "default": "ACTIVE"}},
            {"name": "created", "type": {"type": "long", "logicalType": "timestamp-millis"}}
        ]
    });

    let editable = prepare_schema(&schema);
    assert_eq!(editable["aliases"], "Person,Member");
    assert_eq!(editable["fields"][3]["type"][0]["symbols"], "ACTIVE,GONE");
    assert_eq!(editable["fields"][2]["type"][0]["items"][0]["type"], "string");

    assert_eq!(clean_schema(&editable).unwrap(), schema);
}

#[test]
fn test_prepare_does_not_mutate_input() {
    let schema = json!({"type": "map", "values": "int"});
    let copy = schema.clone();
    let _ = prepare_schema(&schema);
    assert_eq!(schema, copy);
}

#[test]
fn test_prepare_top_level_union() {
    let prepared = prepare_schema(&json!(["null", {"type": "fixed", "name": "md5", "size": 16}]));
    let members = prepared.as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["type"], "null");
    assert_eq!(members[1]["aliases"], "");
    assert!(members.iter().all(|m| m["id"].is_string()));
}

#[test]
fn test_union_collapse_rules() {
    assert_eq!(clean_schema(&json!([{"type": "int"}])).unwrap(), json!("int"));
    assert_eq!(clean_schema(&json!([])).unwrap(), json!([]));
    assert_eq!(
        clean_schema(&json!([{"type": "int"}, {"type": "long"}])).unwrap(),
        json!(["int", "long"])
    );
}

#[test]
fn test_clean_record_field_with_empty_union() {
    let cleaned = clean_schema(&json!({
        "type": "record",
        "name": "R",
        "fields": [{"name": "f", "type": [], "id": "1"}]
    }))
    .unwrap();
    assert_eq!(cleaned["fields"][0], json!({"name": "f", "type": []}));
}

#[test]
fn test_clean_drops_empty_aliases() {
    let cleaned = clean_schema(&json!({"type": "fixed", "name": "f", "size": 2, "aliases": " , "})).unwrap();
    assert_eq!(cleaned, json!({"type": "fixed", "name": "f", "size": 2}));
}

#[test]
fn test_clean_record_fields_not_array() {
    let result = clean_schema(&json!({"type": "record", "name": "R", "fields": "nope"}));
    assert!(matches!(result, Err(SchemaError::InvalidSchema(_))));
}

// ============================================================================
// Label Tests
// ============================================================================

#[test]
fn test_label_numbering() {
    let union = vec![
        json!({"type": "enum", "name": "A", "symbols": "X"}),
        json!({"type": "enum", "name": "B", "symbols": "Y"}),
        json!({"type": "fixed", "name": "F", "size": 1}),
    ];
    assert_eq!(type_names(&union), labels(&["enum 1", "enum 2", "fixed"]));
}

#[test]
fn test_logical_labels_not_numbered() {
    let union = vec![
        json!({"type": "fixed", "logicalType": "decimal", "name": "a", "size": 4}),
        json!({"type": "fixed", "name": "b", "size": 4}),
        json!({"type": "fixed", "name": "c", "size": 4}),
    ];
    assert_eq!(type_names(&union), labels(&["decimal (fixed)", "fixed 1", "fixed 2"]));
}

#[test]
fn test_type_options_follow_labels() {
    let options = type_options(&labels(&["record 1", "record 2"]));
    let records: Vec<&String> = options.iter().filter(|o| o.starts_with("record")).collect();
    assert_eq!(records, vec!["record 1", "record 2", "record +"]);
    assert_eq!(options.first().map(String::as_str), Some("boolean"));
    assert_eq!(options.last().map(String::as_str), Some("uuid"));
}

// ============================================================================
// Reconciliation Tests
// ============================================================================

#[test]
fn test_reconcile_insertion_order() {
    let objects = type_objects(&labels(&["int"]), &[], &[]).unwrap();
    let objects = type_objects(&labels(&["int", "fixed +"]), &objects, &labels(&["int"])).unwrap();
    let mut stripped = objects.clone();
    stripped.iter_mut().for_each(strip_ids);
    assert_eq!(
        stripped,
        vec![
            json!({"type": "int"}),
            json!({"aliases": "", "doc": "", "name": "", "namespace": "", "size": "", "type": "fixed"})
        ]
    );

    let objects = type_objects(&labels(&["int", "fixed", "enum +"]), &objects, &labels(&["int", "fixed"])).unwrap();
    assert_eq!(type_names(&objects), labels(&["int", "enum", "fixed"]));
}

#[test]
fn test_reconcile_removal_keeps_identities() {
    let objects: Vec<Value> = ["float", "int", "enum", "fixed"]
        .iter()
        .map(|t| json!({"type": t, "id": format!("id-{}", t)}))
        .chain(std::iter::once(
            json!({"type": "fixed", "logicalType": "duration", "size": 12, "id": "id-duration"}),
        ))
        .collect();
    let old = type_names(&objects);
    assert_eq!(old, labels(&["float", "int", "enum", "fixed", "duration"]));

    let result = type_objects(&labels(&["float", "enum", "fixed", "duration"]), &objects, &old).unwrap();
    let ids: Vec<&str> = result.iter().map(|o| o["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["id-float", "id-enum", "id-fixed", "id-duration"]);
}

#[test]
fn test_reconcile_logical_after_complex() {
    let current = vec![json!({"type": "null", "id": "n"}), json!({"type": "record", "id": "r"})];
    let result = type_objects(
        &labels(&["null", "record", "uuid"]),
        &current,
        &labels(&["null", "record"]),
    )
    .unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result[2]["type"], "string");
    assert_eq!(result[2]["logicalType"], "uuid");
    assert!(result[2]["id"].is_string());
}

#[test]
fn test_reconcile_unknown_label() {
    assert!(matches!(
        type_objects(&labels(&["int", "quux +"]), &[], &labels(&["int"])),
        Err(SchemaError::UnknownTypeName(_))
    ));
}

#[test]
fn test_field_edits() {
    let fields = add_field(&add_field(&[]));
    assert_eq!(fields.len(), 2);
    assert_ne!(fields[0]["id"], fields[1]["id"]);
    assert_eq!(remove_field(&fields, 1), vec![fields[0].clone()]);
}

// ============================================================================
// Structure Tests
// ============================================================================

#[test]
fn test_structure_checks() {
    assert!(is_avro_structure(&json!({"type": "record", "name": "R", "fields": []})));
    assert!(!is_avro_structure(&json!({"type": "record", "name": "R", "fields": [{"name": "f"}]})));
    assert!(!is_avro_structure(&json!({"type": "map", "values": "com.example.Ref"})));
    assert!(is_json_structure(r#"{"type": "int"}"#));
    assert!(!is_json_structure("null"));
}
