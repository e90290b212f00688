//! Editable defaults for each schema variant.
//!
//! Every optional attribute is materialized as an empty string so the editing
//! surface always has a defined value to bind to. Attributes that stay empty
//! are dropped again by [`crate::schema::clean_schema`]. Numeric attributes
//! (`size`, `precision`, `scale`) and list attributes (`symbols`, `aliases`)
//! start out as empty strings as well; they are text inputs while editing.

use serde_json::{json, Value};

use crate::schema::types::{Complex, LogicalKind, TypeName};

/// Size of the fixed underlying a duration.
pub const DURATION_SIZE: u64 = 12;

/// Defaults for a record field.
pub fn record_field_defaults() -> Value {
    json!({
        "default": "",
        "doc": "",
        "name": "",
        "type": [],
        "order": "",
    })
}

fn fixed_defaults() -> Value {
    json!({
        "aliases": "",
        "doc": "",
        "name": "",
        "namespace": "",
        "size": "",
        "type": "fixed",
    })
}

fn decimal_bytes_defaults() -> Value {
    json!({
        "logicalType": "decimal",
        "precision": "",
        "scale": "",
        "type": "bytes",
    })
}

/// Defaults for a complex or logical type name.
///
/// Primitives have no defaults (a primitive is edited as a bare `{"type"}`
/// object) and yield `None`. A fresh value is built on every call.
pub fn type_defaults(type_name: TypeName) -> Option<Value> {
    let value = match type_name {
        TypeName::Primitive(_) => return None,
        TypeName::Complex(Complex::Array) => json!({"items": [], "type": "array"}),
        TypeName::Complex(Complex::Enum) => json!({
            "aliases": "",
            "default": "",
            "doc": "",
            "name": "",
            "namespace": "",
            "symbols": "",
            "type": "enum",
        }),
        TypeName::Complex(Complex::Fixed) => fixed_defaults(),
        TypeName::Complex(Complex::Map) => json!({"values": [], "type": "map"}),
        TypeName::Complex(Complex::Record) => json!({
            "aliases": "",
            "doc": "",
            "fields": [],
            "name": "",
            "namespace": "",
            "type": "record",
        }),
        TypeName::Logical(LogicalKind::DecimalBytes) => decimal_bytes_defaults(),
        TypeName::Logical(LogicalKind::DecimalFixed) => {
            let mut value = fixed_defaults();
            merge_into(&mut value, &decimal_bytes_defaults());
            value["type"] = json!("fixed");
            value
        }
        TypeName::Logical(LogicalKind::Duration) => {
            let mut value = fixed_defaults();
            value["size"] = json!(DURATION_SIZE);
            value["logicalType"] = json!("duration");
            value
        }
        TypeName::Logical(kind) => json!({
            "type": kind.base_type(),
            "logicalType": kind.logical_type().name(),
        }),
    };
    Some(value)
}

/// Overlay the attributes of `overlay` onto `base`, overlay values winning.
///
/// Existing keys keep their position; new keys are appended.
pub(crate) fn merge_into(base: &mut Value, overlay: &Value) {
    if let (Some(base), Some(overlay)) = (base.as_object_mut(), overlay.as_object()) {
        for (key, value) in overlay {
            base.insert(key.clone(), value.clone());
        }
    }
}
