//! Union reconciliation and record field list edits.

use serde_json::{json, Value};
use tracing::debug;

use crate::error::SchemaError;
use crate::schema::defaults::{record_field_defaults, type_defaults};
use crate::schema::id::{generate_id, ID_KEY};
use crate::schema::labels::strip_type_name_suffix;
use crate::schema::types::{TypeName, TYPE_KEY};

/// Get the union members matching a new selection of type labels.
///
/// The selector changes one label at a time:
/// - When a label was removed, the member at the first position where the
///   new labels diverge from the old ones is excised.
/// - When a label was added (always the last one), a fresh member is built:
///   `{"type"}` for primitives, the type defaults otherwise, with a new
///   identity. It is inserted after the rightmost old member whose type comes
///   before the added type in the catalog (named types may follow their own
///   kind), or at the front when there is none.
///
/// Existing members are never rebuilt, so their edits and identities survive.
///
/// # Errors
/// [`SchemaError::UnknownTypeName`] when the added label is not in the type
/// catalog.
pub fn type_objects(
    type_names: &[String],
    current: &[Value],
    type_names_old: &[String],
) -> Result<Vec<Value>, SchemaError> {
    if type_names_old.len() > type_names.len() {
        let removed = type_names_old
            .iter()
            .enumerate()
            .position(|(i, old)| type_names.get(i) != Some(old))
            .unwrap_or(type_names_old.len() - 1);
        debug!(index = removed, label = %type_names_old[removed], "Removing union member");

        let mut objects = current.to_vec();
        if removed < objects.len() {
            objects.remove(removed);
        }
        return Ok(objects);
    }

    let Some(added_label) = type_names.last().filter(|_| type_names.len() > type_names_old.len())
    else {
        return Ok(current.to_vec());
    };

    let base = strip_type_name_suffix(added_label);
    let added_type = TypeName::parse(&base)
        .ok_or_else(|| SchemaError::UnknownTypeName(added_label.clone()))?;
    let added = new_member(added_type);

    let limit = added_type.catalog_index() + usize::from(added_type.is_named());
    let precedes = |label: &String| {
        TypeName::parse(&strip_type_name_suffix(label)).is_some_and(|t| t.catalog_index() < limit)
    };

    let mut objects = current.to_vec();
    let position = match type_names_old.iter().rposition(precedes) {
        Some(previous) => (previous + 1).min(objects.len()),
        None => 0,
    };
    debug!(label = %added_type, position, "Adding union member");
    objects.insert(position, added);
    Ok(objects)
}

fn new_member(type_name: TypeName) -> Value {
    let mut member = type_defaults(type_name).unwrap_or_else(|| json!({ TYPE_KEY: type_name.as_str() }));
    if let Some(obj) = member.as_object_mut() {
        obj.insert(ID_KEY.to_string(), Value::String(generate_id()));
    }
    member
}

/// Append a new record field: the field defaults with a fresh identity.
pub fn add_field(fields: &[Value]) -> Vec<Value> {
    let mut field = record_field_defaults();
    field[ID_KEY] = Value::String(generate_id());

    let mut fields = fields.to_vec();
    fields.push(field);
    fields
}

/// Remove the record field at `index` (counting from 0).
///
/// An index past the end leaves the fields unchanged.
pub fn remove_field(fields: &[Value], index: usize) -> Vec<Value> {
    fields
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, field)| field.clone())
        .collect()
}
