//! Recursive validation of (editable or canonical) schema values.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::schema::{LogicalKind, SchemaKind, DURATION_SIZE, TYPE_KEY};
use crate::validate::errors::{ErrorMessage, ErrorTree};
use crate::validate::rules::{self, Bound};

/// Validate a schema, returning the errors shaped like the schema.
///
/// Unions validate every member, records every field and their types, arrays
/// and maps their item and value types. Logical types are recognized before
/// the type they annotate. With `doc_required`, named types and record fields
/// need a `doc` as well.
///
/// Returns `None` when the schema is valid.
///
/// # Example
/// ```
/// use avro_schema_builder::validate::{validate_schema, ErrorMessage};
/// use avro_schema_builder::FieldPath;
/// use serde_json::json;
///
/// let errors = validate_schema(&json!({"type": "fixed", "name": "f", "size": 0}), false).unwrap();
/// let path: FieldPath = "size".parse().unwrap();
/// assert_eq!(errors.message(&path), Some(ErrorMessage::Positive));
/// ```
pub fn validate_schema(schema: &Value, doc_required: bool) -> Option<ErrorTree> {
    SchemaValidator { doc_required }.schema(schema)
}

struct SchemaValidator {
    doc_required: bool,
}

/// Errors of one schema object, keyed by attribute.
#[derive(Default)]
struct Entries(BTreeMap<String, ErrorTree>);

impl Entries {
    fn message(&mut self, key: &str, message: Option<ErrorMessage>) {
        if let Some(message) = message {
            self.0.insert(key.to_string(), ErrorTree::Message(message));
        }
    }

    fn tree(&mut self, key: &str, tree: Option<ErrorTree>) {
        if let Some(tree) = tree {
            self.0.insert(key.to_string(), tree);
        }
    }

    fn finish(self) -> Option<ErrorTree> {
        ErrorTree::from_entries(self.0)
    }
}

impl SchemaValidator {
    fn schema(&self, schema: &Value) -> Option<ErrorTree> {
        match schema {
            Value::Array(members) => self.union(members),
            _ => self.object(schema),
        }
    }

    fn union(&self, members: &[Value]) -> Option<ErrorTree> {
        if members.is_empty() {
            return Some(ErrorTree::Message(ErrorMessage::Required));
        }
        ErrorTree::from_items(members.iter().map(|member| self.object(member)))
    }

    /// Validate a nested type; a missing one is left to the structure check.
    fn nested(&self, schema: Option<&Value>) -> Option<ErrorTree> {
        match schema {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(schema) => self.schema(schema),
        }
    }

    fn object(&self, schema: &Value) -> Option<ErrorTree> {
        let obj = schema.as_object()?;
        let mut entries = Entries::default();

        match SchemaKind::classify(schema)? {
            SchemaKind::Logical(LogicalKind::DecimalBytes) => self.decimal(obj, &mut entries),
            SchemaKind::Logical(LogicalKind::DecimalFixed) => {
                self.fixed(obj, &mut entries);
                self.decimal(obj, &mut entries);
            }
            SchemaKind::Logical(LogicalKind::Duration) => {
                self.named(obj, &mut entries);
                entries.message(
                    "size",
                    rules::integer(obj, "size", true, Bound::Exactly(DURATION_SIZE as i64)),
                );
            }
            SchemaKind::Array => entries.tree("items", self.nested(obj.get("items"))),
            SchemaKind::Map => entries.tree("values", self.nested(obj.get("values"))),
            SchemaKind::Enum => {
                self.named(obj, &mut entries);
                entries.message("symbols", rules::enum_symbols(obj));
                entries.message("default", rules::enum_default(obj));
            }
            SchemaKind::Fixed => self.fixed(obj, &mut entries),
            SchemaKind::Record => {
                self.named(obj, &mut entries);
                entries.tree("fields", self.fields(obj.get("fields")));
            }
            SchemaKind::Primitive(_)
            | SchemaKind::PrimitiveObject(_)
            | SchemaKind::Logical(_)
            | SchemaKind::InvalidLogical
            | SchemaKind::Union => {}
        }
        entries.finish()
    }

    fn named(&self, obj: &Map<String, Value>, entries: &mut Entries) {
        entries.message("name", rules::name(obj));
        entries.message("namespace", rules::namespace(obj));
        if self.doc_required {
            entries.message("doc", rules::required(obj, "doc"));
        }
    }

    fn fixed(&self, obj: &Map<String, Value>, entries: &mut Entries) {
        self.named(obj, entries);
        entries.message("size", rules::integer(obj, "size", true, Bound::Positive));
    }

    fn decimal(&self, obj: &Map<String, Value>, entries: &mut Entries) {
        entries.message(
            "precision",
            rules::integer(obj, "precision", true, Bound::Positive),
        );
        entries.message(
            "scale",
            rules::integer(obj, "scale", false, Bound::NonNegative),
        );
    }

    fn fields(&self, fields: Option<&Value>) -> Option<ErrorTree> {
        let fields = match fields {
            Some(Value::Array(fields)) if !fields.is_empty() => fields,
            _ => return Some(ErrorTree::Message(ErrorMessage::Required)),
        };
        ErrorTree::from_items(fields.iter().map(|field| self.field(field)))
    }

    fn field(&self, field: &Value) -> Option<ErrorTree> {
        let Some(obj) = field.as_object() else {
            return Some(ErrorTree::Message(ErrorMessage::Required));
        };
        let mut entries = Entries::default();
        entries.message("name", rules::name(obj));
        match rules::present(obj, TYPE_KEY) {
            None => entries.message(TYPE_KEY, Some(ErrorMessage::Required)),
            Some(field_type) => entries.tree(TYPE_KEY, self.schema(field_type)),
        }
        if self.doc_required {
            entries.message("doc", rules::required(obj, "doc"));
        }
        entries.finish()
    }
}
