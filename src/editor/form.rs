//! Form state container contract and an in-memory implementation.

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::path::{FieldPath, PathSegment};
use crate::validate::ErrorTree;

/// The form state container the schema builder edits through.
///
/// Values and errors are addressed by dotted/bracketed paths such as
/// `schema.fields[0].type[1].name`.
pub trait FormState {
    /// Get the value at a path, `None` when nothing is stored there.
    fn value(&self, path: &FieldPath) -> Option<&Value>;

    /// Store a value at a path, creating intermediate objects and arrays.
    fn set_value(&mut self, path: &FieldPath, value: Value) -> Result<(), SchemaError>;

    /// Errors of the whole form, shaped like the values.
    fn errors(&self) -> Option<&ErrorTree>;

    fn set_errors(&mut self, errors: Option<ErrorTree>);

    /// Number of submit attempts so far.
    fn submit_count(&self) -> u32;

    fn increment_submit_count(&mut self);

    /// Get the errors at a path.
    fn error(&self, path: &FieldPath) -> Option<&ErrorTree> {
        self.errors().and_then(|errors| errors.get(path))
    }
}

/// A [`FormState`] holding its values in a JSON tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    values: Value,
    errors: Option<ErrorTree>,
    submit_count: u32,
}

impl MemoryForm {
    /// Create a form with initial values.
    ///
    /// # Example
    /// ```
    /// use avro_schema_builder::{FieldPath, FormState, MemoryForm};
    /// use serde_json::json;
    ///
    /// let form = MemoryForm::new(json!({"schema": {"type": "int"}}));
    /// let path: FieldPath = "schema.type".parse().unwrap();
    /// assert_eq!(form.value(&path), Some(&json!("int")));
    /// ```
    pub fn new(values: Value) -> Self {
        Self {
            values,
            errors: None,
            submit_count: 0,
        }
    }

    pub fn values(&self) -> &Value {
        &self.values
    }

    pub fn into_values(self) -> Value {
        self.values
    }
}

impl FormState for MemoryForm {
    fn value(&self, path: &FieldPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(&self.values, |value, segment| match segment {
                PathSegment::Key(key) => value.get(key.as_str()),
                PathSegment::Index(index) => value.get(*index),
            })
    }

    fn set_value(&mut self, path: &FieldPath, value: Value) -> Result<(), SchemaError> {
        let mut slot = &mut self.values;
        for segment in path.segments() {
            slot = match segment {
                PathSegment::Key(key) => {
                    if slot.is_null() {
                        *slot = Value::Object(Map::new());
                    }
                    let Value::Object(obj) = slot else {
                        return Err(SchemaError::invalid_path(
                            &path.to_string(),
                            format!("'{}' is not inside an object", key),
                        ));
                    };
                    obj.entry(key.clone()).or_insert(Value::Null)
                }
                PathSegment::Index(index) => {
                    if slot.is_null() {
                        *slot = Value::Array(Vec::new());
                    }
                    let Value::Array(items) = slot else {
                        return Err(SchemaError::invalid_path(
                            &path.to_string(),
                            format!("[{}] is not inside an array", index),
                        ));
                    };
                    if items.len() <= *index {
                        items.resize(*index + 1, Value::Null);
                    }
                    &mut items[*index]
                }
            };
        }
        *slot = value;
        Ok(())
    }

    fn errors(&self) -> Option<&ErrorTree> {
        self.errors.as_ref()
    }

    fn set_errors(&mut self, errors: Option<ErrorTree>) {
        self.errors = errors;
    }

    fn submit_count(&self) -> u32 {
        self.submit_count
    }

    fn increment_submit_count(&mut self) {
        self.submit_count += 1;
    }
}
