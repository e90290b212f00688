//! Schema validation.
//!
//! User mistakes are reported as data: an [`ErrorTree`] mirroring the shape of
//! the validated schema, with messages from the fixed [`ErrorMessage`]
//! vocabulary at the offending attributes.

mod errors;
mod json;
mod rules;
mod schema;

use serde_json::Value;
use tracing::debug;

use crate::error::SchemaError;
use crate::schema::clean_schema;

pub use errors::{
    errors_info_need, ErrorMessage, ErrorTree, ErrorsInfoNeed, NAMESPACE_FORMAT_INFO,
    NAME_FORMAT_INFO,
};
pub use json::validate_schema_json;
pub use rules::{is_valid_name, is_valid_namespace};
pub use schema::validate_schema;

/// Clean an editable schema and return it only when it is valid.
///
/// Returns `Ok(None)` when the cleaned schema has validation errors.
pub fn get_schema(editable: &Value, doc_required: bool) -> Result<Option<Value>, SchemaError> {
    let schema = clean_schema(editable)?;
    match validate_schema(&schema, doc_required) {
        None => Ok(Some(schema)),
        Some(errors) => {
            debug!(errors = errors.messages().len(), "Schema is not valid");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::prepare_schema;
    use serde_json::json;

    #[test]
    fn test_get_schema() {
        let editable = prepare_schema(&json!({"type": "fixed", "name": "f", "size": 4}));
        assert_eq!(
            get_schema(&editable, false).unwrap(),
            Some(json!({"name": "f", "size": 4, "type": "fixed"}))
        );
        assert_eq!(get_schema(&editable, true).unwrap(), None);
    }
}
