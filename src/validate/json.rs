//! Validation of the raw-text schema input.

use serde_json::Value;

use crate::schema::{is_avro_structure, is_json_structure};
use crate::validate::errors::ErrorMessage;

/// Validate raw schema text, returning the first failing message.
///
/// The checks run in order: the trimmed text is not empty, it is a JSON
/// object or array, and it has an Avro schema structure.
pub fn validate_schema_json(text: &str) -> Option<ErrorMessage> {
    let text = text.trim();
    if text.is_empty() {
        return Some(ErrorMessage::EmptySchema);
    }
    if !is_json_structure(text) {
        return Some(ErrorMessage::InvalidJson);
    }
    match serde_json::from_str::<Value>(text) {
        Ok(value) if is_avro_structure(&value) => None,
        _ => Some(ErrorMessage::InvalidStructure),
    }
}
