//! Error types for the schema builder core

use thiserror::Error;

/// Errors that can occur during schema operations.
///
/// These describe broken contracts between the core and its callers (a
/// malformed editable value, an unknown type label, an invalid form path).
/// User mistakes in a schema are not errors: they are reported as data through
/// [`crate::validate::ErrorTree`].
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Value does not have the shape the operation expects
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
    /// Type label that is not part of the type catalog
    #[error("Unknown type name: {0}")]
    UnknownTypeName(String),
    /// Raw text is not valid JSON
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
    /// Form path that cannot be parsed or does not address a value
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

impl SchemaError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
