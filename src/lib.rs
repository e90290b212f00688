//! Editable Avro schema model
//!
//! This library holds the core of a form-based Avro schema editor: the
//! mapping between canonical Avro JSON and an editable representation, the
//! reconciliation of union members with a multi-select of type labels, and
//! the validation of schemas against Avro's type grammar.
//!
//! # Example
//! ```
//! use avro_schema_builder::{clean_schema, prepare_schema, validate_schema};
//! use serde_json::json;
//!
//! let schema = json!({"type": "record", "name": "R", "fields": [{"name": "f", "type": "int"}]});
//! let editable = prepare_schema(&schema);
//! assert!(validate_schema(&editable, false).is_none());
//! assert_eq!(clean_schema(&editable).unwrap(), schema);
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod path;
pub mod schema;
pub mod validate;

// Re-export main types
pub use config::BuilderConfig;
pub use editor::{
    input_list, record_field_input_list, FieldOrder, FormState, InputDescriptor, MemoryForm, Mode,
    MountState, SchemaBuilder,
};
pub use error::SchemaError;
pub use path::{FieldPath, PathSegment};
pub use schema::{
    add_field, clean_schema, generate_id, is_avro_structure, is_json_structure, prepare_schema,
    remove_field, strip_type_name_suffix, type_name, type_names, type_objects, type_options,
    Complex, LogicalKind, LogicalTypeName, Primitive, SchemaKind, TypeName,
};
pub use validate::{
    errors_info_need, get_schema, validate_schema, validate_schema_json, ErrorMessage, ErrorTree,
    ErrorsInfoNeed,
};
