//! Avro schema model and transformations.
//!
//! Schemas are handled as JSON values in two forms: canonical Avro JSON, as
//! read and written by callers, and the editable form produced by
//! [`prepare_schema`] and turned back by [`clean_schema`]. The editable form
//! adds identities, placeholders and comma-separated list attributes.

mod clean;
mod defaults;
mod id;
mod labels;
mod prepare;
mod reconcile;
mod structure;
mod types;

pub(crate) use clean::csv_to_vec;
pub use clean::clean_schema;
pub use defaults::{record_field_defaults, type_defaults, DURATION_SIZE};
pub use id::{generate_id, ID_KEY};
pub use labels::{parse_label, strip_type_name_suffix, type_name, type_names, type_options, ADD_SUFFIX};
pub use prepare::prepare_schema;
pub use reconcile::{add_field, remove_field, type_objects};
pub use structure::{is_avro_structure, is_json_structure};
pub use types::*;
