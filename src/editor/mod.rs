//! Schema editing session over a form state container.
//!
//! A [`SchemaBuilder`] drives one editing session: it prepares the schema
//! held by the form at mount, applies type selections and record field edits,
//! switches between the structured editor and raw JSON text, and validates on
//! submit. All state except the mode and the toggle lockout lives in the form.

mod form;
mod inputs;

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::BuilderConfig;
use crate::error::SchemaError;
use crate::path::FieldPath;
use crate::schema::{
    add_field, clean_schema, is_avro_structure, prepare_schema, remove_field, type_names,
    type_objects,
};
use crate::validate::{get_schema, validate_schema, validate_schema_json, ErrorMessage, ErrorTree};

pub use form::{FormState, MemoryForm};
pub use inputs::{input_list, record_field_input_list, FieldOrder, InputDescriptor};

/// Editing mode of the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Form inputs per schema attribute
    #[default]
    Structured,
    /// Raw JSON text of the canonical schema
    RawText,
}

/// Outcome of mounting the builder on a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    /// Not mounted yet
    Pending,
    /// The schema was prepared and can be edited
    Ready,
    /// The schema failed the structure check; nothing can be edited
    InvalidSchema,
}

/// Result of applying the raw text to the schema value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonApplied {
    /// The text was rejected and the schema value left untouched
    Rejected,
    /// The schema value was replaced and, when checked, is valid
    Valid,
    /// The schema value was replaced but does not validate
    Invalid,
}

/// One editing session of a schema held in a form.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    config: BuilderConfig,
    schema_path: FieldPath,
    json_path: FieldPath,
    mode: Mode,
    mount_state: MountState,
    toggle_locked_until: Option<Instant>,
}

impl SchemaBuilder {
    /// Create a builder; fails when the configured form paths do not parse.
    pub fn new(config: BuilderConfig) -> Result<Self, SchemaError> {
        let schema_path = FieldPath::parse(&config.schema_path)?;
        let json_path = FieldPath::parse(&config.json_path)?;
        Ok(Self {
            config,
            schema_path,
            json_path,
            mode: Mode::Structured,
            mount_state: MountState::Pending,
            toggle_locked_until: None,
        })
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mount_state(&self) -> MountState {
        self.mount_state
    }

    /// Form path of the editable schema.
    pub fn schema_path(&self) -> &FieldPath {
        &self.schema_path
    }

    /// Form path of the raw-text schema.
    pub fn json_path(&self) -> &FieldPath {
        &self.json_path
    }

    pub fn is_toggle_locked(&self) -> bool {
        self.is_toggle_locked_at(Instant::now())
    }

    pub fn is_toggle_locked_at(&self, now: Instant) -> bool {
        self.toggle_locked_until.is_some_and(|until| now < until)
    }

    /// Check the initial schema and prepare it in place.
    ///
    /// A schema failing [`is_avro_structure`] is left untouched and the
    /// builder stays unusable.
    pub fn mount<F: FormState>(&mut self, form: &mut F) -> Result<MountState, SchemaError> {
        let schema = form.value(&self.schema_path).cloned().unwrap_or(Value::Null);
        self.mount_state = if is_avro_structure(&schema) {
            form.set_value(&self.schema_path, prepare_schema(&schema))?;
            debug!(path = %self.schema_path, "Mounted schema builder");
            MountState::Ready
        } else {
            warn!(
                path = %self.schema_path,
                "The passed Avro schema is invalid, the structure or types are invalid"
            );
            MountState::InvalidSchema
        };
        Ok(self.mount_state)
    }

    /// Switch between the structured editor and raw text.
    ///
    /// To raw text, the cleaned schema is written as pretty JSON. From raw
    /// text, the text is applied to the schema value first and the mode
    /// switches whenever the text is accepted, complete or not. While locked
    /// by a failed blur, toggling does nothing.
    pub fn toggle<F: FormState>(&mut self, form: &mut F) -> Result<Mode, SchemaError> {
        self.toggle_at(form, Instant::now())
    }

    pub fn toggle_at<F: FormState>(
        &mut self,
        form: &mut F,
        now: Instant,
    ) -> Result<Mode, SchemaError> {
        self.ensure_ready()?;
        if self.is_toggle_locked_at(now) {
            debug!("Mode toggle is locked");
            return Ok(self.mode);
        }

        match self.mode {
            Mode::Structured => {
                let schema = form.value(&self.schema_path).cloned().unwrap_or(Value::Null);
                let text = serde_json::to_string_pretty(&clean_schema(&schema)?)?;
                form.set_value(&self.json_path, Value::String(text))?;
                self.mode = Mode::RawText;
            }
            Mode::RawText => {
                if self.apply_json(form, now, false)? != JsonApplied::Rejected {
                    self.mode = Mode::Structured;
                }
            }
        }
        debug!(mode = ?self.mode, "Toggled mode");
        Ok(self.mode)
    }

    /// Apply the raw text when its input loses focus.
    ///
    /// The schema value is updated so a following submit sees it and the mode
    /// stays raw text. When the applied schema does not validate, the toggle
    /// locks so the click that caused the blur does not switch modes.
    /// Returns whether the text was applied.
    pub fn blur_json<F: FormState>(&mut self, form: &mut F) -> Result<bool, SchemaError> {
        self.blur_json_at(form, Instant::now())
    }

    pub fn blur_json_at<F: FormState>(
        &mut self,
        form: &mut F,
        now: Instant,
    ) -> Result<bool, SchemaError> {
        self.ensure_ready()?;
        Ok(self.apply_json(form, now, true)? != JsonApplied::Rejected)
    }

    /// Parse, prepare and store the raw text as the schema value.
    ///
    /// Before the first submit the text is validated here; afterwards the
    /// standing form error on the text decides. With `validate_avro` the
    /// stored schema is validated as well and the toggle locks when it fails.
    fn apply_json<F: FormState>(
        &mut self,
        form: &mut F,
        now: Instant,
        validate_avro: bool,
    ) -> Result<JsonApplied, SchemaError> {
        let text = self.json_text(form);

        if form.submit_count() == 0 {
            let message = validate_schema_json(&text);
            self.replace_errors(form, &self.json_path, message.map(ErrorTree::Message));
            if message.is_some() {
                return Ok(JsonApplied::Rejected);
            }
        } else if form.error(&self.json_path).is_some() {
            return Ok(JsonApplied::Rejected);
        }

        let text = if text.trim().is_empty() { "{}" } else { text.as_str() };
        let parsed: Value = match serde_json::from_str(text) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(error = %err, "Raw schema text does not parse");
                let message = ErrorTree::Message(ErrorMessage::InvalidJson);
                self.replace_errors(form, &self.json_path, Some(message));
                return Ok(JsonApplied::Rejected);
            }
        };
        let schema = prepare_schema(&parsed);
        form.set_value(&self.schema_path, schema.clone())?;
        debug!(path = %self.schema_path, "Applied raw schema text");

        if validate_avro && get_schema(&schema, self.config.doc_required)?.is_none() {
            warn!("Applied schema is not valid, staying in raw text mode");
            self.mode = Mode::RawText;
            self.toggle_locked_until = Some(now + self.config.toggle_lockout);
            return Ok(JsonApplied::Invalid);
        }
        Ok(JsonApplied::Valid)
    }

    /// Replace the members of the union at `path` to match selected labels.
    ///
    /// A single schema at `path` is edited as a union of one. Changing the
    /// root type is refused when the root is fixed.
    pub fn select_types<F: FormState>(
        &self,
        form: &mut F,
        path: &FieldPath,
        labels: &[String],
    ) -> Result<(), SchemaError> {
        self.ensure_ready()?;
        if self.config.fixed_root && path == &self.schema_path {
            return Err(SchemaError::invalid_path(&path.to_string(), "root type is fixed"));
        }

        let current = match form.value(path) {
            Some(Value::Array(members)) => members.clone(),
            Some(Value::Null) | None => Vec::new(),
            Some(single) => vec![single.clone()],
        };
        let old_labels = type_names(&current);
        let members = type_objects(labels, &current, &old_labels)?;
        form.set_value(path, Value::Array(members))?;
        self.revalidate(form)
    }

    /// Append a new field to the record at `record_path`.
    pub fn add_record_field<F: FormState>(
        &self,
        form: &mut F,
        record_path: &FieldPath,
    ) -> Result<(), SchemaError> {
        let fields_path = record_path.clone().key("fields");
        let fields = self.fields_at(form, &fields_path)?;
        form.set_value(&fields_path, Value::Array(add_field(&fields)))?;
        self.revalidate(form)
    }

    /// Remove the field at `index` from the record at `record_path`.
    pub fn remove_record_field<F: FormState>(
        &self,
        form: &mut F,
        record_path: &FieldPath,
        index: usize,
    ) -> Result<(), SchemaError> {
        let fields_path = record_path.clone().key("fields");
        let fields = self.fields_at(form, &fields_path)?;
        form.set_value(&fields_path, Value::Array(remove_field(&fields, index)))?;
        self.revalidate(form)
    }

    /// Set a plain attribute such as a name, doc or size.
    pub fn set_attribute<F: FormState>(
        &self,
        form: &mut F,
        path: &FieldPath,
        value: Value,
    ) -> Result<(), SchemaError> {
        form.set_value(path, value)?;
        self.revalidate(form)
    }

    fn fields_at<F: FormState>(
        &self,
        form: &F,
        fields_path: &FieldPath,
    ) -> Result<Vec<Value>, SchemaError> {
        match form.value(fields_path) {
            Some(Value::Array(fields)) => Ok(fields.clone()),
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(_) => Err(SchemaError::invalid_path(
                &fields_path.to_string(),
                "record fields must be an array",
            )),
        }
    }

    /// Validate the form as it stands.
    ///
    /// In raw text mode the text is checked first; its message is the only
    /// error when it fails. Otherwise the editable schema is validated.
    pub fn validate<F: FormState>(&self, form: &F) -> Option<ErrorTree> {
        if self.mode == Mode::RawText {
            if let Some(message) = validate_schema_json(&self.json_text(form)) {
                return Some(ErrorTree::Message(message).nest(&self.json_path));
            }
        }
        let schema = form.value(&self.schema_path).cloned().unwrap_or(Value::Null);
        validate_schema(&schema, self.config.doc_required)
            .map(|errors| errors.nest(&self.schema_path))
    }

    /// Validate again after a change, once a submit was attempted.
    pub fn revalidate<F: FormState>(&self, form: &mut F) -> Result<(), SchemaError> {
        if form.submit_count() > 0 {
            form.set_errors(self.validate(form));
        }
        Ok(())
    }

    /// Attempt a submit, returning the canonical schema when it is valid.
    ///
    /// In raw text mode valid text is applied to the schema value first.
    pub fn submit<F: FormState>(&mut self, form: &mut F) -> Result<Option<Value>, SchemaError> {
        self.ensure_ready()?;
        form.increment_submit_count();

        if self.mode == Mode::RawText && validate_schema_json(&self.json_text(form)).is_none() {
            let text = self.json_text(form);
            let parsed: Value = serde_json::from_str(&text)?;
            form.set_value(&self.schema_path, prepare_schema(&parsed))?;
        }

        let errors = self.validate(form);
        let valid = errors.is_none();
        form.set_errors(errors);
        if !valid {
            debug!(submit_count = form.submit_count(), "Submit rejected");
            return Ok(None);
        }

        let schema = form.value(&self.schema_path).cloned().unwrap_or(Value::Null);
        clean_schema(&schema).map(Some)
    }

    fn json_text<F: FormState>(&self, form: &F) -> String {
        match form.value(&self.json_path) {
            Some(Value::String(text)) => text.clone(),
            _ => String::new(),
        }
    }

    fn replace_errors<F: FormState>(
        &self,
        form: &mut F,
        path: &FieldPath,
        errors: Option<ErrorTree>,
    ) {
        let remaining = form.errors().cloned().and_then(|existing| existing.without(path));
        let merged = match (remaining, errors) {
            (Some(existing), Some(errors)) => Some(existing.merge(errors.nest(path))),
            (None, Some(errors)) => Some(errors.nest(path)),
            (remaining, None) => remaining,
        };
        form.set_errors(merged);
    }

    fn ensure_ready(&self) -> Result<(), SchemaError> {
        match self.mount_state {
            MountState::Ready => Ok(()),
            MountState::Pending => Err(SchemaError::InvalidSchema(
                "builder is not mounted".to_string(),
            )),
            MountState::InvalidSchema => Err(SchemaError::InvalidSchema(
                "the passed Avro schema is invalid".to_string(),
            )),
        }
    }
}
