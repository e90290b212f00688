//! Schema builder configuration

use std::time::Duration;

/// Default form path of the editable schema.
pub const DEFAULT_SCHEMA_PATH: &str = "schema";

/// Default form path of the raw-text schema.
pub const DEFAULT_JSON_PATH: &str = "schemaJSON";

/// Default time the mode toggle stays locked after a reverted switch.
pub const DEFAULT_TOGGLE_LOCKOUT: Duration = Duration::from_millis(200);

/// Configuration for a [`crate::editor::SchemaBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Require `doc` on named types and record fields (default: false).
    pub doc_required: bool,
    /// Keep the root type fixed; the root type selector is not offered (default: false).
    pub fixed_root: bool,
    /// Form path of the editable schema (default: `"schema"`).
    pub schema_path: String,
    /// Form path of the raw-text schema (default: `"schemaJSON"`).
    pub json_path: String,
    /// Lockout of the mode toggle after a reverted switch (default: 200 ms).
    pub toggle_lockout: Duration,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            doc_required: false,
            fixed_root: false,
            schema_path: DEFAULT_SCHEMA_PATH.to_string(),
            json_path: DEFAULT_JSON_PATH.to_string(),
            toggle_lockout: DEFAULT_TOGGLE_LOCKOUT,
        }
    }
}

impl BuilderConfig {
    /// Create a new BuilderConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `doc` on named types and record fields.
    pub fn with_doc_required(mut self, doc_required: bool) -> Self {
        self.doc_required = doc_required;
        self
    }

    /// Keep the root type fixed.
    pub fn with_fixed_root(mut self, fixed_root: bool) -> Self {
        self.fixed_root = fixed_root;
        self
    }

    /// Set the form path of the editable schema.
    pub fn with_schema_path(mut self, path: impl Into<String>) -> Self {
        self.schema_path = path.into();
        self
    }

    /// Set the form path of the raw-text schema.
    pub fn with_json_path(mut self, path: impl Into<String>) -> Self {
        self.json_path = path.into();
        self
    }

    pub fn with_toggle_lockout(mut self, lockout: Duration) -> Self {
        self.toggle_lockout = lockout;
        self
    }
}
