//! Validation messages and the error tree mirroring a schema's shape.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde_json::{Map, Value};

use crate::path::{FieldPath, PathSegment};

/// Hint shown when a `name` does not match the name grammar.
pub const NAME_FORMAT_INFO: &str = "*Name format: Non-accented character or underscore, followed by any amount of non-accented characters, numbers or underscores mixed.";

/// Hint shown when a `namespace` does not match the namespace grammar.
pub const NAMESPACE_FORMAT_INFO: &str =
    "*Namespace format: One or more parts with name format, separated by a dot.";

/// A validation message from the fixed vocabulary shown next to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorMessage {
    /// Value missing (empty strings count as missing)
    Required,
    /// Name or namespace does not match its grammar; the `*` refers to the format hint
    Format,
    /// Value is not a number
    Number,
    Positive,
    Integer,
    /// Value differs from the only allowed bound, e.g. a duration size other than 12
    Bound(i64),
    /// Enum default that is not one of the symbols
    NotASymbol,
    /// Raw text is empty
    EmptySchema,
    /// Raw text is not a JSON object or array
    InvalidJson,
    /// Raw text is JSON but not an Avro schema structure
    InvalidStructure,
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorMessage::Required => f.write_str("Required"),
            ErrorMessage::Format => f.write_str("Format*"),
            ErrorMessage::Number => f.write_str("Number"),
            ErrorMessage::Positive => f.write_str("Positive"),
            ErrorMessage::Integer => f.write_str("Integer"),
            ErrorMessage::Bound(bound) => write!(f, "{}", bound),
            ErrorMessage::NotASymbol => f.write_str("Not a symbol"),
            ErrorMessage::EmptySchema => f.write_str("Please enter an Avro schema."),
            ErrorMessage::InvalidJson => f.write_str("Please enter valid JSON."),
            ErrorMessage::InvalidStructure => {
                f.write_str("Please enter an Avro schema structure.")
            }
        }
    }
}

/// Validation errors shaped like the validated value.
///
/// Objects map keys to nested errors; arrays keep one slot per element, empty
/// for valid elements. A tree never contains empty objects or arrays without
/// errors: those are represented by the absence of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorTree {
    Message(ErrorMessage),
    Object(BTreeMap<String, ErrorTree>),
    Array(Vec<Option<ErrorTree>>),
}

impl ErrorTree {
    /// Build an object tree, or `None` when no entry has errors.
    pub fn from_entries(entries: BTreeMap<String, ErrorTree>) -> Option<Self> {
        (!entries.is_empty()).then_some(ErrorTree::Object(entries))
    }

    /// Build an array tree, or `None` when no element has errors.
    pub fn from_items(items: impl IntoIterator<Item = Option<ErrorTree>>) -> Option<Self> {
        let items: Vec<Option<ErrorTree>> = items.into_iter().collect();
        items.iter().any(Option::is_some).then_some(ErrorTree::Array(items))
    }

    pub fn as_message(&self) -> Option<ErrorMessage> {
        match self {
            ErrorTree::Message(message) => Some(*message),
            _ => None,
        }
    }

    /// Get the subtree at a path relative to this tree.
    pub fn get(&self, path: &FieldPath) -> Option<&ErrorTree> {
        path.segments()
            .iter()
            .try_fold(self, |tree, segment| match (tree, segment) {
                (ErrorTree::Object(entries), PathSegment::Key(key)) => entries.get(key),
                (ErrorTree::Array(items), PathSegment::Index(index)) => {
                    items.get(*index).and_then(Option::as_ref)
                }
                _ => None,
            })
    }

    /// Get the message at a path relative to this tree.
    pub fn message(&self, path: &FieldPath) -> Option<ErrorMessage> {
        self.get(path).and_then(ErrorTree::as_message)
    }

    /// All messages with their paths, in key and position order.
    pub fn messages(&self) -> Vec<(FieldPath, ErrorMessage)> {
        let mut out = Vec::new();
        self.collect_messages(FieldPath::root(), &mut out);
        out
    }

    fn collect_messages(&self, path: FieldPath, out: &mut Vec<(FieldPath, ErrorMessage)>) {
        match self {
            ErrorTree::Message(message) => out.push((path, *message)),
            ErrorTree::Object(entries) => {
                for (key, tree) in entries {
                    tree.collect_messages(path.clone().key(key.as_str()), out);
                }
            }
            ErrorTree::Array(items) => {
                for (index, tree) in items.iter().enumerate() {
                    if let Some(tree) = tree {
                        tree.collect_messages(path.clone().index(index), out);
                    }
                }
            }
        }
    }

    /// Render as JSON, valid array elements as `null`.
    pub fn to_json_value(&self) -> Value {
        match self {
            ErrorTree::Message(message) => Value::String(message.to_string()),
            ErrorTree::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, tree)| (key.clone(), tree.to_json_value()))
                    .collect::<Map<String, Value>>(),
            ),
            ErrorTree::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|tree| tree.as_ref().map_or(Value::Null, ErrorTree::to_json_value))
                    .collect(),
            ),
        }
    }

    /// Place this tree at `path` within an otherwise empty tree.
    pub fn nest(self, path: &FieldPath) -> ErrorTree {
        path.segments()
            .iter()
            .rev()
            .fold(self, |tree, segment| match segment {
                PathSegment::Key(key) => ErrorTree::Object(BTreeMap::from([(key.clone(), tree)])),
                PathSegment::Index(index) => {
                    let mut items = vec![None; *index];
                    items.push(Some(tree));
                    ErrorTree::Array(items)
                }
            })
    }

    /// Merge two trees; on conflicting leaves `other` wins.
    pub fn merge(self, other: ErrorTree) -> ErrorTree {
        match (self, other) {
            (ErrorTree::Object(mut entries), ErrorTree::Object(others)) => {
                for (key, tree) in others {
                    let merged = match entries.remove(&key) {
                        Some(existing) => existing.merge(tree),
                        None => tree,
                    };
                    entries.insert(key, merged);
                }
                ErrorTree::Object(entries)
            }
            (ErrorTree::Array(mut items), ErrorTree::Array(others)) => {
                if items.len() < others.len() {
                    items.resize(others.len(), None);
                }
                for (slot, tree) in items.iter_mut().zip(others) {
                    if let Some(tree) = tree {
                        *slot = Some(match slot.take() {
                            Some(existing) => existing.merge(tree),
                            None => tree,
                        });
                    }
                }
                ErrorTree::Array(items)
            }
            (_, other) => other,
        }
    }

    /// Remove the subtree at `path`, or everything for the root path.
    pub fn without(self, path: &FieldPath) -> Option<ErrorTree> {
        self.without_segments(path.segments())
    }

    fn without_segments(self, path: &[PathSegment]) -> Option<ErrorTree> {
        let Some((first, rest)) = path.split_first() else {
            return None;
        };
        match (self, first) {
            (ErrorTree::Object(mut entries), PathSegment::Key(key)) => {
                if let Some(child) = entries.remove(key).and_then(|c| c.without_segments(rest)) {
                    entries.insert(key.clone(), child);
                }
                ErrorTree::from_entries(entries)
            }
            (ErrorTree::Array(mut items), PathSegment::Index(index)) => {
                if let Some(slot) = items.get_mut(*index) {
                    *slot = slot.take().and_then(|c| c.without_segments(rest));
                }
                ErrorTree::from_items(items)
            }
            (tree, _) => Some(tree),
        }
    }

    fn has_format_error_at(&self, key: &str) -> bool {
        match self {
            ErrorTree::Message(_) => false,
            ErrorTree::Object(entries) => entries.iter().any(|(k, tree)| {
                (k == key && tree.as_message() == Some(ErrorMessage::Format))
                    || tree.has_format_error_at(key)
            }),
            ErrorTree::Array(items) => items.iter().flatten().any(|tree| tree.has_format_error_at(key)),
        }
    }
}

/// Which grammar hints have to be displayed for a set of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorsInfoNeed {
    pub name: bool,
    pub namespace: bool,
}

impl ErrorsInfoNeed {
    /// Hint texts to display, name hint first.
    ///
    /// The namespace hint refers to the name format, so it brings the name
    /// hint along.
    pub fn hints(&self) -> Vec<&'static str> {
        let mut hints = Vec::new();
        if self.name || self.namespace {
            hints.push(NAME_FORMAT_INFO);
        }
        if self.namespace {
            hints.push(NAMESPACE_FORMAT_INFO);
        }
        hints
    }
}

/// Check whether any `name` or `namespace` in the errors has a format error.
///
/// Returns `None` when no hint is needed.
pub fn errors_info_need(errors: Option<&ErrorTree>) -> Option<ErrorsInfoNeed> {
    let errors = errors?;
    let need = ErrorsInfoNeed {
        name: errors.has_format_error_at("name"),
        namespace: errors.has_format_error_at("namespace"),
    };
    (need.name || need.namespace).then_some(need)
}
