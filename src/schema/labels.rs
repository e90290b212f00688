//! Display labels for schema objects within a union.
//!
//! A union is edited through a multi-select of type labels. Primitives and
//! complex types are labelled by their type name, logical types by their
//! display label (`"decimal (bytes)"`, `"timestamp μs"`, ...). Named types may
//! occur several times in one union and are then numbered (`"enum 1"`,
//! `"enum 2"`); the selector offers `"enum +"` to add another one.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::schema::types::{
    is_logical, is_type_named, type_of, Complex, LogicalKind, Primitive, SchemaKind, TypeName,
};

/// Suffix appended to a named type label to offer adding another one.
pub const ADD_SUFFIX: &str = "+";

static TYPE_NAME_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s(\d+|\+)").expect("invalid type name suffix regex"));

/// Get the label of a schema object, optionally numbered.
///
/// Logical objects get their display label and are never numbered.
///
/// # Example
/// ```
/// use avro_schema_builder::schema::type_name;
/// use serde_json::json;
///
/// assert_eq!(type_name(&json!({"type": "enum"}), Some(2)), "enum 2");
/// assert_eq!(type_name(&json!({"type": "int", "logicalType": "date"}), None), "date");
/// ```
pub fn type_name(schema: &Value, ordinal: Option<usize>) -> String {
    if let Some(SchemaKind::Logical(kind)) = SchemaKind::classify(schema) {
        return kind.label().to_string();
    }
    let type_str = type_of(schema).unwrap_or_default();
    match ordinal {
        Some(n) if n > 0 => format!("{} {}", type_str, n),
        _ => type_str.to_string(),
    }
}

/// Get the labels of all members of a union.
///
/// Named types that occur more than once are numbered 1..K in positional
/// order; every other member gets its plain label.
pub fn type_names(union: &[Value]) -> Vec<String> {
    fn named_type(schema: &Value) -> Option<&str> {
        if is_logical(schema) {
            return None;
        }
        type_of(schema).filter(|t| is_type_named(t))
    }

    let total = |name: &str| union.iter().filter(|s| named_type(s) == Some(name)).count();
    let mut seen: Vec<(&str, usize)> = Vec::new();

    union
        .iter()
        .map(|schema| match named_type(schema) {
            Some(name) if total(name) > 1 => {
                let ordinal = match seen.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, count)) => {
                        *count += 1;
                        *count
                    }
                    None => {
                        seen.push((name, 1));
                        1
                    }
                };
                type_name(schema, Some(ordinal))
            }
            _ => type_name(schema, None),
        })
        .collect()
}

/// Remove the numbering or add suffix from a label.
///
/// Only the first whitespace followed by digits or `+` is removed, so
/// `"enum 2"` and `"enum +"` both become `"enum"` while `"time μs"` is kept.
pub fn strip_type_name_suffix(label: &str) -> Cow<'_, str> {
    TYPE_NAME_SUFFIX.replace(label, "")
}

/// Get the options of the type selector for a union with the given labels.
///
/// All primitives, then `array`, the existing enums followed by `enum +`, the
/// existing fixed types followed by `fixed +`, `map`, the existing records
/// followed by `record +`, and finally every logical label. Existing named
/// types are numbered when there is more than one of a kind.
pub fn type_options(labels: &[String]) -> Vec<String> {
    let count = |kind: Complex| -> usize {
        let name = kind.name();
        labels
            .iter()
            .rev()
            .find_map(|label| {
                if label == name {
                    Some(1)
                } else {
                    label
                        .strip_prefix(name)
                        .and_then(|rest| rest.strip_prefix(' '))
                        .map(|rest| rest.parse::<usize>().unwrap_or(1))
                }
            })
            .unwrap_or(0)
    };

    let named = |kind: Complex| -> Vec<String> {
        let total = count(kind);
        let mut options: Vec<String> = (1..=total)
            .map(|n| {
                if total > 1 {
                    format!("{} {}", kind.name(), n)
                } else {
                    kind.name().to_string()
                }
            })
            .collect();
        options.push(format!("{} {}", kind.name(), ADD_SUFFIX));
        options
    };

    let mut options: Vec<String> = Primitive::ALL.iter().map(|p| p.name().to_string()).collect();
    options.push(Complex::Array.name().to_string());
    options.extend(named(Complex::Enum));
    options.extend(named(Complex::Fixed));
    options.push(Complex::Map.name().to_string());
    options.extend(named(Complex::Record));
    options.extend(LogicalKind::ALL.iter().map(|k| k.label().to_string()));
    options
}

/// Parse a selector label (numbered or not) into its catalog type name.
pub fn parse_label(label: &str) -> Option<TypeName> {
    TypeName::parse(&strip_type_name_suffix(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_name() {
        assert_eq!(type_name(&json!({"type": "int"}), None), "int");
        assert_eq!(type_name(&json!({"type": "enum", "name": "e"}), None), "enum");
        assert_eq!(type_name(&json!({"type": "enum", "name": "e"}), Some(2)), "enum 2");
        assert_eq!(
            type_name(&json!({"type": "bytes", "logicalType": "decimal", "precision": 4}), Some(3)),
            "decimal (bytes)"
        );
    }

    #[test]
    fn test_type_names_numbering() {
        let union = vec![
            json!({"type": "int"}),
            json!({"type": "fixed", "logicalType": "duration", "name": "d", "size": 12}),
            json!({"type": "enum", "name": "a", "symbols": []}),
        ];
        assert_eq!(type_names(&union), vec!["int", "duration", "enum"]);

        let union = vec![
            json!({"type": "enum", "name": "a"}),
            json!({"type": "enum", "name": "b"}),
            json!({"type": "fixed", "name": "f", "size": 1}),
        ];
        assert_eq!(type_names(&union), vec!["enum 1", "enum 2", "fixed"]);
    }

    #[test]
    fn test_type_names_empty() {
        assert!(type_names(&[]).is_empty());
    }

    #[test]
    fn test_strip_type_name_suffix() {
        assert_eq!(strip_type_name_suffix("type +"), "type");
        assert_eq!(strip_type_name_suffix("type 123"), "type");
        assert_eq!(strip_type_name_suffix("type €"), "type €");
        assert_eq!(strip_type_name_suffix("local timestamp μs"), "local timestamp μs");
    }

    #[test]
    fn test_type_options() {
        let options = type_options(&[]);
        assert_eq!(options.len(), 8 + 1 + 1 + 1 + 1 + 1 + 11);
        assert!(options.contains(&"enum +".to_string()));
        assert!(!options.contains(&"enum".to_string()));

        let labels: Vec<String> = ["int", "enum 1", "enum 2", "fixed"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let options = type_options(&labels);
        let enum_at = options.iter().position(|o| o == "enum 1").unwrap();
        assert_eq!(&options[enum_at..enum_at + 5], &["enum 1", "enum 2", "enum +", "fixed", "fixed +"]);
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label("record 3"), Some(TypeName::Complex(Complex::Record)));
        assert_eq!(parse_label("time ms"), Some(TypeName::Logical(LogicalKind::TimeMillis)));
        assert_eq!(parse_label("integer"), None);
    }
}
