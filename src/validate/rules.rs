//! Attribute-level rules shared by the schema validators.
//!
//! Empty strings are treated as missing values throughout, as they are the
//! placeholders of untouched inputs.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::schema::csv_to_vec;
use crate::validate::errors::ErrorMessage;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("invalid name regex"));

static NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("invalid namespace regex")
});

/// Check whether a name matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_name(name: &str) -> bool {
    NAME.is_match(name)
}

/// Check whether a namespace is dot-separated names.
pub fn is_valid_namespace(namespace: &str) -> bool {
    NAMESPACE.is_match(namespace)
}

/// Allowed range of an integer attribute.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Bound {
    Positive,
    NonNegative,
    Exactly(i64),
}

/// Get an attribute, treating `null` and empty strings as missing.
pub(crate) fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|value| match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

/// Text of a scalar attribute; numbers and booleans are taken as typed.
pub(crate) fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn required(obj: &Map<String, Value>, key: &str) -> Option<ErrorMessage> {
    present(obj, key).is_none().then_some(ErrorMessage::Required)
}

pub(crate) fn name(obj: &Map<String, Value>) -> Option<ErrorMessage> {
    match present(obj, "name") {
        None => Some(ErrorMessage::Required),
        Some(value) => (!is_valid_name(&as_text(value))).then_some(ErrorMessage::Format),
    }
}

pub(crate) fn namespace(obj: &Map<String, Value>) -> Option<ErrorMessage> {
    present(obj, "namespace")
        .filter(|value| !is_valid_namespace(&as_text(value)))
        .map(|_| ErrorMessage::Format)
}

/// Check an integer attribute, given as a JSON number or numeric text.
pub(crate) fn integer(
    obj: &Map<String, Value>,
    key: &str,
    is_required: bool,
    bound: Bound,
) -> Option<ErrorMessage> {
    let Some(value) = present(obj, key) else {
        return is_required.then_some(ErrorMessage::Required);
    };
    let Some(number) = as_number(value) else {
        return Some(ErrorMessage::Number);
    };

    match bound {
        Bound::Exactly(expected) => {
            return (number != expected as f64).then_some(ErrorMessage::Bound(expected));
        }
        Bound::Positive if number <= 0.0 => return Some(ErrorMessage::Positive),
        Bound::NonNegative if number < 0.0 => return Some(ErrorMessage::Bound(0)),
        _ => {}
    }
    (number.fract() != 0.0).then_some(ErrorMessage::Integer)
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Check an enum default against the symbols, comma-separated or an array.
///
/// Missing symbols count as an empty list, so any default fails.
pub(crate) fn enum_default(obj: &Map<String, Value>) -> Option<ErrorMessage> {
    let default = as_text(present(obj, "default")?);
    let is_symbol = match present(obj, "symbols") {
        None => false,
        Some(Value::Array(symbols)) => symbols.iter().any(|symbol| as_text(symbol) == default),
        Some(value) => csv_to_vec(&as_text(value)).contains(&default),
    };
    (!is_symbol).then_some(ErrorMessage::NotASymbol)
}

/// Check that enum symbols are given, as text or as a non-empty array.
pub(crate) fn enum_symbols(obj: &Map<String, Value>) -> Option<ErrorMessage> {
    match present(obj, "symbols") {
        None => Some(ErrorMessage::Required),
        Some(Value::Array(symbols)) if symbols.is_empty() => Some(ErrorMessage::Required),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_name_grammar() {
        assert!(is_valid_name("_a1"));
        assert!(is_valid_name("Record"));
        assert!(!is_valid_name("1a"));
        assert!(!is_valid_name("invalid name"));
        assert!(!is_valid_name("é"));
        assert!(is_valid_namespace("a.b_2.C"));
        assert!(!is_valid_namespace("a..b"));
        assert!(!is_valid_namespace(".a"));
    }

    #[test]
    fn test_name_rule() {
        assert_eq!(name(&obj(json!({"name": ""}))), Some(ErrorMessage::Required));
        assert_eq!(name(&obj(json!({}))), Some(ErrorMessage::Required));
        assert_eq!(name(&obj(json!({"name": "invalid name"}))), Some(ErrorMessage::Format));
        assert_eq!(name(&obj(json!({"name": "ok"}))), None);
        assert_eq!(namespace(&obj(json!({"namespace": ""}))), None);
        assert_eq!(namespace(&obj(json!({"namespace": "a..b"}))), Some(ErrorMessage::Format));
    }

    #[test]
    fn test_integer_rule() {
        let check = |value: Value, bound| integer(&obj(json!({ "n": value })), "n", true, bound);
        assert_eq!(check(json!(""), Bound::Positive), Some(ErrorMessage::Required));
        assert_eq!(check(json!("abc"), Bound::Positive), Some(ErrorMessage::Number));
        assert_eq!(check(json!("-2"), Bound::Positive), Some(ErrorMessage::Positive));
        assert_eq!(check(json!(0), Bound::Positive), Some(ErrorMessage::Positive));
        assert_eq!(check(json!(1.5), Bound::Positive), Some(ErrorMessage::Integer));
        assert_eq!(check(json!("16"), Bound::Positive), None);
        assert_eq!(check(json!(0), Bound::NonNegative), None);
        assert_eq!(check(json!(-1), Bound::NonNegative), Some(ErrorMessage::Bound(0)));
        assert_eq!(check(json!(11), Bound::Exactly(12)), Some(ErrorMessage::Bound(12)));
        assert_eq!(check(json!("12"), Bound::Exactly(12)), None);
        assert_eq!(integer(&obj(json!({})), "n", false, Bound::NonNegative), None);
    }

    #[test]
    fn test_enum_rules() {
        let value = obj(json!({"symbols": "a, b", "default": "b"}));
        assert_eq!(enum_default(&value), None);
        let value = obj(json!({"symbols": ["a", "b"], "default": "c"}));
        assert_eq!(enum_default(&value), Some(ErrorMessage::NotASymbol));
        let value = obj(json!({"default": "c"}));
        assert_eq!(enum_default(&value), Some(ErrorMessage::NotASymbol));
        let value = obj(json!({"symbols": "", "default": "c"}));
        assert_eq!(enum_default(&value), Some(ErrorMessage::NotASymbol));
        let value = obj(json!({"symbols": "", "default": ""}));
        assert_eq!(enum_default(&value), None);

        assert_eq!(enum_symbols(&obj(json!({"symbols": ""}))), Some(ErrorMessage::Required));
        assert_eq!(enum_symbols(&obj(json!({"symbols": []}))), Some(ErrorMessage::Required));
        assert_eq!(enum_symbols(&obj(json!({"symbols": "A"}))), None);
    }
}
