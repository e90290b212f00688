//! Avro type grammar and schema classification.
//!
//! This module defines the closed set of Avro type names the builder knows
//! about (primitives, complex types, and the logical annotations layered on
//! top of them) together with the predicates used to dispatch on the shape of
//! a schema value.
//!
//! Schemas are kept as [`serde_json::Value`] throughout the builder because the
//! editable form is a superset of canonical Avro (placeholders, CSV strings,
//! identities). [`SchemaKind::classify`] gives the typed view of such a value.

use serde_json::{Map, Value};

/// Key holding the `type` tag of a schema object.
pub const TYPE_KEY: &str = "type";

/// Key holding the logical annotation of a schema object.
pub const LOGICAL_TYPE_KEY: &str = "logicalType";

/// Avro primitive types, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Boolean type.
    Boolean,
    /// Sequence of bytes.
    Bytes,
    /// 64-bit IEEE 754 floating-point.
    Double,
    /// 32-bit IEEE 754 floating-point.
    Float,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// Null type - no value.
    Null,
    /// Unicode string.
    String,
}

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::Boolean,
        Primitive::Bytes,
        Primitive::Double,
        Primitive::Float,
        Primitive::Int,
        Primitive::Long,
        Primitive::Null,
        Primitive::String,
    ];

    /// Get the Avro name of the primitive.
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Bytes => "bytes",
            Primitive::Double => "double",
            Primitive::Float => "float",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Null => "null",
            Primitive::String => "string",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// Avro complex types, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Complex {
    /// Array of items with a single schema.
    Array,
    /// Enumeration type.
    Enum,
    /// Fixed-size byte array.
    Fixed,
    /// Map with string keys and values of a single schema.
    Map,
    /// Record type with named fields.
    Record,
}

impl Complex {
    pub const ALL: [Complex; 5] = [
        Complex::Array,
        Complex::Enum,
        Complex::Fixed,
        Complex::Map,
        Complex::Record,
    ];

    /// Get the Avro name of the complex type.
    pub fn name(&self) -> &'static str {
        match self {
            Complex::Array => "array",
            Complex::Enum => "enum",
            Complex::Fixed => "fixed",
            Complex::Map => "map",
            Complex::Record => "record",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Check if this is a named type (enum, fixed, or record).
    pub fn is_named(&self) -> bool {
        matches!(self, Complex::Enum | Complex::Fixed | Complex::Record)
    }
}

/// Values of the `logicalType` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalTypeName {
    /// Date (days since Unix epoch).
    Date,
    /// Decimal with precision and scale.
    Decimal,
    /// Duration (months, days, milliseconds).
    Duration,
    /// Local timestamp in microseconds (no timezone).
    LocalTimestampMicros,
    /// Local timestamp in milliseconds (no timezone).
    LocalTimestampMillis,
    /// Time in microseconds.
    TimeMicros,
    /// Time in milliseconds.
    TimeMillis,
    /// Timestamp in microseconds since Unix epoch.
    TimestampMicros,
    /// Timestamp in milliseconds since Unix epoch.
    TimestampMillis,
    /// UUID stored as a string.
    Uuid,
}

impl LogicalTypeName {
    pub const ALL: [LogicalTypeName; 10] = [
        LogicalTypeName::Date,
        LogicalTypeName::Decimal,
        LogicalTypeName::Duration,
        LogicalTypeName::LocalTimestampMicros,
        LogicalTypeName::LocalTimestampMillis,
        LogicalTypeName::TimeMicros,
        LogicalTypeName::TimeMillis,
        LogicalTypeName::TimestampMicros,
        LogicalTypeName::TimestampMillis,
        LogicalTypeName::Uuid,
    ];

    /// Get the string name of the logical type.
    pub fn name(&self) -> &'static str {
        match self {
            LogicalTypeName::Date => "date",
            LogicalTypeName::Decimal => "decimal",
            LogicalTypeName::Duration => "duration",
            LogicalTypeName::LocalTimestampMicros => "local-timestamp-micros",
            LogicalTypeName::LocalTimestampMillis => "local-timestamp-millis",
            LogicalTypeName::TimeMicros => "time-micros",
            LogicalTypeName::TimeMillis => "time-millis",
            LogicalTypeName::TimestampMicros => "timestamp-micros",
            LogicalTypeName::TimestampMillis => "timestamp-millis",
            LogicalTypeName::Uuid => "uuid",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.name() == name)
    }
}

/// The valid (logicalType, type) combinations.
///
/// Each variant is one row of the closed logical table and carries its own
/// display label; the variants are listed in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKind {
    Date,
    DecimalBytes,
    DecimalFixed,
    Duration,
    LocalTimestampMillis,
    LocalTimestampMicros,
    TimeMillis,
    TimeMicros,
    TimestampMillis,
    TimestampMicros,
    Uuid,
}

impl LogicalKind {
    pub const ALL: [LogicalKind; 11] = [
        LogicalKind::Date,
        LogicalKind::DecimalBytes,
        LogicalKind::DecimalFixed,
        LogicalKind::Duration,
        LogicalKind::LocalTimestampMillis,
        LogicalKind::LocalTimestampMicros,
        LogicalKind::TimeMillis,
        LogicalKind::TimeMicros,
        LogicalKind::TimestampMillis,
        LogicalKind::TimestampMicros,
        LogicalKind::Uuid,
    ];

    /// Label shown to the user for this logical type.
    pub fn label(&self) -> &'static str {
        match self {
            LogicalKind::Date => "date",
            LogicalKind::DecimalBytes => "decimal (bytes)",
            LogicalKind::DecimalFixed => "decimal (fixed)",
            LogicalKind::Duration => "duration",
            LogicalKind::LocalTimestampMillis => "local timestamp ms",
            LogicalKind::LocalTimestampMicros => "local timestamp μs",
            LogicalKind::TimeMillis => "time ms",
            LogicalKind::TimeMicros => "time μs",
            LogicalKind::TimestampMillis => "timestamp ms",
            LogicalKind::TimestampMicros => "timestamp μs",
            LogicalKind::Uuid => "uuid",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }

    /// The `logicalType` attribute of this kind.
    pub fn logical_type(&self) -> LogicalTypeName {
        match self {
            LogicalKind::Date => LogicalTypeName::Date,
            LogicalKind::DecimalBytes | LogicalKind::DecimalFixed => LogicalTypeName::Decimal,
            LogicalKind::Duration => LogicalTypeName::Duration,
            LogicalKind::LocalTimestampMillis => LogicalTypeName::LocalTimestampMillis,
            LogicalKind::LocalTimestampMicros => LogicalTypeName::LocalTimestampMicros,
            LogicalKind::TimeMillis => LogicalTypeName::TimeMillis,
            LogicalKind::TimeMicros => LogicalTypeName::TimeMicros,
            LogicalKind::TimestampMillis => LogicalTypeName::TimestampMillis,
            LogicalKind::TimestampMicros => LogicalTypeName::TimestampMicros,
            LogicalKind::Uuid => LogicalTypeName::Uuid,
        }
    }

    /// The `type` attribute the annotation is layered on.
    pub fn base_type(&self) -> &'static str {
        match self {
            LogicalKind::Date | LogicalKind::TimeMillis => Primitive::Int.name(),
            LogicalKind::DecimalBytes => Primitive::Bytes.name(),
            LogicalKind::DecimalFixed | LogicalKind::Duration => Complex::Fixed.name(),
            LogicalKind::LocalTimestampMillis
            | LogicalKind::LocalTimestampMicros
            | LogicalKind::TimeMicros
            | LogicalKind::TimestampMillis
            | LogicalKind::TimestampMicros => Primitive::Long.name(),
            LogicalKind::Uuid => Primitive::String.name(),
        }
    }

    /// Look up the table row for a (logicalType, type) pair.
    pub fn from_pair(logical_type: &str, base_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.logical_type().name() == logical_type && k.base_type() == base_type)
    }

    /// Check if the annotation sits on a fixed (and so carries the named attributes).
    pub fn is_fixed_based(&self) -> bool {
        self.base_type() == Complex::Fixed.name()
    }
}

/// A type as offered in the type selector: primitive, complex, or logical label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    Primitive(Primitive),
    Complex(Complex),
    Logical(LogicalKind),
}

impl TypeName {
    /// The ordered catalog of all type names: primitives, then complex, then logical.
    ///
    /// This order drives where a newly selected union member is inserted.
    pub fn catalog() -> impl Iterator<Item = TypeName> {
        Primitive::ALL
            .into_iter()
            .map(TypeName::Primitive)
            .chain(Complex::ALL.into_iter().map(TypeName::Complex))
            .chain(LogicalKind::ALL.into_iter().map(TypeName::Logical))
    }

    /// Parse a catalog label back into a type name.
    pub fn parse(label: &str) -> Option<Self> {
        Self::catalog().find(|t| t.as_str() == label)
    }

    /// The label of this type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::Primitive(p) => p.name(),
            TypeName::Complex(c) => c.name(),
            TypeName::Logical(l) => l.label(),
        }
    }

    /// Position of this type name within [`TypeName::catalog`].
    pub fn catalog_index(&self) -> usize {
        Self::catalog().position(|t| t == *self).unwrap_or(0)
    }

    /// Check if this is a named type (enum, fixed, or record without annotation).
    pub fn is_named(&self) -> bool {
        matches!(self, TypeName::Complex(c) if c.is_named())
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeName::Primitive(_))
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view of a schema value.
///
/// Logical annotations are recognized before the complex/primitive shape they
/// are layered on, so a `{"type": "fixed", "logicalType": "duration"}` is
/// [`SchemaKind::Logical`] and never [`SchemaKind::Fixed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// Bare primitive string, e.g. `"int"`.
    Primitive(Primitive),
    /// Primitive wrapped as an object, e.g. `{"type": "int"}`.
    PrimitiveObject(Primitive),
    Array,
    Map,
    Enum,
    Fixed,
    Record,
    /// A valid row of the logical table.
    Logical(LogicalKind),
    /// A known `logicalType` on a base type it cannot annotate.
    InvalidLogical,
    /// A JSON array of schemas.
    Union,
}

impl SchemaKind {
    /// Classify a schema value, or `None` when it is not a recognizable schema.
    pub fn classify(value: &Value) -> Option<SchemaKind> {
        match value {
            Value::Array(_) => Some(SchemaKind::Union),
            Value::String(s) => Primitive::from_name(s).map(SchemaKind::Primitive),
            Value::Object(obj) => Self::classify_object(obj),
            _ => None,
        }
    }

    fn classify_object(obj: &Map<String, Value>) -> Option<SchemaKind> {
        let type_str = obj.get(TYPE_KEY)?.as_str()?;

        if let Some(logical) = known_logical_type(obj) {
            return Some(match LogicalKind::from_pair(logical.name(), type_str) {
                Some(kind) => SchemaKind::Logical(kind),
                None => SchemaKind::InvalidLogical,
            });
        }

        if let Some(complex) = Complex::from_name(type_str) {
            return Some(match complex {
                Complex::Array => SchemaKind::Array,
                Complex::Enum => SchemaKind::Enum,
                Complex::Fixed => SchemaKind::Fixed,
                Complex::Map => SchemaKind::Map,
                Complex::Record => SchemaKind::Record,
            });
        }

        Primitive::from_name(type_str).map(SchemaKind::PrimitiveObject)
    }

    /// Check if this is one of the named variants (logical fixed included).
    pub fn is_named(&self) -> bool {
        match self {
            SchemaKind::Enum | SchemaKind::Fixed | SchemaKind::Record => true,
            SchemaKind::Logical(kind) => kind.is_fixed_based(),
            _ => false,
        }
    }
}

/// Get the `logicalType` of an object when it is one of the known names.
fn known_logical_type(obj: &Map<String, Value>) -> Option<LogicalTypeName> {
    obj.get(LOGICAL_TYPE_KEY)
        .and_then(Value::as_str)
        .and_then(LogicalTypeName::from_name)
}

/// The `type` tag of a schema object, if it has a string one.
pub fn type_of(value: &Value) -> Option<&str> {
    value.get(TYPE_KEY).and_then(Value::as_str)
}

// ============================================================================
// Predicates over schema values
// ============================================================================

/// Loose check: any object with a `type` key.
pub fn is_object(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| obj.contains_key(TYPE_KEY))
}

pub fn is_union(value: &Value) -> bool {
    value.is_array()
}

/// Loose check: an object whose `logicalType` is a known name, whatever its base.
pub fn is_logical(value: &Value) -> bool {
    is_object(value) && value.as_object().and_then(known_logical_type).is_some()
}

pub fn is_logical_decimal_bytes(value: &Value) -> bool {
    SchemaKind::classify(value) == Some(SchemaKind::Logical(LogicalKind::DecimalBytes))
}

pub fn is_logical_decimal_fixed(value: &Value) -> bool {
    SchemaKind::classify(value) == Some(SchemaKind::Logical(LogicalKind::DecimalFixed))
}

pub fn is_logical_duration(value: &Value) -> bool {
    SchemaKind::classify(value) == Some(SchemaKind::Logical(LogicalKind::Duration))
}

/// Primitive wrapped as an object and carrying no known logical annotation.
pub fn is_primitive_object(value: &Value) -> bool {
    type_of(value).is_some_and(is_type_primitive) && !is_logical(value)
}

pub fn is_array(value: &Value) -> bool {
    type_of(value) == Some(Complex::Array.name())
}

pub fn is_map(value: &Value) -> bool {
    type_of(value) == Some(Complex::Map.name())
}

pub fn is_enum(value: &Value) -> bool {
    type_of(value) == Some(Complex::Enum.name())
}

pub fn is_fixed(value: &Value) -> bool {
    type_of(value) == Some(Complex::Fixed.name())
}

pub fn is_record(value: &Value) -> bool {
    type_of(value) == Some(Complex::Record.name())
}

/// Loose check on the `type` tag only, so annotated fixed types count as named.
pub fn is_named(value: &Value) -> bool {
    type_of(value).is_some_and(is_type_named)
}

// ============================================================================
// Predicates over bare type names
// ============================================================================

pub fn is_type_complex(name: &str) -> bool {
    Complex::from_name(name).is_some()
}

pub fn is_type_named(name: &str) -> bool {
    Complex::from_name(name).is_some_and(|c| c.is_named())
}

pub fn is_type_primitive(name: &str) -> bool {
    Primitive::from_name(name).is_some()
}

/// Check a `logicalType` attribute value (not a display label).
pub fn is_type_logical(name: &str) -> bool {
    LogicalTypeName::from_name(name).is_some()
}

/// Check a logical display label such as `"decimal (bytes)"`.
pub fn is_type_name_logical(label: &str) -> bool {
    LogicalKind::from_label(label).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_order() {
        let labels: Vec<&str> = TypeName::catalog().map(|t| t.as_str()).collect();
        assert_eq!(labels.len(), 24);
        assert_eq!(&labels[..8], &["boolean", "bytes", "double", "float", "int", "long", "null", "string"]);
        assert_eq!(&labels[8..13], &["array", "enum", "fixed", "map", "record"]);
        assert_eq!(labels[13], "date");
        assert_eq!(labels[23], "uuid");
    }

    #[test]
    fn test_logical_before_complex() {
        let duration = json!({"type": "fixed", "logicalType": "duration", "name": "d", "size": 12});
        assert_eq!(
            SchemaKind::classify(&duration),
            Some(SchemaKind::Logical(LogicalKind::Duration))
        );
        assert!(is_fixed(&duration));
        assert!(is_named(&duration));
        assert!(is_logical_duration(&duration));
    }

    #[test]
    fn test_mismatched_logical_pair() {
        let value = json!({"type": "int", "logicalType": "uuid"});
        assert_eq!(SchemaKind::classify(&value), Some(SchemaKind::InvalidLogical));
        assert!(is_logical(&value));
        assert!(!is_primitive_object(&value));
    }

    #[test]
    fn test_unknown_logical_is_plain() {
        let value = json!({"type": "int", "logicalType": "made-up"});
        assert_eq!(
            SchemaKind::classify(&value),
            Some(SchemaKind::PrimitiveObject(Primitive::Int))
        );
    }

    #[test]
    fn test_classify_malformed() {
        assert_eq!(SchemaKind::classify(&json!({"name": "x"})), None);
        assert_eq!(SchemaKind::classify(&json!("integer")), None);
        assert_eq!(SchemaKind::classify(&json!(42)), None);
        assert_eq!(SchemaKind::classify(&Value::Null), None);
    }

    #[test]
    fn test_type_name_predicates() {
        assert!(is_type_primitive("null"));
        assert!(!is_type_primitive("array"));
        assert!(is_type_complex("map"));
        assert!(is_type_named("record"));
        assert!(!is_type_named("map"));
        assert!(is_type_logical("timestamp-micros"));
        assert!(!is_type_logical("timestamp μs"));
        assert!(is_type_name_logical("timestamp μs"));
    }
}
