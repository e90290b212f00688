//! Editable inputs offered per type.

use crate::schema::{Complex, LogicalKind, TypeName};

/// An input of the editing surface, bound to the attribute `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub disabled: bool,
}

impl InputDescriptor {
    const fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            disabled: false,
        }
    }

    const fn disabled(self) -> Self {
        Self {
            disabled: true,
            ..self
        }
    }
}

const NAME: InputDescriptor = InputDescriptor::new("name", "Name*");
const DOC: InputDescriptor = InputDescriptor::new("doc", "Doc");
const DOC_REQUIRED: InputDescriptor = InputDescriptor::new("doc", "Doc*");
const ALIASES: InputDescriptor = InputDescriptor::new("aliases", "Aliases");
const NAMESPACE: InputDescriptor = InputDescriptor::new("namespace", "Namespace");
const SIZE: InputDescriptor = InputDescriptor::new("size", "Size*");

/// Sort order of a record field, as offered by the order selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldOrder {
    /// No order attribute
    #[default]
    Unset,
    Ascending,
    Descending,
    Ignore,
}

impl FieldOrder {
    pub const ALL: [FieldOrder; 4] = [
        FieldOrder::Unset,
        FieldOrder::Ascending,
        FieldOrder::Descending,
        FieldOrder::Ignore,
    ];

    /// The attribute value; empty for [`FieldOrder::Unset`], which cleaning drops.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldOrder::Unset => "",
            FieldOrder::Ascending => "ascending",
            FieldOrder::Descending => "descending",
            FieldOrder::Ignore => "ignore",
        }
    }
}

/// Get the inputs of a type, in display order.
///
/// Primitives and logical types without parameters have none.
pub fn input_list(type_name: TypeName, doc_required: bool) -> Option<Vec<InputDescriptor>> {
    let doc = if doc_required { DOC_REQUIRED } else { DOC };
    let fixed = [NAME, doc, SIZE, ALIASES, NAMESPACE];
    let decimal = [
        InputDescriptor::new("precision", "Precision*"),
        InputDescriptor::new("scale", "Scale"),
    ];

    let list = match type_name {
        TypeName::Primitive(_) => return None,
        TypeName::Complex(Complex::Array) => vec![InputDescriptor::new("items", "Items*")],
        TypeName::Complex(Complex::Map) => vec![InputDescriptor::new("values", "Values*")],
        TypeName::Complex(Complex::Enum) => vec![
            NAME,
            doc,
            ALIASES,
            NAMESPACE,
            InputDescriptor::new("symbols", "Symbols*"),
            InputDescriptor::new("default", "Default"),
        ],
        TypeName::Complex(Complex::Fixed) => fixed.to_vec(),
        TypeName::Complex(Complex::Record) => vec![NAME, ALIASES, NAMESPACE, doc],
        TypeName::Logical(LogicalKind::DecimalBytes) => decimal.to_vec(),
        TypeName::Logical(LogicalKind::DecimalFixed) => fixed.into_iter().chain(decimal).collect(),
        TypeName::Logical(LogicalKind::Duration) => vec![NAME, doc, SIZE.disabled(), ALIASES, NAMESPACE],
        TypeName::Logical(_) => return None,
    };
    Some(list)
}

/// Get the inputs of a record field, besides its type selector.
pub fn record_field_input_list(doc_required: bool) -> Vec<InputDescriptor> {
    vec![
        NAME,
        InputDescriptor::new("default", "Default"),
        if doc_required { DOC_REQUIRED } else { DOC },
    ]
}
