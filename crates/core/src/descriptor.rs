//! Type descriptors: what a JSON value should become.
//!
//! A [`TypeDescriptor`] is built once by the caller, either by hand with the
//! constructor helpers or from a descriptor document via
//! [`TypeDescriptor::from_json`], and is then only read by the converter.
//!
//! Descriptor document format:
//!
//! ```json
//! {
//!   "kind": "record",
//!   "strict": false,
//!   "fields": [
//!     { "name": "id", "type": "int" },
//!     { "name": "tags", "type": { "kind": "sequence", "element": "string" } },
//!     { "name": "note", "type": { "kind": "union", "alternatives": ["string", "null"] }, "required": false }
//!   ]
//! }
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::json::{Json, JsonKind};

/// The string that marks the variadic gap inside a tuple's element list.
pub const GAP_MARKER: &str = "...";

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Problems with a descriptor itself, as opposed to the data being converted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// The document is not shaped like a descriptor at all.
    #[error("malformed type descriptor: {message}")]
    Malformed { message: String },

    /// The `kind` tag (or bare name) is not one of the known shapes.
    #[error("unknown descriptor kind '{kind}'")]
    UnknownKind { kind: String },

    /// A descriptor object lacks a field its kind needs.
    #[error("'{kind}' descriptor missing '{field}' field")]
    MissingField { kind: String, field: String },

    /// Mapping keys can only be strings.
    #[error("mapping key type must be 'string', got '{key}'")]
    UnsupportedKey { key: String },

    /// The descriptor parsed but breaks a structural invariant.
    #[error("invalid type descriptor: {message}")]
    Invalid { message: String },
}

// ──────────────────────────────────────────────
// Descriptor model
// ──────────────────────────────────────────────

/// Primitive scalar kinds a `Simple` descriptor can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleKind {
    Bool,
    Int,
    Float,
    String,
}

impl SimpleKind {
    pub fn name(self) -> &'static str {
        match self {
            SimpleKind::Bool => "bool",
            SimpleKind::Int => "int",
            SimpleKind::Float => "float",
            SimpleKind::String => "string",
        }
    }

    pub fn from_name(name: &str) -> Option<SimpleKind> {
        match name {
            "bool" => Some(SimpleKind::Bool),
            "int" => Some(SimpleKind::Int),
            "float" => Some(SimpleKind::Float),
            "string" => Some(SimpleKind::String),
            _ => None,
        }
    }

    /// Exact kind match, no widening: an int is not a float and a bool is
    /// not an int.
    pub fn accepts(self, kind: JsonKind) -> bool {
        matches!(
            (self, kind),
            (SimpleKind::Bool, JsonKind::Bool)
                | (SimpleKind::Int, JsonKind::Int)
                | (SimpleKind::Float, JsonKind::Float)
                | (SimpleKind::String, JsonKind::String)
        )
    }
}

/// One slot of a tuple descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum TupleElement {
    /// A positional element converted against its descriptor.
    Element(TypeDescriptor),
    /// Stands for as many `Any` elements as needed to match the array length.
    Gap,
}

impl TupleElement {
    pub fn of(descriptor: TypeDescriptor) -> TupleElement {
        TupleElement::Element(descriptor)
    }
}

/// A named record field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub descriptor: TypeDescriptor,
    pub required: bool,
}

impl Field {
    pub fn required(name: impl Into<String>, descriptor: TypeDescriptor) -> Field {
        Field {
            name: name.into(),
            descriptor,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, descriptor: TypeDescriptor) -> Field {
        Field {
            name: name.into(),
            descriptor,
            required: false,
        }
    }
}

/// Declared fields of a record plus its unknown-key policy.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDescriptor {
    pub fields: Vec<Field>,
    /// Reject keys that match no declared field instead of dropping them.
    pub strict: bool,
}

impl RecordDescriptor {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of required fields, in declaration order.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }

    pub fn has_unique_names(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.fields.iter().all(|f| seen.insert(f.name.as_str()))
    }
}

/// Describes the target shape of a conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// Anything; the JSON value is passed through unchanged.
    Any,
    /// Exactly `null`.
    Null,
    Simple(SimpleKind),
    /// One of a fixed set of scalar JSON values.
    Literal(Vec<Json>),
    /// Ordered alternatives; the first that converts wins.
    Union(Vec<TypeDescriptor>),
    Tuple(Vec<TupleElement>),
    Sequence(Box<TypeDescriptor>),
    /// String-keyed map; only the value type is described.
    Mapping(Box<TypeDescriptor>),
    Record(RecordDescriptor),
}

impl TypeDescriptor {
    pub fn simple(kind: SimpleKind) -> TypeDescriptor {
        TypeDescriptor::Simple(kind)
    }

    pub fn literal(values: impl IntoIterator<Item = Json>) -> TypeDescriptor {
        TypeDescriptor::Literal(values.into_iter().collect())
    }

    pub fn union(alternatives: impl IntoIterator<Item = TypeDescriptor>) -> TypeDescriptor {
        TypeDescriptor::Union(alternatives.into_iter().collect())
    }

    pub fn tuple(elements: impl IntoIterator<Item = TupleElement>) -> TypeDescriptor {
        TypeDescriptor::Tuple(elements.into_iter().collect())
    }

    pub fn sequence(element: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::Sequence(Box::new(element))
    }

    pub fn mapping(value: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::Mapping(Box::new(value))
    }

    /// A lenient record: unknown keys are dropped.
    pub fn record(fields: impl IntoIterator<Item = Field>) -> TypeDescriptor {
        TypeDescriptor::Record(RecordDescriptor {
            fields: fields.into_iter().collect(),
            strict: false,
        })
    }

    /// A record that fails on keys it does not declare.
    pub fn strict_record(fields: impl IntoIterator<Item = Field>) -> TypeDescriptor {
        TypeDescriptor::Record(RecordDescriptor {
            fields: fields.into_iter().collect(),
            strict: true,
        })
    }

    /// Short name of the descriptor's shape.
    pub fn shape_name(&self) -> &'static str {
        match self {
            TypeDescriptor::Any => "any",
            TypeDescriptor::Null => "null",
            TypeDescriptor::Simple(kind) => kind.name(),
            TypeDescriptor::Literal(_) => "literal",
            TypeDescriptor::Union(_) => "union",
            TypeDescriptor::Tuple(_) => "tuple",
            TypeDescriptor::Sequence(_) => "sequence",
            TypeDescriptor::Mapping(_) => "mapping",
            TypeDescriptor::Record(_) => "record",
        }
    }

    /// Check the structural invariants of this descriptor and everything
    /// nested in it. Returns the first violation found.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        match self {
            TypeDescriptor::Any | TypeDescriptor::Null | TypeDescriptor::Simple(_) => Ok(()),
            TypeDescriptor::Literal(values) => {
                if values.is_empty() {
                    return Err(invalid("literal must allow at least one value"));
                }
                if let Some(v) = values.iter().find(|v| !JsonKind::of(v).is_scalar()) {
                    return Err(invalid(format!(
                        "literal values must be scalars, got {}",
                        JsonKind::of(v)
                    )));
                }
                Ok(())
            }
            TypeDescriptor::Union(alternatives) => {
                if alternatives.is_empty() {
                    return Err(invalid("union must have at least one alternative"));
                }
                alternatives.iter().try_for_each(TypeDescriptor::validate)
            }
            TypeDescriptor::Tuple(elements) => {
                let gaps = gap_count(elements);
                if gaps > 1 {
                    return Err(invalid(format!(
                        "tuple has {} variadic gaps, at most one is allowed",
                        gaps
                    )));
                }
                elements.iter().try_for_each(|e| match e {
                    TupleElement::Element(d) => d.validate(),
                    TupleElement::Gap => Ok(()),
                })
            }
            TypeDescriptor::Sequence(element) => element.validate(),
            TypeDescriptor::Mapping(value) => value.validate(),
            TypeDescriptor::Record(record) => {
                if !record.has_unique_names() {
                    return Err(invalid("record field names must be unique"));
                }
                record
                    .fields
                    .iter()
                    .try_for_each(|f| f.descriptor.validate())
            }
        }
    }

    // ──────────────────────────────────────────────
    // Descriptor documents
    // ──────────────────────────────────────────────

    /// Parse and validate a descriptor document.
    pub fn from_json(v: &Json) -> Result<TypeDescriptor, DescriptorError> {
        let descriptor = parse_descriptor(v)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Render this descriptor in the document format accepted by
    /// [`TypeDescriptor::from_json`].
    pub fn to_json(&self) -> Json {
        match self {
            TypeDescriptor::Any => Json::from("any"),
            TypeDescriptor::Null => Json::from("null"),
            TypeDescriptor::Simple(kind) => Json::from(kind.name()),
            TypeDescriptor::Literal(values) => serde_json::json!({
                "kind": "literal",
                "values": values,
            }),
            TypeDescriptor::Union(alternatives) => {
                let alternatives: Vec<Json> =
                    alternatives.iter().map(TypeDescriptor::to_json).collect();
                serde_json::json!({ "kind": "union", "alternatives": alternatives })
            }
            TypeDescriptor::Tuple(elements) => {
                let elements: Vec<Json> = elements
                    .iter()
                    .map(|e| match e {
                        TupleElement::Element(d) => d.to_json(),
                        TupleElement::Gap => Json::from(GAP_MARKER),
                    })
                    .collect();
                serde_json::json!({ "kind": "tuple", "elements": elements })
            }
            TypeDescriptor::Sequence(element) => serde_json::json!({
                "kind": "sequence",
                "element": element.to_json(),
            }),
            TypeDescriptor::Mapping(value) => serde_json::json!({
                "kind": "mapping",
                "key": "string",
                "value": value.to_json(),
            }),
            TypeDescriptor::Record(record) => {
                let fields: Vec<Json> = record
                    .fields
                    .iter()
                    .map(|f| {
                        serde_json::json!({
                            "name": f.name,
                            "type": f.descriptor.to_json(),
                            "required": f.required,
                        })
                    })
                    .collect();
                serde_json::json!({
                    "kind": "record",
                    "strict": record.strict,
                    "fields": fields,
                })
            }
        }
    }
}

pub(crate) fn gap_count(elements: &[TupleElement]) -> usize {
    elements
        .iter()
        .filter(|e| matches!(e, TupleElement::Gap))
        .count()
}

fn invalid(message: impl Into<String>) -> DescriptorError {
    DescriptorError::Invalid {
        message: message.into(),
    }
}

// ──────────────────────────────────────────────
// Display
// ──────────────────────────────────────────────

impl fmt::Display for SimpleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Any | TypeDescriptor::Null | TypeDescriptor::Simple(_) => {
                f.write_str(self.shape_name())
            }
            TypeDescriptor::Literal(values) => {
                f.write_str("literal[")?;
                write_joined(f, values.iter(), ", ")?;
                f.write_str("]")
            }
            TypeDescriptor::Union(alternatives) => {
                f.write_str("union[")?;
                write_joined(f, alternatives.iter(), " | ")?;
                f.write_str("]")
            }
            TypeDescriptor::Tuple(elements) => {
                f.write_str("tuple[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match element {
                        TupleElement::Element(d) => write!(f, "{}", d)?,
                        TupleElement::Gap => f.write_str(GAP_MARKER)?,
                    }
                }
                f.write_str("]")
            }
            TypeDescriptor::Sequence(element) => write!(f, "sequence[{}]", element),
            TypeDescriptor::Mapping(value) => write!(f, "mapping[string, {}]", value),
            TypeDescriptor::Record(record) => {
                f.write_str(if record.strict { "record!{" } else { "record{" })?;
                for (i, field) in record.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    let marker = if field.required { "" } else { "?" };
                    write!(f, "{}{}: {}", field.name, marker, field.descriptor)?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

// ──────────────────────────────────────────────
// Document parsing helpers
// ──────────────────────────────────────────────

fn parse_descriptor(v: &Json) -> Result<TypeDescriptor, DescriptorError> {
    match v {
        Json::String(name) => parse_named(name),
        Json::Object(obj) => {
            let kind = obj.get("kind").and_then(|k| k.as_str()).ok_or_else(|| {
                DescriptorError::MissingField {
                    kind: "descriptor".to_string(),
                    field: "kind".to_string(),
                }
            })?;
            match kind {
                "literal" => {
                    let values = required_array(obj, kind, "values")?;
                    Ok(TypeDescriptor::Literal(values.clone()))
                }
                "union" => {
                    let alternatives = required_array(obj, kind, "alternatives")?
                        .iter()
                        .map(parse_descriptor)
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(TypeDescriptor::Union(alternatives))
                }
                "tuple" => {
                    let elements = required_array(obj, kind, "elements")?
                        .iter()
                        .map(|e| match e.as_str() {
                            Some(GAP_MARKER) => Ok(TupleElement::Gap),
                            _ => parse_descriptor(e).map(TupleElement::Element),
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(TypeDescriptor::Tuple(elements))
                }
                "sequence" => {
                    let element = optional_descriptor(obj, "element")?;
                    Ok(TypeDescriptor::Sequence(Box::new(element)))
                }
                "mapping" => {
                    if let Some(key) = obj.get("key") {
                        match key.as_str() {
                            Some("string") => {}
                            Some(other) => {
                                return Err(DescriptorError::UnsupportedKey {
                                    key: other.to_string(),
                                })
                            }
                            None => {
                                return Err(DescriptorError::UnsupportedKey {
                                    key: key.to_string(),
                                })
                            }
                        }
                    }
                    let value = optional_descriptor(obj, "value")?;
                    Ok(TypeDescriptor::Mapping(Box::new(value)))
                }
                "record" => parse_record(obj),
                other => parse_named(other),
            }
        }
        other => Err(DescriptorError::Malformed {
            message: format!("expected a type name or object, got {}", JsonKind::of(other)),
        }),
    }
}

/// Bare type names. `sequence` and `mapping` without parameters hold `any`.
fn parse_named(name: &str) -> Result<TypeDescriptor, DescriptorError> {
    if let Some(kind) = SimpleKind::from_name(name) {
        return Ok(TypeDescriptor::Simple(kind));
    }
    match name {
        "any" => Ok(TypeDescriptor::Any),
        "null" => Ok(TypeDescriptor::Null),
        "sequence" => Ok(TypeDescriptor::sequence(TypeDescriptor::Any)),
        "mapping" => Ok(TypeDescriptor::mapping(TypeDescriptor::Any)),
        other => Err(DescriptorError::UnknownKind {
            kind: other.to_string(),
        }),
    }
}

fn parse_record(obj: &serde_json::Map<String, Json>) -> Result<TypeDescriptor, DescriptorError> {
    let strict = match obj.get("strict") {
        None => false,
        Some(s) => s.as_bool().ok_or_else(|| DescriptorError::Malformed {
            message: "record 'strict' must be a boolean".to_string(),
        })?,
    };

    let mut fields = Vec::new();
    for field in required_array(obj, "record", "fields")? {
        let name = field
            .get("name")
            .and_then(|n| n.as_str())
            .ok_or_else(|| DescriptorError::MissingField {
                kind: "record field".to_string(),
                field: "name".to_string(),
            })?
            .to_string();
        let type_val = field.get("type").ok_or_else(|| DescriptorError::MissingField {
            kind: format!("record field '{}'", name),
            field: "type".to_string(),
        })?;
        let descriptor = parse_descriptor(type_val)?;
        let required = match field.get("required") {
            None => true,
            Some(r) => r.as_bool().ok_or_else(|| DescriptorError::Malformed {
                message: format!("field '{}': 'required' must be a boolean", name),
            })?,
        };
        fields.push(Field {
            name,
            descriptor,
            required,
        });
    }

    Ok(TypeDescriptor::Record(RecordDescriptor { fields, strict }))
}

fn required_array<'a>(
    obj: &'a serde_json::Map<String, Json>,
    kind: &str,
    field: &str,
) -> Result<&'a Vec<Json>, DescriptorError> {
    obj.get(field)
        .and_then(|v| v.as_array())
        .ok_or_else(|| DescriptorError::MissingField {
            kind: kind.to_string(),
            field: field.to_string(),
        })
}

fn optional_descriptor(
    obj: &serde_json::Map<String, Json>,
    field: &str,
) -> Result<TypeDescriptor, DescriptorError> {
    match obj.get(field) {
        Some(v) => parse_descriptor(v),
        None => Ok(TypeDescriptor::Any),
    }
}
