//! Conversion failures.
//!
//! A [`ConversionError`] names the JSON node that failed, the descriptor it
//! could not satisfy, why, and where in the document the node sits. Container
//! rules prepend their position as the error travels up; union failures keep
//! every alternative's error, each with a path relative to the union's node.

use std::fmt;

use crate::descriptor::TypeDescriptor;
use crate::json::{preview, Json, JsonKind};

// ──────────────────────────────────────────────
// Paths
// ──────────────────────────────────────────────

/// One step from a container to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

/// Location of a node inside a JSON document, rendered like `$.items[2].id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    pub fn root() -> JsonPath {
        JsonPath(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
                PathSegment::Key(k) if is_plain_key(k) => write!(f, ".{}", k)?,
                PathSegment::Key(k) => write!(f, "[{}]", Json::String(k.clone()))?,
            }
        }
        Ok(())
    }
}

fn is_plain_key(k: &str) -> bool {
    let mut chars = k.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

// ──────────────────────────────────────────────
// Error kinds
// ──────────────────────────────────────────────

/// One failed union alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct AlternativeFailure {
    pub alternative: TypeDescriptor,
    pub error: ConversionError,
}

/// Why a conversion failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    /// The JSON node's kind differs from the one the descriptor demands.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: JsonKind,
    },

    #[error("expected null, found {found}")]
    NotNull { found: JsonKind },

    #[error("value is not one of {}", join_json(.allowed))]
    NotInLiteralSet { allowed: Vec<Json> },

    /// Tuple length differs from the array length. `at_least` is set when the
    /// tuple has a variadic gap, which makes `expected` a lower bound.
    #[error("expected {} elements, found {found}", arity(.expected, .at_least))]
    ArityMismatch {
        expected: usize,
        found: usize,
        at_least: bool,
    },

    /// The descriptor is unusable; raised before the data is looked at.
    #[error("invalid descriptor: {message}")]
    InvalidDescriptor { message: String },

    #[error("missing required fields: {}", .missing.join(", "))]
    MissingRequiredFields { missing: Vec<String> },

    /// A strict record met a key it does not declare.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// Every union alternative failed; holds all of their errors in the order
    /// they were tried.
    #[error("no alternative matched ({} tried)", .failures.len())]
    NoAlternativeMatched { failures: Vec<AlternativeFailure> },

    #[error("no conversion rule accepts this descriptor")]
    UnsupportedType,

    #[error("nesting deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },
}

impl ErrorKind {
    /// Stable identifier for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch { .. } => "type_mismatch",
            ErrorKind::NotNull { .. } => "not_null",
            ErrorKind::NotInLiteralSet { .. } => "not_in_literal_set",
            ErrorKind::ArityMismatch { .. } => "arity_mismatch",
            ErrorKind::InvalidDescriptor { .. } => "invalid_descriptor",
            ErrorKind::MissingRequiredFields { .. } => "missing_required_fields",
            ErrorKind::UnknownField { .. } => "unknown_field",
            ErrorKind::NoAlternativeMatched { .. } => "no_alternative_matched",
            ErrorKind::UnsupportedType => "unsupported_type",
            ErrorKind::DepthLimitExceeded { .. } => "depth_limit_exceeded",
        }
    }
}

fn join_json(values: &[Json]) -> String {
    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

fn arity(expected: &usize, at_least: &bool) -> String {
    if *at_least {
        format!("at least {}", expected)
    } else {
        expected.to_string()
    }
}

// ──────────────────────────────────────────────
// Conversion error
// ──────────────────────────────────────────────

/// A failed conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{path}: cannot convert {} to {descriptor}: {kind}", preview(.json))]
pub struct ConversionError {
    /// Where the failing node sits, relative to the document passed to
    /// the converter (or to the union node, for alternative failures).
    pub path: JsonPath,
    /// The JSON node that could not be converted.
    pub json: Json,
    /// The descriptor the node could not satisfy.
    pub descriptor: TypeDescriptor,
    pub kind: ErrorKind,
}

impl ConversionError {
    pub fn new(kind: ErrorKind, json: &Json, descriptor: &TypeDescriptor) -> ConversionError {
        ConversionError {
            path: JsonPath::root(),
            json: json.clone(),
            descriptor: descriptor.clone(),
            kind,
        }
    }

    /// Record that this error happened inside the child `segment` of the
    /// node being converted one level up.
    pub fn at(mut self, segment: PathSegment) -> ConversionError {
        self.path.prepend(segment);
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    pub fn json(&self) -> &Json {
        &self.json
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// Failures of the individual alternatives, if this is a union failure.
    pub fn alternatives(&self) -> &[AlternativeFailure] {
        match &self.kind {
            ErrorKind::NoAlternativeMatched { failures } => failures,
            _ => &[],
        }
    }

    /// Multi-line report: the error itself followed by every union
    /// alternative's failure, indented under it.
    pub fn report(&self) -> String {
        let mut out = String::new();
        self.write_report(&mut out, 0);
        out
    }

    fn write_report(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.to_string());
        for failure in self.alternatives() {
            out.push('\n');
            out.push_str(&"  ".repeat(depth + 1));
            out.push_str(&format!("as {}:", failure.alternative));
            out.push('\n');
            failure.error.write_report(out, depth + 2);
        }
    }

    /// The whole failure tree as JSON.
    pub fn to_json(&self) -> Json {
        let mut obj = serde_json::json!({
            "error": self.kind.code(),
            "message": self.kind.to_string(),
            "path": self.path.to_string(),
            "descriptor": self.descriptor.to_string(),
            "json": self.json,
        });
        let alternatives = self.alternatives();
        if !alternatives.is_empty() {
            let nested: Vec<Json> = alternatives
                .iter()
                .map(|a| {
                    serde_json::json!({
                        "alternative": a.alternative.to_string(),
                        "failure": a.error.to_json(),
                    })
                })
                .collect();
            obj["alternatives"] = Json::Array(nested);
        }
        obj
    }
}
