//! The JSON value model consumed by the converter.
//!
//! Documents arrive already parsed as `serde_json::Value`. The converter only
//! reads them; this module adds the kind classification the rules match on.

use std::fmt;

/// A parsed JSON document node.
pub type Json = serde_json::Value;

/// Runtime kind of a JSON node.
///
/// Numbers are split into `Int` and `Float` the same way `serde_json` stores
/// them: `1` is an integer, `1.0` is a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Classify a JSON node.
    pub fn of(v: &Json) -> JsonKind {
        match v {
            Json::Null => JsonKind::Null,
            Json::Bool(_) => JsonKind::Bool,
            Json::Number(n) if n.is_f64() => JsonKind::Float,
            Json::Number(_) => JsonKind::Int,
            Json::String(_) => JsonKind::String,
            Json::Array(_) => JsonKind::Array,
            Json::Object(_) => JsonKind::Object,
        }
    }

    /// Name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "bool",
            JsonKind::Int => "int",
            JsonKind::Float => "float",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }

    /// True for null, booleans, numbers and strings.
    pub fn is_scalar(self) -> bool {
        !matches!(self, JsonKind::Array | JsonKind::Object)
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Longest rendering of a JSON node embedded in an error message.
const PREVIEW_LIMIT: usize = 60;

/// Compact single-line rendering of a JSON node, cut at a char boundary
/// once it grows past [`PREVIEW_LIMIT`].
pub fn preview(v: &Json) -> String {
    let rendered = v.to_string();
    if rendered.chars().count() <= PREVIEW_LIMIT {
        return rendered;
    }
    let mut cut: String = rendered.chars().take(PREVIEW_LIMIT).collect();
    cut.push_str("...");
    cut
}
