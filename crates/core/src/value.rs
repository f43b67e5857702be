//! Converted values produced by the rules.

use std::collections::BTreeMap;

use crate::json::Json;

/// The result of a successful conversion.
///
/// The variant follows the descriptor that produced it rather than the JSON
/// shape: an array converted against a tuple descriptor becomes a `Tuple`,
/// the same array against a sequence descriptor becomes a `Sequence`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    String(String),
    /// Produced by the `any` descriptor; the JSON node untouched.
    Any(Json),
    Tuple(Vec<Value>),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
    Record(BTreeMap<String, Value>),
}

impl Value {
    /// Convert a scalar JSON node into the matching value variant.
    ///
    /// Returns `None` for arrays and objects.
    pub fn from_scalar(v: &Json) -> Option<Value> {
        match v {
            Json::Null => Some(Value::Null),
            Json::Bool(b) => Some(Value::Bool(*b)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Value::UInt(u))
                } else {
                    n.as_f64().map(Value::Float)
                }
            }
            Json::String(s) => Some(Value::String(s.clone())),
            Json::Array(_) | Json::Object(_) => None,
        }
    }

    /// Returns a human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Any(_) => "any",
            Value::Tuple(_) => "tuple",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Record(_) => "record",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of a tuple or sequence.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) | Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Entry of a mapping or field of a record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Mapping(entries) | Value::Record(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Project the value back to plain JSON.
    ///
    /// Tuples and sequences become arrays, mappings and records become
    /// objects. A float that JSON cannot represent (NaN, infinity) becomes
    /// `null`, as `serde_json` does.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::UInt(u) => Json::from(*u),
            Value::Float(f) => Json::from(*f),
            Value::String(s) => Json::String(s.clone()),
            Value::Any(v) => v.clone(),
            Value::Tuple(items) | Value::Sequence(items) => {
                Json::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Mapping(entries) | Value::Record(entries) => {
                let mut map = serde_json::Map::new();
                for (k, v) in entries {
                    map.insert(k.clone(), v.to_json());
                }
                Json::Object(map)
            }
        }
    }
}
