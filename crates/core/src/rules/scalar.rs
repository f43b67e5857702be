//! Leaf rules: any, null, simple kinds and literal sets.

use super::{type_mismatch, unsupported, ConversionRule, Recurse};
use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, ErrorKind};
use crate::json::{Json, JsonKind};
use crate::value::Value;

/// Passes any JSON node through unchanged.
pub struct AnyRule;

impl ConversionRule for AnyRule {
    fn name(&self) -> &'static str {
        "any"
    }

    fn can_convert(&self, descriptor: &TypeDescriptor) -> bool {
        matches!(descriptor, TypeDescriptor::Any)
    }

    fn convert(
        &self,
        js: &Json,
        _descriptor: &TypeDescriptor,
        _recurse: Recurse<'_>,
    ) -> Result<Value, ConversionError> {
        Ok(Value::Any(js.clone()))
    }
}

/// Accepts exactly `null`.
pub struct NullRule;

impl ConversionRule for NullRule {
    fn name(&self) -> &'static str {
        "null"
    }

    fn can_convert(&self, descriptor: &TypeDescriptor) -> bool {
        matches!(descriptor, TypeDescriptor::Null)
    }

    fn convert(
        &self,
        js: &Json,
        descriptor: &TypeDescriptor,
        _recurse: Recurse<'_>,
    ) -> Result<Value, ConversionError> {
        if js.is_null() {
            return Ok(Value::Null);
        }
        Err(ConversionError::new(
            ErrorKind::NotNull {
                found: JsonKind::of(js),
            },
            js,
            descriptor,
        ))
    }
}

/// Accepts a scalar whose kind is exactly the demanded one.
pub struct SimpleRule;

impl ConversionRule for SimpleRule {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn can_convert(&self, descriptor: &TypeDescriptor) -> bool {
        matches!(descriptor, TypeDescriptor::Simple(_))
    }

    fn convert(
        &self,
        js: &Json,
        descriptor: &TypeDescriptor,
        _recurse: Recurse<'_>,
    ) -> Result<Value, ConversionError> {
        let TypeDescriptor::Simple(kind) = descriptor else {
            return Err(unsupported(js, descriptor));
        };
        if !kind.accepts(JsonKind::of(js)) {
            return Err(type_mismatch(kind.name(), js, descriptor));
        }
        Value::from_scalar(js).ok_or_else(|| type_mismatch(kind.name(), js, descriptor))
    }
}

/// Accepts a scalar equal to one of the allowed values.
///
/// Equality is JSON equality: `6` and `6.0` are different values.
pub struct LiteralRule;

impl ConversionRule for LiteralRule {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn can_convert(&self, descriptor: &TypeDescriptor) -> bool {
        match descriptor {
            TypeDescriptor::Literal(values) => {
                !values.is_empty() && values.iter().all(|v| JsonKind::of(v).is_scalar())
            }
            _ => false,
        }
    }

    fn convert(
        &self,
        js: &Json,
        descriptor: &TypeDescriptor,
        _recurse: Recurse<'_>,
    ) -> Result<Value, ConversionError> {
        let TypeDescriptor::Literal(allowed) = descriptor else {
            return Err(unsupported(js, descriptor));
        };
        let not_allowed = || {
            ConversionError::new(
                ErrorKind::NotInLiteralSet {
                    allowed: allowed.clone(),
                },
                js,
                descriptor,
            )
        };
        if !allowed.contains(js) {
            return Err(not_allowed());
        }
        Value::from_scalar(js).ok_or_else(not_allowed)
    }
}
