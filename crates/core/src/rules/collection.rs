//! Homogeneous sequences and string-keyed mappings.

use std::collections::BTreeMap;

use super::{type_mismatch, unsupported, ConversionRule, Recurse};
use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, PathSegment};
use crate::json::Json;
use crate::value::Value;

/// Converts every element of an array against one descriptor.
pub struct SequenceRule;

impl ConversionRule for SequenceRule {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn can_convert(&self, descriptor: &TypeDescriptor) -> bool {
        matches!(descriptor, TypeDescriptor::Sequence(_))
    }

    fn convert(
        &self,
        js: &Json,
        descriptor: &TypeDescriptor,
        recurse: Recurse<'_>,
    ) -> Result<Value, ConversionError> {
        let TypeDescriptor::Sequence(element) = descriptor else {
            return Err(unsupported(js, descriptor));
        };
        let items = js
            .as_array()
            .ok_or_else(|| type_mismatch("array", js, descriptor))?;

        let mut converted = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let v = recurse(item, element.as_ref()).map_err(|e| e.at(PathSegment::Index(i)))?;
            converted.push(v);
        }
        Ok(Value::Sequence(converted))
    }
}

/// Converts every value of an object against one descriptor, keeping keys.
pub struct MappingRule;

impl ConversionRule for MappingRule {
    fn name(&self) -> &'static str {
        "mapping"
    }

    fn can_convert(&self, descriptor: &TypeDescriptor) -> bool {
        matches!(descriptor, TypeDescriptor::Mapping(_))
    }

    fn convert(
        &self,
        js: &Json,
        descriptor: &TypeDescriptor,
        recurse: Recurse<'_>,
    ) -> Result<Value, ConversionError> {
        let TypeDescriptor::Mapping(value) = descriptor else {
            return Err(unsupported(js, descriptor));
        };
        let entries = js
            .as_object()
            .ok_or_else(|| type_mismatch("object", js, descriptor))?;

        let mut converted = BTreeMap::new();
        for (key, entry) in entries {
            let v = recurse(entry, value.as_ref())
                .map_err(|e| e.at(PathSegment::Key(key.clone())))?;
            converted.insert(key.clone(), v);
        }
        Ok(Value::Mapping(converted))
    }
}
