//! Fixed-arity tuples with an optional variadic gap.

use super::{type_mismatch, unsupported, ConversionRule, Recurse};
use crate::descriptor::{gap_count, TupleElement, TypeDescriptor};
use crate::error::{ConversionError, ErrorKind, PathSegment};
use crate::json::Json;
use crate::value::Value;

static ANY: TypeDescriptor = TypeDescriptor::Any;

/// Converts an array position by position.
///
/// A gap stands for as many `any` elements as it takes to make the element
/// count equal the array length, so `tuple[int, ..., int]` accepts any array
/// of two or more elements that starts and ends with an integer.
pub struct TupleRule;

impl ConversionRule for TupleRule {
    fn name(&self) -> &'static str {
        "tuple"
    }

    fn can_convert(&self, descriptor: &TypeDescriptor) -> bool {
        matches!(descriptor, TypeDescriptor::Tuple(_))
    }

    fn convert(
        &self,
        js: &Json,
        descriptor: &TypeDescriptor,
        recurse: Recurse<'_>,
    ) -> Result<Value, ConversionError> {
        let TypeDescriptor::Tuple(elements) = descriptor else {
            return Err(unsupported(js, descriptor));
        };

        // Checked before the data: this is a descriptor defect.
        let gaps = gap_count(elements);
        if gaps > 1 {
            return Err(ConversionError::new(
                ErrorKind::InvalidDescriptor {
                    message: format!("tuple has {} variadic gaps, at most one is allowed", gaps),
                },
                js,
                descriptor,
            ));
        }

        let items = js
            .as_array()
            .ok_or_else(|| type_mismatch("array", js, descriptor))?;

        let expanded = expand_gap(elements, items.len());
        if expanded.len() != items.len() {
            return Err(ConversionError::new(
                ErrorKind::ArityMismatch {
                    expected: elements.len() - gaps,
                    found: items.len(),
                    at_least: gaps == 1,
                },
                js,
                descriptor,
            ));
        }

        let converted = items
            .iter()
            .zip(expanded)
            .enumerate()
            .map(|(i, (item, element))| {
                recurse(item, element).map_err(|e| e.at(PathSegment::Index(i)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Tuple(converted))
    }
}

/// Replace the gap (if any) with enough `any` descriptors to reach `len`
/// elements. When the array is too short for the fixed elements the gap
/// expands to nothing and the length check reports the mismatch.
fn expand_gap(elements: &[TupleElement], len: usize) -> Vec<&TypeDescriptor> {
    let fixed = elements.len() - gap_count(elements);
    let fill = len.saturating_sub(fixed);
    let mut out = Vec::with_capacity(elements.len().max(len));
    for element in elements {
        match element {
            TupleElement::Element(d) => out.push(d),
            TupleElement::Gap => out.extend(std::iter::repeat(&ANY).take(fill)),
        }
    }
    out
}
