//! Union resolution.

use tracing::debug;

use super::{unsupported, ConversionRule, Recurse};
use crate::aggregate::try_in_order;
use crate::descriptor::{SimpleKind, TypeDescriptor};
use crate::error::{AlternativeFailure, ConversionError, ErrorKind};
use crate::json::Json;
use crate::value::Value;

/// Tries each alternative in turn and keeps the first that converts.
///
/// `string` alternatives are tried before all others so that a string never
/// lands in a sequence-shaped alternative meant for arrays. Everything else
/// keeps its declared order.
pub struct UnionRule;

impl ConversionRule for UnionRule {
    fn name(&self) -> &'static str {
        "union"
    }

    fn can_convert(&self, descriptor: &TypeDescriptor) -> bool {
        matches!(descriptor, TypeDescriptor::Union(alternatives) if !alternatives.is_empty())
    }

    fn convert(
        &self,
        js: &Json,
        descriptor: &TypeDescriptor,
        recurse: Recurse<'_>,
    ) -> Result<Value, ConversionError> {
        let TypeDescriptor::Union(alternatives) = descriptor else {
            return Err(unsupported(js, descriptor));
        };

        try_in_order(strings_first(alternatives), |alt| recurse(js, *alt)).map_err(|failures| {
            debug!(
                descriptor = %descriptor,
                tried = failures.len(),
                "no union alternative matched"
            );
            let failures = failures
                .into_iter()
                .map(|(alternative, error)| AlternativeFailure {
                    alternative: alternative.clone(),
                    error,
                })
                .collect();
            ConversionError::new(ErrorKind::NoAlternativeMatched { failures }, js, descriptor)
        })
    }
}

fn strings_first(alternatives: &[TypeDescriptor]) -> Vec<&TypeDescriptor> {
    let (strings, rest): (Vec<&TypeDescriptor>, Vec<&TypeDescriptor>) = alternatives
        .iter()
        .partition(|alt| matches!(alt, TypeDescriptor::Simple(SimpleKind::String)));
    strings.into_iter().chain(rest).collect()
}
