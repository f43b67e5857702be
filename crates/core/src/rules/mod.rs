//! Conversion rules, one per descriptor shape.
//!
//! A rule says which descriptors it handles (`can_convert`) and how to turn a
//! JSON node into a [`Value`] for them (`convert`). Container rules never call
//! other rules directly: they hand nested nodes back to the driver through the
//! `recurse` callback, which picks the rule for the nested descriptor.

mod collection;
mod record;
mod scalar;
mod tuple;
mod union;

pub use collection::{MappingRule, SequenceRule};
pub use record::RecordRule;
pub use scalar::{AnyRule, LiteralRule, NullRule, SimpleRule};
pub use tuple::TupleRule;
pub use union::UnionRule;

use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, ErrorKind};
use crate::json::{Json, JsonKind};
use crate::value::Value;

/// Callback into the driver for converting a nested node.
pub type Recurse<'a> = &'a dyn Fn(&Json, &TypeDescriptor) -> Result<Value, ConversionError>;

/// A matching predicate plus the conversion it guards.
///
/// Rules hold no per-call state, so one instance serves any number of
/// concurrent conversions.
pub trait ConversionRule: Send + Sync {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this rule handles `descriptor`.
    fn can_convert(&self, descriptor: &TypeDescriptor) -> bool;

    /// Convert `js` against `descriptor`. Only called when
    /// [`can_convert`](ConversionRule::can_convert) returned true.
    fn convert(
        &self,
        js: &Json,
        descriptor: &TypeDescriptor,
        recurse: Recurse<'_>,
    ) -> Result<Value, ConversionError>;
}

/// The rule set in its default order.
pub fn standard_rules(strict_records: bool) -> Vec<Box<dyn ConversionRule>> {
    vec![
        Box::new(AnyRule),
        Box::new(UnionRule),
        Box::new(LiteralRule),
        Box::new(NullRule),
        Box::new(SimpleRule),
        Box::new(TupleRule),
        Box::new(SequenceRule),
        Box::new(MappingRule),
        Box::new(RecordRule::new(strict_records)),
    ]
}

// ──────────────────────────────────────────────
// Shared error constructors
// ──────────────────────────────────────────────

/// A rule was handed a descriptor it does not match.
pub(crate) fn unsupported(js: &Json, descriptor: &TypeDescriptor) -> ConversionError {
    ConversionError::new(ErrorKind::UnsupportedType, js, descriptor)
}

pub(crate) fn type_mismatch(
    expected: &'static str,
    js: &Json,
    descriptor: &TypeDescriptor,
) -> ConversionError {
    ConversionError::new(
        ErrorKind::TypeMismatch {
            expected,
            found: JsonKind::of(js),
        },
        js,
        descriptor,
    )
}

#[cfg(test)]
pub(crate) fn apply(
    rule: &dyn ConversionRule,
    js: Json,
    descriptor: TypeDescriptor,
) -> Result<Value, ConversionError> {
    let registry = crate::Registry::default();
    assert!(
        rule.can_convert(&descriptor),
        "{} does not accept {}",
        rule.name(),
        descriptor
    );
    rule.convert(&js, &descriptor, &|j, d| registry.convert(j, d))
}
