//! The rule registry and the dispatch driver.

use std::fmt;

use tracing::trace;

use crate::config::ConvertOptions;
use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, ErrorKind};
use crate::json::Json;
use crate::rules::{standard_rules, ConversionRule};
use crate::value::Value;

/// An ordered list of conversion rules plus the driver that dispatches to
/// them.
///
/// The first rule whose predicate accepts a descriptor converts against it.
/// A registry is immutable once built and can be shared between threads.
pub struct Registry {
    rules: Vec<Box<dyn ConversionRule>>,
    options: ConvertOptions,
}

impl Registry {
    /// The standard rule set configured by `options`.
    pub fn new(options: ConvertOptions) -> Registry {
        Registry {
            rules: standard_rules(options.strict_records),
            options,
        }
    }

    /// A registry over an explicit rule list, tried in the given order.
    pub fn with_rules(rules: Vec<Box<dyn ConversionRule>>, options: ConvertOptions) -> Registry {
        Registry { rules, options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Rule names in dispatch order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Convert `js` into a value shaped by `descriptor`.
    pub fn convert(&self, js: &Json, descriptor: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.dispatch(js, descriptor, 0)
    }

    fn dispatch(
        &self,
        js: &Json,
        descriptor: &TypeDescriptor,
        depth: usize,
    ) -> Result<Value, ConversionError> {
        if let Some(limit) = self.options.max_depth {
            if depth > limit {
                return Err(ConversionError::new(
                    ErrorKind::DepthLimitExceeded { limit },
                    js,
                    descriptor,
                ));
            }
        }

        let rule = self
            .rules
            .iter()
            .find(|r| r.can_convert(descriptor))
            .ok_or_else(|| ConversionError::new(ErrorKind::UnsupportedType, js, descriptor))?;
        trace!(rule = rule.name(), depth, "dispatch");

        // Depth counts JSON nesting: a rule re-dispatching the node it was
        // given (a union trying an alternative) stays at the same level.
        let recurse = |inner: &Json, inner_descriptor: &TypeDescriptor| {
            let next = if std::ptr::eq(inner, js) { depth } else { depth + 1 };
            self.dispatch(inner, inner_descriptor, next)
        };
        rule.convert(js, descriptor, &recurse)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new(ConvertOptions::default())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.rule_names())
            .field("options", &self.options)
            .finish()
    }
}
