#![allow(clippy::result_large_err)]
//! jsont-core: convert generic JSON values into statically described types.
//!
//! A caller hands over an already parsed JSON document and a
//! [`TypeDescriptor`] saying what the document should become. The converter
//! checks the document against the descriptor and returns a typed [`Value`],
//! or a [`ConversionError`] naming the node, the descriptor and the reason.
//!
//! # Public API
//!
//! - [`convert()`] -- convert with the default registry
//! - [`Registry`] -- ordered conversion rules plus the dispatch driver
//! - [`TypeDescriptor`] -- target type model, buildable by hand or from a
//!   descriptor document with [`TypeDescriptor::from_json`]
//! - [`ConversionRule`] -- the rule trait and the nine standard rules
//! - [`ConvertOptions`] -- strict records and the nesting bound
//!
//! ```
//! use jsont_core::{convert, Field, SimpleKind, TypeDescriptor};
//! use serde_json::json;
//!
//! let descriptor = TypeDescriptor::record([
//!     Field::required("k1", TypeDescriptor::Simple(SimpleKind::Float)),
//!     Field::required("k2", TypeDescriptor::Simple(SimpleKind::Int)),
//! ]);
//! let value = convert(&json!({"k1": 1.0, "k2": 2, "un": "known"}), &descriptor).unwrap();
//! assert_eq!(value.to_json(), json!({"k1": 1.0, "k2": 2}));
//! ```

pub mod aggregate;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod json;
pub mod registry;
pub mod rules;
pub mod value;

use std::sync::OnceLock;

// ── Convenience re-exports ───────────────────────────────────────────

pub use aggregate::try_in_order;
pub use config::{ConvertOptions, DEFAULT_MAX_DEPTH};
pub use descriptor::{
    DescriptorError, Field, RecordDescriptor, SimpleKind, TupleElement, TypeDescriptor,
};
pub use error::{AlternativeFailure, ConversionError, ErrorKind, JsonPath, PathSegment};
pub use json::{Json, JsonKind};
pub use registry::Registry;
pub use rules::{ConversionRule, Recurse};
pub use value::Value;

/// Convert `js` against `descriptor` using a process-wide registry built
/// with [`ConvertOptions::default`].
pub fn convert(js: &Json, descriptor: &TypeDescriptor) -> Result<Value, ConversionError> {
    static DEFAULT: OnceLock<Registry> = OnceLock::new();
    DEFAULT.get_or_init(Registry::default).convert(js, descriptor)
}
