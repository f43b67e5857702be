//! Records: objects with declared, named fields.

use std::collections::BTreeMap;

use tracing::debug;

use super::{type_mismatch, unsupported, ConversionRule, Recurse};
use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, ErrorKind, PathSegment};
use crate::json::Json;
use crate::value::Value;

/// Converts an object field by field.
///
/// Every required field must be present. Keys with no declared field are
/// dropped, unless the record is strict (by descriptor or because the rule
/// was built strict), in which case they fail the conversion. Optional fields
/// missing from the input are missing from the result; no defaults are filled
/// in.
pub struct RecordRule {
    strict: bool,
}

impl RecordRule {
    /// `strict` makes every record strict regardless of its descriptor.
    pub fn new(strict: bool) -> Self {
        RecordRule { strict }
    }
}

impl ConversionRule for RecordRule {
    fn name(&self) -> &'static str {
        "record"
    }

    fn can_convert(&self, descriptor: &TypeDescriptor) -> bool {
        matches!(descriptor, TypeDescriptor::Record(record) if record.has_unique_names())
    }

    fn convert(
        &self,
        js: &Json,
        descriptor: &TypeDescriptor,
        recurse: Recurse<'_>,
    ) -> Result<Value, ConversionError> {
        let TypeDescriptor::Record(record) = descriptor else {
            return Err(unsupported(js, descriptor));
        };
        let entries = js
            .as_object()
            .ok_or_else(|| type_mismatch("object", js, descriptor))?;

        let missing: Vec<String> = record
            .required_names()
            .filter(|name| !entries.contains_key(*name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(ConversionError::new(
                ErrorKind::MissingRequiredFields { missing },
                js,
                descriptor,
            ));
        }

        let strict = self.strict || record.strict;
        let mut fields = BTreeMap::new();
        let mut dropped = Vec::new();
        for (key, entry) in entries {
            let Some(field) = record.field(key) else {
                if strict {
                    return Err(ConversionError::new(
                        ErrorKind::UnknownField { field: key.clone() },
                        js,
                        descriptor,
                    ));
                }
                dropped.push(key.as_str());
                continue;
            };
            let v = recurse(entry, &field.descriptor)
                .map_err(|e| e.at(PathSegment::Key(key.clone())))?;
            fields.insert(key.clone(), v);
        }

        if !dropped.is_empty() {
            debug!(?dropped, descriptor = %descriptor, "dropped undeclared record keys");
        }
        Ok(Value::Record(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Field, SimpleKind};
    use crate::rules::apply;
    use serde_json::json;

    fn k1_k2() -> Vec<Field> {
        vec![
            Field::required("k1", TypeDescriptor::Simple(SimpleKind::Float)),
            Field::required("k2", TypeDescriptor::Simple(SimpleKind::Int)),
        ]
    }

    #[test]
    fn test_lenient_record_drops_unknown_keys() {
        let d = TypeDescriptor::record(k1_k2());
        let out = apply(
            &RecordRule::new(false),
            json!({"k1": 1.0, "k2": 2, "un": "known"}),
            d,
        )
        .unwrap();
        assert_eq!(out.to_json(), json!({"k1": 1.0, "k2": 2}));
        assert!(out.get("un").is_none());
    }

    #[test]
    fn test_missing_required_fields_named() {
        let d = TypeDescriptor::record(k1_k2());
        let err = apply(&RecordRule::new(false), json!({"k1": 1.0}), d).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::MissingRequiredFields {
                missing: vec!["k2".to_string()]
            }
        );
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let d = TypeDescriptor::record([
            Field::required("id", TypeDescriptor::Simple(SimpleKind::Int)),
            Field::optional("note", TypeDescriptor::Simple(SimpleKind::String)),
        ]);
        let out = apply(&RecordRule::new(false), json!({"id": 7}), d.clone()).unwrap();
        assert_eq!(out.to_json(), json!({"id": 7}));

        let out = apply(&RecordRule::new(false), json!({"id": 7, "note": "hi"}), d).unwrap();
        assert_eq!(out.get("note"), Some(&Value::String("hi".to_string())));
    }

    #[test]
    fn test_strict_descriptor_rejects_unknown_keys() {
        let d = TypeDescriptor::strict_record(k1_k2());
        let err = apply(
            &RecordRule::new(false),
            json!({"k1": 1.0, "k2": 2, "un": "known"}),
            d,
        )
        .unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::UnknownField {
                field: "un".to_string()
            }
        );
    }

    #[test]
    fn test_strict_rule_overrides_lenient_descriptor() {
        let d = TypeDescriptor::record(k1_k2());
        let err = apply(
            &RecordRule::new(true),
            json!({"k1": 1.0, "k2": 2, "extra": null}),
            d,
        )
        .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnknownField { .. }));
    }

    #[test]
    fn test_field_failure_carries_key() {
        let d = TypeDescriptor::record(k1_k2());
        let err = apply(&RecordRule::new(false), json!({"k1": 1, "k2": 2}), d).unwrap_err();
        assert_eq!(err.path.to_string(), "$.k1");
        assert_eq!(err.descriptor, TypeDescriptor::Simple(SimpleKind::Float));
    }

    #[test]
    fn test_non_object_input() {
        let d = TypeDescriptor::record(k1_k2());
        assert!(apply(&RecordRule::new(false), json!([1.0, 2]), d).is_err());
    }

    #[test]
    fn test_duplicate_field_names_not_accepted() {
        let d = TypeDescriptor::record([
            Field::required("a", TypeDescriptor::Any),
            Field::optional("a", TypeDescriptor::Null),
        ]);
        assert!(!RecordRule::new(false).can_convert(&d));
    }
}
