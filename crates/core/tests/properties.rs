//! End-to-end conversion properties, exercised through the public API only.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

use jsont_core::{
    convert, ConvertOptions, ErrorKind, Field, JsonKind, Registry, SimpleKind, TupleElement,
    TypeDescriptor, Value,
};
use serde_json::{json, Value as Json};

fn simple(kind: SimpleKind) -> TypeDescriptor {
    TypeDescriptor::Simple(kind)
}

fn int() -> TypeDescriptor {
    simple(SimpleKind::Int)
}

fn string() -> TypeDescriptor {
    simple(SimpleKind::String)
}

fn samples() -> Vec<Json> {
    vec![
        json!(null),
        json!(true),
        json!(0),
        json!(-12),
        json!(2.25),
        json!(""),
        json!("text"),
        json!([1, "a", null]),
        json!({"nested": {"deeper": [1.5]}}),
    ]
}

// ──────────────────────────────────────────────
// Leaf descriptors
// ──────────────────────────────────────────────

#[test]
fn any_returns_every_value_unchanged() {
    for v in samples() {
        assert_eq!(convert(&v, &TypeDescriptor::Any).unwrap(), Value::Any(v.clone()));
    }
}

#[test]
fn null_accepts_only_null() {
    assert_eq!(convert(&json!(null), &TypeDescriptor::Null).unwrap(), Value::Null);
    for v in samples().into_iter().filter(|v| !v.is_null()) {
        let err = convert(&v, &TypeDescriptor::Null).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NotNull { .. }), "{}", v);
    }
}

#[test]
fn simple_kinds_round_trip_and_exclude_each_other() {
    let cases = [
        (json!(false), SimpleKind::Bool),
        (json!(42), SimpleKind::Int),
        (json!(0.5), SimpleKind::Float),
        (json!("s"), SimpleKind::String),
    ];
    let kinds = [
        SimpleKind::Bool,
        SimpleKind::Int,
        SimpleKind::Float,
        SimpleKind::String,
    ];
    for (v, kind) in &cases {
        let out = convert(v, &simple(*kind)).unwrap();
        assert_eq!(out.to_json(), *v);
        for other in kinds.iter().filter(|k| *k != kind) {
            let err = convert(v, &simple(*other)).unwrap_err();
            assert!(
                matches!(err.kind, ErrorKind::TypeMismatch { .. }),
                "{} as {}",
                v,
                other
            );
        }
    }
}

#[test]
fn literal_set_membership() {
    let d = TypeDescriptor::literal([json!(5), json!(6)]);
    assert_eq!(convert(&json!(6), &d).unwrap(), Value::Int(6));
    let err = convert(&json!(7), &d).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::NotInLiteralSet {
            allowed: vec![json!(5), json!(6)]
        }
    );
}

// ──────────────────────────────────────────────
// Containers
// ──────────────────────────────────────────────

#[test]
fn tuple_arity_and_position() {
    let d = TypeDescriptor::tuple([TupleElement::of(int()), TupleElement::of(string())]);
    assert_eq!(
        convert(&json!([1, "a"]), &d).unwrap(),
        Value::Tuple(vec![Value::Int(1), Value::String("a".to_string())])
    );

    let err = convert(&json!(["a", 1]), &d).unwrap_err();
    assert_eq!(err.path.to_string(), "$[0]");
    assert_eq!(
        err.kind,
        ErrorKind::TypeMismatch {
            expected: "int",
            found: JsonKind::String
        }
    );
}

#[test]
fn tuple_variadic_gap_expansion() {
    let d = TypeDescriptor::tuple([
        TupleElement::of(int()),
        TupleElement::Gap,
        TupleElement::of(int()),
    ]);
    let out = convert(&json!([1, 2, 3, 4, 5]), &d).unwrap();
    let items = out.as_slice().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0], Value::Int(1));
    assert_eq!(items[1], Value::Any(json!(2)));
    assert_eq!(items[3], Value::Any(json!(4)));
    assert_eq!(items[4], Value::Int(5));
}

#[test]
fn tuple_with_two_gaps_is_a_descriptor_error() {
    let d = TypeDescriptor::tuple([TupleElement::Gap, TupleElement::Gap]);
    let err = convert(&json!([1, 2]), &d).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidDescriptor { .. }));
}

#[test]
fn sequence_homogeneity() {
    let d = TypeDescriptor::sequence(int());
    assert_eq!(
        convert(&json!([1, 2, 3]), &d).unwrap(),
        Value::Sequence(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
    let err = convert(&json!([1, "x", 3]), &d).unwrap_err();
    assert_eq!(err.path.to_string(), "$[1]");
}

#[test]
fn mapping_keeps_key_set() {
    let d = TypeDescriptor::mapping(int());
    let out = convert(&json!({"a": 1, "b": 2}), &d).unwrap();
    let mut expected = BTreeMap::new();
    expected.insert("a".to_string(), Value::Int(1));
    expected.insert("b".to_string(), Value::Int(2));
    assert_eq!(out, Value::Mapping(expected));
}

// ──────────────────────────────────────────────
// Unions
// ──────────────────────────────────────────────

#[test]
fn union_prefers_string_over_sequence() {
    let d = TypeDescriptor::union([TypeDescriptor::sequence(string()), string()]);
    assert_eq!(
        convert(&json!("ab"), &d).unwrap(),
        Value::String("ab".to_string())
    );
}

#[test]
fn union_failure_lists_every_alternative() {
    let d = TypeDescriptor::union([int(), string()]);
    let err = convert(&json!(3.5), &d).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoAlternativeMatched { .. }));
    let failures = err.alternatives();
    assert_eq!(failures.len(), 2);
    assert!(failures
        .iter()
        .all(|f| matches!(f.error.kind, ErrorKind::TypeMismatch { .. })));
}

#[test]
fn optional_value_as_union_with_null() {
    let d = TypeDescriptor::union([int(), TypeDescriptor::Null]);
    assert_eq!(convert(&json!(null), &d).unwrap(), Value::Null);
    assert_eq!(convert(&json!(3), &d).unwrap(), Value::Int(3));
}

#[test]
fn empty_union_is_unsupported() {
    let err = convert(&json!(1), &TypeDescriptor::Union(vec![])).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnsupportedType);
}

// ──────────────────────────────────────────────
// Records
// ──────────────────────────────────────────────

fn k1_k2(strict: bool) -> TypeDescriptor {
    let fields = [
        Field::required("k1", simple(SimpleKind::Float)),
        Field::required("k2", int()),
    ];
    if strict {
        TypeDescriptor::strict_record(fields)
    } else {
        TypeDescriptor::record(fields)
    }
}

#[test]
fn lenient_record_drops_unknown_keys() {
    let out = convert(&json!({"k1": 1.0, "k2": 2, "un": "known"}), &k1_k2(false)).unwrap();
    assert_eq!(out.to_json(), json!({"k1": 1.0, "k2": 2}));
}

#[test]
fn record_missing_required_field() {
    let err = convert(&json!({"k1": 1.0}), &k1_k2(false)).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::MissingRequiredFields {
            missing: vec!["k2".to_string()]
        }
    );
}

#[test]
fn strict_record_rejects_unknown_keys() {
    let err = convert(&json!({"k1": 1.0, "k2": 2, "un": "known"}), &k1_k2(true)).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::UnknownField {
            field: "un".to_string()
        }
    );
}

#[test]
fn nested_document_error_path() {
    let d = TypeDescriptor::record([
        Field::required("name", string()),
        Field::required(
            "items",
            TypeDescriptor::sequence(TypeDescriptor::record([
                Field::required("id", int()),
                Field::optional("tags", TypeDescriptor::mapping(string())),
            ])),
        ),
    ]);
    let ok = json!({
        "name": "order",
        "items": [{"id": 1}, {"id": 2, "tags": {"color": "red"}}]
    });
    assert_eq!(convert(&ok, &d).unwrap().to_json(), ok);

    let bad = json!({
        "name": "order",
        "items": [{"id": 1}, {"id": 2, "tags": {"color": 3}}]
    });
    let err = convert(&bad, &d).unwrap_err();
    assert_eq!(err.path.to_string(), "$.items[1].tags.color");
    assert_eq!(
        err.to_string(),
        "$.items[1].tags.color: cannot convert 3 to string: expected string, found int"
    );
}

// ──────────────────────────────────────────────
// Descriptor documents and sharing
// ──────────────────────────────────────────────

#[test]
fn descriptor_document_drives_conversion() {
    let d = TypeDescriptor::from_json(&json!({
        "kind": "record",
        "fields": [
            {"name": "point", "type": {"kind": "tuple", "elements": ["float", "float"]}},
            {"name": "label", "type": {"kind": "union", "alternatives": ["string", "null"]}, "required": false}
        ]
    }))
    .unwrap();
    let out = convert(&json!({"point": [0.5, 1.5], "label": null}), &d).unwrap();
    assert_eq!(
        out.get("point"),
        Some(&Value::Tuple(vec![Value::Float(0.5), Value::Float(1.5)]))
    );
    assert_eq!(out.get("label"), Some(&Value::Null));
}

#[test]
fn registry_shared_across_threads() {
    let registry = Arc::new(Registry::new(ConvertOptions::default()));
    let d = Arc::new(TypeDescriptor::sequence(int()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let d = Arc::clone(&d);
            thread::spawn(move || registry.convert(&json!([i, i + 1]), &d))
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.join().unwrap().unwrap();
        let i = i as i64;
        assert_eq!(out, Value::Sequence(vec![Value::Int(i), Value::Int(i + 1)]));
    }
}
