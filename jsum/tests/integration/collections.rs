use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use jsum::prelude::*;
use jsum::DecodeErrorKind;
use jsum_testhelpers::test;

#[test]
fn arrays_decode_each_element() {
    let v: Vec<i64> = decode(&value!(["234", 123, 4.5, true])).unwrap();
    assert_eq!(v, [234, 123, 4, 1]);
}

#[test]
fn arrays_do_not_accept_objects() {
    let err = decode::<Vec<i64>>(&value!({"a": 1})).unwrap_err();
    assert!(matches!(err.kind, DecodeErrorKind::CouldNotDecode { .. }));
}

#[test]
fn null_elements_need_optional_element_types() {
    let err = decode::<Vec<bool>>(&value!([true, null])).unwrap_err();
    insta::assert_snapshot!(err, @"at [1]: null found for non-optional bool");

    let v: Vec<Option<bool>> = decode(&value!([true, null])).unwrap();
    assert_eq!(v, [Some(true), None]);
}

#[test]
fn maps_keep_source_order() {
    let m: IndexMap<String, u16> = decode(&value!({"b": "2", "a": 1})).unwrap();
    assert_eq!(m.keys().collect::<Vec<_>>(), ["b", "a"]);
    assert_eq!(m["b"], 2);

    let m: BTreeMap<String, String> = decode(&value!({"x": 1, "y": [1]})).unwrap();
    assert_eq!(m["x"], "1");
    assert_eq!(m["y"], "[1]");
}

#[test]
fn map_errors_carry_the_key() {
    let err = decode::<HashMap<String, i32>>(&value!({"ok": 1, "bad": "nope"})).unwrap_err();
    insta::assert_snapshot!(err, @r#"at ["bad"]: could not decode i32 from string"#);
}

#[test]
fn nested_collections_in_structs() {
    #[derive(Debug, PartialEq)]
    struct Inventory {
        counts: HashMap<String, Vec<u32>>,
        labels: Vec<String>,
    }

    impl_jsum_struct!(Inventory { counts: HashMap<String, Vec<u32>>, labels: Vec<String> });

    let inv: Inventory = decode(&value!({"counts": {"apples": ["1", 2]}})).unwrap();
    assert_eq!(inv.counts["apples"], [1, 2]);
    assert!(inv.labels.is_empty());
}

#[test]
fn untyped_values_pass_through() {
    #[derive(Debug, PartialEq)]
    struct Envelope {
        kind: String,
        payload: Value,
    }

    impl_jsum_struct!(Envelope { kind: String, payload: Value });

    let e: Envelope = decode(&value!({"kind": "ping", "payload": {"n": [1, null]}})).unwrap();
    assert_eq!(e.payload, value!({"n": [1, null]}));

    let e: Envelope = decode(&value!({"kind": "ping", "payload": null})).unwrap();
    assert_eq!(e.payload, Value::Null);
}
