use jsum::prelude::*;
use jsum::{DecodeErrorKind, decode_labeled};
use jsum_testhelpers::test;

#[test]
fn labeled_tuple_from_object() {
    let (name, age): (String, i64) = decode_labeled(
        &value!({"name": "Bob", "age": 25}),
        &["name", "age"],
        &DecodeSession::new(),
    )
    .unwrap();
    assert_eq!(name, "Bob");
    assert_eq!(age, 25);
}

#[test]
fn labeled_tuple_missing_a_label() {
    let err = decode_labeled::<(String, i64)>(
        &value!({"name": "Bob"}),
        &["name", "age"],
        &DecodeSession::new(),
    )
    .unwrap_err();
    insta::assert_snapshot!(err, @"missing key `age`");
}

#[test]
fn tuple_from_array_is_positional() {
    let t: (String, i64, bool) = decode(&value!(["a", "2", 1])).unwrap();
    assert_eq!(t, ("a".to_owned(), 2, true));
}

#[test]
fn unlabeled_tuple_from_object_uses_indices() {
    let t: (i64, String) = decode(&value!({"1": "x", "0": 1})).unwrap();
    assert_eq!(t, (1, "x".to_owned()));
}

#[test]
fn arity_must_match() {
    let err = decode::<(i64, i64)>(&value!([1])).unwrap_err();
    assert!(matches!(
        err.kind,
        DecodeErrorKind::ArityMismatch {
            expected: 2,
            got: 1
        }
    ));
    insta::assert_snapshot!(err, @"expected 2 elements, got 1");
}

#[test]
fn element_errors_carry_their_index() {
    let err = decode::<(i64, i64)>(&value!([1, [2]])).unwrap_err();
    insta::assert_snapshot!(err, @"at [1]: could not decode i64 from array");
}

#[test]
fn scalars_are_not_tuples() {
    let err = decode::<(i64,)>(&value!(1)).unwrap_err();
    assert!(matches!(err.kind, DecodeErrorKind::CouldNotDecode { .. }));
}

#[test]
fn tuple_fields_inside_structs() {
    #[derive(Debug, PartialEq)]
    struct Segment {
        bounds: (f64, f64),
    }

    impl_jsum_struct!(Segment { bounds: (f64, f64) });

    let s: Segment = decode(&value!({"bounds": ["0.5", 2]})).unwrap();
    assert_eq!(s, Segment { bounds: (0.5, 2.0) });

    // tuples synthesize their default when missing
    let s: Segment = decode(&value!({})).unwrap();
    assert_eq!(s, Segment { bounds: (0.0, 0.0) });
}
