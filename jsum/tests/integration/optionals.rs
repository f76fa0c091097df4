use jsum::prelude::*;
use jsum_testhelpers::test;

#[derive(Debug, PartialEq)]
struct Profile {
    nickname: Option<String>,
    age: Option<u32>,
    tags: Option<Vec<String>>,
}

impl_jsum_struct!(Profile {
    nickname: Option<String>,
    age: Option<u32>,
    tags: Option<Vec<String>>,
});

const NOTHING: Profile = Profile {
    nickname: None,
    age: None,
    tags: None,
};

#[test]
fn null_is_none() {
    assert_eq!(decode::<Option<i64>>(&Value::Null).unwrap(), None);
    let p: Profile = decode(&value!({"nickname": null, "age": null, "tags": null})).unwrap();
    assert_eq!(p, NOTHING);
}

#[test]
fn empty_values_collapse_to_none() {
    let p: Profile = decode(&value!({"nickname": "", "age": 0, "tags": []})).unwrap();
    assert_eq!(p, NOTHING);
    assert_eq!(decode::<Option<f64>>(&value!("0")).unwrap(), None);
}

#[test]
fn missing_optionals_are_none_even_when_strict() {
    let session = DecodeSession::new()
        .fail_on_missing_keys(true)
        .fail_on_null_non_optionals(true);
    assert_eq!(session.decode::<Profile>(&value!({})).unwrap(), NOTHING);
}

#[test]
fn present_values_are_some() {
    let p: Profile = decode(&value!({"nickname": "bo", "age": "31", "tags": ["a", 2]})).unwrap();
    assert_eq!(
        p,
        Profile {
            nickname: Some("bo".into()),
            age: Some(31),
            tags: Some(vec!["a".into(), "2".into()]),
        }
    );
}

#[test]
fn false_is_not_empty() {
    assert_eq!(decode::<Option<bool>>(&value!(false)).unwrap(), Some(false));
}

#[test]
fn none_encodes_as_null() {
    assert_eq!(
        NOTHING.to_value(),
        value!({"nickname": null, "age": null, "tags": null})
    );
}
