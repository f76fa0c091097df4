use jsum::prelude::*;
use jsum::TransformError;
use jsum_testhelpers::test;

#[test]
fn properties_transform_from_other_types() {
    #[derive(Debug, PartialEq)]
    struct Post {
        title: String,
        score: i64,
        is_saved: bool,
        is_upvoted: bool,
    }

    impl_jsum_struct!(Post { title: String, score: i64, is_saved: bool, is_upvoted: bool },
        policy = [
            Property::new("score").transform(Transform::<Option<String>, i64>::new().transformer()),
            Property::new("is_saved").transform(Transform::<Option<String>, bool>::new().transformer()),
            Property::new("is_upvoted").transform(Transform::<i64, bool>::new().transformer()),
        ]
        .into_iter()
        .collect());

    let post: Post = decode(&value!({
        "title": "Hello World",
        "score": "100",
        "is_saved": null,
        "is_upvoted": 1
    }))
    .unwrap();
    assert_eq!(
        post,
        Post {
            title: "Hello World".into(),
            score: 100,
            is_saved: false,
            is_upvoted: true,
        }
    );
}

#[test]
fn casing_transformers_on_values() {
    #[derive(Debug, PartialEq)]
    struct Column {
        name: String,
    }

    impl_jsum_struct!(Column { name: String },
        policy = FieldPolicy::new().transform("name", Transformer::snake_case_to_camel_case()));

    let c: Column = decode(&value!({"name": "user_id"})).unwrap();
    assert_eq!(c.name, "userId");

    let back = Transformer::snake_case_to_camel_case()
        .reversed()
        .unwrap()
        .transform(Some(&value!("createdAt")))
        .unwrap();
    assert_eq!(back, value!("created_at"));
}

#[test]
fn failing_transformers_surface_their_error() {
    #[derive(Debug)]
    struct Strict {
        #[allow(dead_code)]
        code: String,
    }

    impl_jsum_struct!(Strict { code: String },
        policy = FieldPolicy::new().transform("code", Transformer::new(|_| Err("code rejected".into()))));

    let err = decode::<Strict>(&value!({"code": "x"})).unwrap_err();
    insta::assert_snapshot!(err, @"at .code: code rejected");
}

#[test]
fn transformers_do_not_run_for_missing_keys() {
    #[derive(Debug, PartialEq)]
    struct Counter {
        hits: i64,
    }

    impl_jsum_struct!(Counter { hits: i64 },
        policy = FieldPolicy::new().transform("hits", Transformer::new(|_| Err("ran".into()))));

    assert_eq!(decode::<Counter>(&value!({})).unwrap(), Counter { hits: 0 });
}

#[test]
fn one_way_transformers_cannot_reverse() {
    let t = Transformer::new(|v| Ok(v.cloned().unwrap_or_default()));
    assert!(!t.is_reversible());
    assert!(t.reversed().is_none());
    let err = t.reverse(None).unwrap_err();
    assert_eq!(
        err.downcast_ref::<TransformError>(),
        Some(&TransformError::NotReversible)
    );
}

#[test]
fn typed_transforms() {
    assert_eq!(Transform::<bool, i64>::new().transform(Some(&true)).unwrap(), 1);
    assert_eq!(Transform::<bool, i64>::new().transform(None).unwrap(), 0);
    assert_eq!(Transform::<bool, String>::new().transform(Some(&false)).unwrap(), "false");
    assert_eq!(
        Transform::<Vec<String>, Vec<i64>>::new()
            .transform(Some(&vec!["234".to_owned(), "123".to_owned()]))
            .unwrap(),
        vec![234, 123]
    );
    assert_eq!(Transform::<i64, String>::new().transform(Some(&5)).unwrap(), "5");
}
