use jsum::prelude::*;
use jsum::{BoxError, FieldMap, HookPanicked, Instance, Registry, try_decode};
use jsum_testhelpers::test;

#[derive(Debug, PartialEq)]
struct Celsius {
    degrees: f64,
}

impl_jsum_struct!(Celsius { degrees: f64 });

fn celsius_from_scalar(value: &Value) -> Result<Instance, BoxError> {
    let degrees = value.to_float().ok_or("not a temperature")?;
    let mut fields = FieldMap::new("Celsius");
    fields.insert("degrees", Instance::Float(degrees));
    Ok(Instance::Struct(fields))
}

#[test]
fn codable_hook_handles_the_wrong_shape() {
    let session = DecodeSession::new().registry(Registry::new().with_hook::<Celsius>(celsius_from_scalar));
    assert_eq!(session.decode::<Celsius>(&value!("21.5")).unwrap(), Celsius { degrees: 21.5 });
    // objects still decode field by field
    assert_eq!(
        session.decode::<Celsius>(&value!({"degrees": 3})).unwrap(),
        Celsius { degrees: 3.0 }
    );

    let err = session.decode::<Celsius>(&value!([1])).unwrap_err();
    insta::assert_snapshot!(err, @"not a temperature");
}

#[test]
fn without_a_session_registry_nothing_is_overridden() {
    assert!(decode::<Celsius>(&value!("21.5")).is_err());
}

#[test]
fn registry_policies_layer_over_the_type() {
    #[derive(Debug, PartialEq)]
    struct Account {
        id: i64,
        plan: String,
    }

    impl_jsum_struct!(Account { id: i64, plan: String },
        policy = FieldPolicy::new().default_value("plan", "free"));

    let registry = Registry::new()
        .with_policy::<Account>(FieldPolicy::new().key_path("id", "account_id"))
        .with_policy::<Account>(FieldPolicy::new().default_value("plan", "trial"));
    let session = DecodeSession::new().registry(registry);

    let a: Account = session.decode(&value!({"account_id": "17"})).unwrap();
    assert_eq!(a, Account { id: 17, plan: "trial".into() });

    // the registry is per session
    let a: Account = decode(&value!({"id": 3})).unwrap();
    assert_eq!(a, Account { id: 3, plan: "free".into() });
}

fn panicking_hook(_: &Value) -> Result<Instance, BoxError> {
    panic!("hook exploded")
}

#[test]
fn try_decode_captures_hook_panics() {
    let session = DecodeSession::new().registry(Registry::new().with_hook::<Celsius>(panicking_hook));
    let err = try_decode::<Celsius>(&value!(true), &session).unwrap_err();
    let source = core::error::Error::source(&err).and_then(|e| e.downcast_ref::<HookPanicked>());
    assert_eq!(
        source,
        Some(&HookPanicked {
            message: "hook exploded".into()
        })
    );
}

#[test]
fn try_decode_passes_ordinary_results_through() {
    let session = DecodeSession::new();
    assert_eq!(try_decode::<i64>(&value!("5"), &session).unwrap(), 5);
    assert!(try_decode::<i64>(&value!([]), &session).is_err());
}
