use jsum::prelude::*;
use jsum::{
    BoxError, BuildError, DecodeErrorKind, EnumDef, Instance, Kind, Registry, TypeDescriptor,
};
use jsum_testhelpers::test;

#[derive(Debug, PartialEq)]
enum Mood {
    Happy,
    Sad,
}

fn decode_mood(value: &Value) -> Result<Instance, BoxError> {
    Ok(Instance::Variant {
        name: value.to_text().to_lowercase(),
        payload: None,
    })
}

impl Jsum for Mood {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::builder::<Self>(Kind::Enum(
            EnumDef::new(vec!["happy", "sad"]).decode_with(decode_mood),
        ))
        .type_identifier("Mood")
        .build()
    }

    fn build(instance: Instance) -> Result<Self, BuildError> {
        match instance {
            Instance::Variant { name, .. } => match name.as_str() {
                "happy" => Ok(Mood::Happy),
                "sad" => Ok(Mood::Sad),
                _ => Err(BuildError::UnknownVariant { name: name.clone() }),
            },
            other => Err(BuildError::mismatch("Mood", &other)),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Mood::Happy => "happy".into(),
            Mood::Sad => "sad".into(),
        }
    }
}

/// An enum that declares no way to decode itself.
#[derive(Debug, PartialEq)]
enum Shade {
    Light,
    Dark,
}

impl Jsum for Shade {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::builder::<Self>(Kind::Enum(EnumDef::new(vec!["light", "dark"])))
            .type_identifier("Shade")
            .build()
    }

    fn build(instance: Instance) -> Result<Self, BuildError> {
        match instance {
            Instance::Variant { name, .. } if name == "light" => Ok(Shade::Light),
            Instance::Variant { name, .. } if name == "dark" => Ok(Shade::Dark),
            Instance::Variant { name, .. } => Err(BuildError::UnknownVariant { name }),
            other => Err(BuildError::mismatch("Shade", &other)),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Shade::Light => "light".into(),
            Shade::Dark => "dark".into(),
        }
    }
}

fn decode_shade(value: &Value) -> Result<Instance, BoxError> {
    let name = if value.to_bool() { "dark" } else { "light" };
    Ok(Instance::Variant {
        name: name.to_owned(),
        payload: None,
    })
}

#[test]
fn enums_decode_through_their_hook() {
    assert_eq!(decode::<Mood>(&value!("HAPPY")).unwrap(), Mood::Happy);
    assert_eq!(decode::<Vec<Mood>>(&value!(["sad", "happy"])).unwrap(), [Mood::Sad, Mood::Happy]);
}

#[test]
fn unknown_variants_fail_to_build() {
    let err = decode::<Mood>(&value!("angry")).unwrap_err();
    assert!(matches!(err.kind, DecodeErrorKind::Build(_)));
    insta::assert_snapshot!(err, @"build failed: unknown variant `angry`");
}

#[test]
fn enums_without_a_hook_are_not_supported() {
    let err = decode::<Shade>(&value!("light")).unwrap_err();
    insta::assert_snapshot!(err, @"decoding enum `Shade` is not supported");
}

#[test]
fn registry_supplies_a_missing_hook() {
    let session = DecodeSession::new().registry(Registry::new().with_hook::<Shade>(decode_shade));
    assert_eq!(session.decode::<Shade>(&value!(1)).unwrap(), Shade::Dark);
    assert_eq!(session.decode::<Shade>(&value!("")).unwrap(), Shade::Light);
}

#[test]
fn hook_errors_are_reported() {
    fn refuse(_: &Value) -> Result<Instance, BoxError> {
        Err("no moods today".into())
    }

    let session = DecodeSession::new().registry(Registry::new().with_hook::<Mood>(refuse));
    let err = session.decode::<Mood>(&value!("happy")).unwrap_err();
    insta::assert_snapshot!(err, @"no moods today");
}
