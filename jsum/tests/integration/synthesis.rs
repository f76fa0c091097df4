use jsum::prelude::*;
use jsum::{Fallback, default_json, synthesize, synthesize_instance};
use jsum_testhelpers::test;

#[derive(Debug, PartialEq)]
struct Settings {
    volume: u8,
    theme: String,
    accent: Option<String>,
    size: (u16, u16),
}

impl_jsum_struct!(Settings { volume: u8, theme: String, accent: Option<String>, size: (u16, u16) },
    policy = FieldPolicy::new().default_value("volume", 11),
    fallback = Fallback::Synthesized);

#[derive(Debug, PartialEq)]
struct Window {
    title: String,
    settings: Settings,
}

impl_jsum_struct!(Window { title: String, settings: Settings });

#[derive(Debug, PartialEq)]
struct Frame {
    window: Window,
}

impl_jsum_struct!(Frame { window: Window });

#[test]
fn synthesize_uses_explicit_then_type_defaults() {
    let s: Settings = synthesize().unwrap();
    assert_eq!(
        s,
        Settings {
            volume: 11,
            theme: String::new(),
            accent: None,
            size: (0, 0),
        }
    );
}

#[test]
fn default_json_renders_the_synthesized_value() {
    insta::assert_snapshot!(
        default_json::<Settings>().unwrap(),
        @r#"{"volume":11,"theme":"","accent":null,"size":[0,0]}"#
    );
}

#[test]
fn synthesis_recurses_into_nested_structs() {
    let w: Window = synthesize().unwrap();
    assert_eq!(w.title, "");
    assert_eq!(w.settings.volume, 11);

    // synthesis has no source, so strictness does not apply
    let session = DecodeSession::new().fail_on_missing_keys(true);
    let instance = synthesize_instance(Frame::descriptor(), &session).unwrap();
    assert_eq!(
        Frame::build(instance).unwrap().window.settings.size,
        (0, 0)
    );
}

#[test]
fn opted_in_structs_default_when_missing() {
    let w: Window = decode(&value!({"title": "main"})).unwrap();
    assert_eq!(w.settings.volume, 11);

    // a struct's declared default survives strict sessions
    let strict = DecodeSession::new()
        .fail_on_missing_keys(true)
        .fail_on_null_non_optionals(true);
    let w: Window = strict.decode(&value!({"title": "main", "settings": null})).unwrap();
    assert_eq!(w.settings.volume, 11);

    // its primitive fields do not
    let err = strict
        .decode::<Window>(&value!({"title": "main", "settings": {}}))
        .unwrap_err();
    insta::assert_snapshot!(err, @"at .settings.theme: missing key `theme`");
}

#[test]
fn other_structs_need_a_source_value() {
    let err = decode::<Frame>(&value!({})).unwrap_err();
    insta::assert_snapshot!(err, @"at .window: missing key `window`");
}

#[test]
fn null_opted_in_struct_is_synthesized() {
    let w: Window = decode(&value!({"title": "t", "settings": null})).unwrap();
    assert_eq!(w.settings.theme, "");
}
