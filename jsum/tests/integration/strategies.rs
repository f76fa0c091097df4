use jsum::prelude::*;
use jsum::{Bytes, DataDecoding, DateDecoding, KeyDecoding};
use jsum_testhelpers::test;
use time::OffsetDateTime;

#[derive(Debug, PartialEq)]
struct Event {
    at: OffsetDateTime,
}

impl_jsum_struct!(Event { at: OffsetDateTime });

const APRIL_16: i64 = 1_618_569_000;

fn event_at(session: &DecodeSession, at: Value) -> jsum::Result<i64> {
    let mut source = jsum::Map::new();
    source.insert("at".to_owned(), at);
    session
        .decode::<Event>(&Value::Object(source))
        .map(|e| e.at.unix_timestamp())
}

#[test]
fn best_guess_dates() {
    let session = DecodeSession::new();
    assert_eq!(event_at(&session, value!("2021-04-16T12:30:00+02:00")).unwrap(), APRIL_16);
    assert_eq!(event_at(&session, value!(APRIL_16)).unwrap(), APRIL_16);
    assert_eq!(event_at(&session, value!("1618569000")).unwrap(), APRIL_16);
    assert!(event_at(&session, value!("last tuesday")).is_err());
}

#[test]
fn epoch_dates() {
    let seconds = DecodeSession::new().date_decoding(DateDecoding::SecondsSince1970);
    assert_eq!(event_at(&seconds, value!(1_618_569_000.25)).unwrap(), APRIL_16);

    let millis = DecodeSession::new().date_decoding(DateDecoding::MillisecondsSince1970);
    assert_eq!(event_at(&millis, value!(1_618_569_000_000i64)).unwrap(), APRIL_16);
    assert_eq!(event_at(&millis, value!("1618569000000")).unwrap(), APRIL_16);
}

#[test]
fn iso8601_dates_reject_numbers() {
    let session = DecodeSession::new().date_decoding(DateDecoding::Iso8601);
    assert_eq!(event_at(&session, value!("2021-04-16T10:30:00Z")).unwrap(), APRIL_16);
    let err = event_at(&session, value!(APRIL_16)).unwrap_err();
    insta::assert_snapshot!(err, @"at .at: could not decode OffsetDateTime from int");
}

#[test]
fn custom_dates() {
    let session = DecodeSession::new()
        .date_decoding(DateDecoding::Custom(|_| Ok(OffsetDateTime::UNIX_EPOCH)));
    assert_eq!(event_at(&session, value!("whenever")).unwrap(), 0);
}

#[test]
fn dates_have_no_default() {
    let err = decode::<Event>(&value!({})).unwrap_err();
    insta::assert_snapshot!(err, @"at .at: missing key `at`");
}

#[test]
fn base64_data() {
    assert_eq!(decode::<Bytes>(&value!("aGVsbG8=")).unwrap().into_vec(), b"hello");
    let err = decode::<Bytes>(&value!("!!")).unwrap_err();
    insta::assert_snapshot!(err, @"could not decode Bytes from string");
}

#[test]
fn custom_data() {
    let session = DecodeSession::new()
        .data_decoding(DataDecoding::Custom(|v| Ok(v.to_text().into_bytes())));
    assert_eq!(session.decode::<Bytes>(&value!(42)).unwrap().into_vec(), b"42");
}

#[test]
fn camel_case_source_keys() {
    #[derive(Debug, PartialEq)]
    struct User {
        user_id: i64,
        first_name: String,
    }

    impl_jsum_struct!(User { user_id: i64, first_name: String });

    let session = DecodeSession::new().key_decoding(KeyDecoding::CamelToSnake);
    let u: User = session.decode(&value!({"userID": 7, "firstName": "Ada"})).unwrap();
    assert_eq!(u.first_name, "Ada");
    assert_eq!(u.user_id, 7);
}

#[test]
fn snake_case_source_keys() {
    #[allow(non_snake_case)]
    #[derive(Debug, PartialEq)]
    struct User {
        userId: i64,
        createdAt: String,
    }

    impl_jsum_struct!(User { userId: i64, createdAt: String });

    let session = DecodeSession::new()
        .fail_on_missing_keys(true)
        .key_decoding(KeyDecoding::SnakeToCamel);
    let u: User = session
        .decode(&value!({"user_id": "7", "created_at": "today"}))
        .unwrap();
    assert_eq!(u, User { userId: 7, createdAt: "today".into() });
}

#[test]
fn key_paths_are_not_recased() {
    #[derive(Debug, PartialEq)]
    struct Stats {
        total_count: u32,
    }

    impl_jsum_struct!(Stats { total_count: u32 },
        policy = FieldPolicy::new().key_path("total_count", "meta.totalCount"));

    let session = DecodeSession::new().key_decoding(KeyDecoding::CamelToSnake);
    let s: Stats = session.decode(&value!({"meta": {"totalCount": 5}})).unwrap();
    assert_eq!(s.total_count, 5);
}

#[test]
fn custom_key_decoding() {
    #[derive(Debug, PartialEq)]
    struct Flags {
        debug: bool,
    }

    impl_jsum_struct!(Flags { debug: bool });

    let session = DecodeSession::new().key_decoding(KeyDecoding::Custom(|k| k.to_lowercase()));
    let f: Flags = session.decode(&value!({"DEBUG": 1})).unwrap();
    assert!(f.debug);
}
