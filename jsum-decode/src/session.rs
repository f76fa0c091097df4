use jsum_core::{BoxError, Jsum, Registry, camel_case_to_snake_case, snake_case_to_camel_case};
use jsum_value::Value;
use time::OffsetDateTime;

use crate::Result;

/// How source object keys are rewritten before they are matched against
/// field names.
///
/// Only the keys of objects decoded into structs and classes are rewritten.
/// Key paths configured in a field policy are always used verbatim.
#[derive(Clone, Copy, Debug, Default)]
pub enum KeyDecoding {
    /// Keys are matched as-is
    #[default]
    Identity,
    /// `first_name` in the source matches a `firstName` field
    SnakeToCamel,
    /// `firstName` in the source matches a `first_name` field
    CamelToSnake,
    /// Keys are rewritten by the given function
    Custom(fn(&str) -> String),
}

impl KeyDecoding {
    /// Rewrites one source key.
    pub fn decode_key(&self, key: &str) -> String {
        match self {
            KeyDecoding::Identity => key.to_owned(),
            KeyDecoding::SnakeToCamel => snake_case_to_camel_case(key),
            KeyDecoding::CamelToSnake => camel_case_to_snake_case(key),
            KeyDecoding::Custom(f) => f(key),
        }
    }
}

/// How timestamps are read.
#[derive(Clone, Copy, Debug, Default)]
pub enum DateDecoding {
    /// Numbers (or numeric strings) are seconds since the Unix epoch
    SecondsSince1970,
    /// Numbers (or numeric strings) are milliseconds since the Unix epoch
    MillisecondsSince1970,
    /// Strings are ISO 8601 timestamps
    Iso8601,
    /// Strings are tried as ISO 8601 first, then anything numeric as epoch seconds
    #[default]
    BestGuess,
    /// Timestamps are read by the given function
    Custom(fn(&Value) -> core::result::Result<OffsetDateTime, BoxError>),
}

/// How byte buffers are read.
#[derive(Clone, Copy, Debug, Default)]
pub enum DataDecoding {
    /// Strings are standard base64; arrays and objects are their canonical text
    #[default]
    Base64,
    /// Buffers are read by the given function
    Custom(fn(&Value) -> core::result::Result<Vec<u8>, BoxError>),
}

/// Options for one or more decodes.
///
/// A session is an immutable snapshot once built; the engine only ever
/// borrows it.
///
/// ```
/// use jsum_decode::{DecodeSession, KeyDecoding};
/// use jsum_value::value;
///
/// let session = DecodeSession::new()
///     .fail_on_missing_keys(true)
///     .key_decoding(KeyDecoding::SnakeToCamel);
/// let n: i64 = session.decode(&value!("12")).unwrap();
/// assert_eq!(n, 12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DecodeSession {
    fail_on_missing_keys: bool,
    fail_on_null_non_optionals: bool,
    key_decoding: KeyDecoding,
    date_decoding: DateDecoding,
    data_decoding: DataDecoding,
    registry: Registry,
}

impl DecodeSession {
    /// A lenient session: missing keys and nulls fall back to type defaults,
    /// keys are matched as-is, dates are best-guess and bytes are base64.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a missing key fails instead of falling back to the field
    /// type's own default. Explicit per-field defaults still apply.
    pub fn fail_on_missing_keys(mut self, fail: bool) -> Self {
        self.fail_on_missing_keys = fail;
        self
    }

    /// Whether a null for a non-optional field fails instead of falling back
    /// to the field type's own default. Explicit per-field defaults still apply.
    pub fn fail_on_null_non_optionals(mut self, fail: bool) -> Self {
        self.fail_on_null_non_optionals = fail;
        self
    }

    /// Sets the key decoding strategy.
    pub fn key_decoding(mut self, strategy: KeyDecoding) -> Self {
        self.key_decoding = strategy;
        self
    }

    /// Sets the date decoding strategy.
    pub fn date_decoding(mut self, strategy: DateDecoding) -> Self {
        self.date_decoding = strategy;
        self
    }

    /// Sets the data decoding strategy.
    pub fn data_decoding(mut self, strategy: DataDecoding) -> Self {
        self.data_decoding = strategy;
        self
    }

    /// Sets the registry of per-type overrides.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Whether missing keys fail.
    pub fn fails_on_missing_keys(&self) -> bool {
        self.fail_on_missing_keys
    }

    /// Whether nulls for non-optional fields fail.
    pub fn fails_on_null_non_optionals(&self) -> bool {
        self.fail_on_null_non_optionals
    }

    /// The key decoding strategy.
    pub fn key_strategy(&self) -> KeyDecoding {
        self.key_decoding
    }

    /// The date decoding strategy.
    pub fn date_strategy(&self) -> DateDecoding {
        self.date_decoding
    }

    /// The data decoding strategy.
    pub fn data_strategy(&self) -> DataDecoding {
        self.data_decoding
    }

    /// The registry of per-type overrides.
    pub fn type_registry(&self) -> &Registry {
        &self.registry
    }

    /// Decodes `value` as a `T` with this session.
    pub fn decode<T: Jsum>(&self, value: &Value) -> Result<T> {
        crate::decode_with(value, self)
    }
}
