use core::ops::Deref;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use jsum_value::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::{BuildError, Fallback, Instance, Jsum, Kind, Special, TypeDescriptor};

impl Jsum for OffsetDateTime {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::builder::<Self>(Kind::Special(Special::Date))
            .type_identifier("OffsetDateTime")
            .build()
    }

    fn build(instance: Instance) -> Result<Self, BuildError> {
        match instance {
            Instance::Date(date) => Ok(date),
            other => Err(BuildError::mismatch("OffsetDateTime", &other)),
        }
    }

    /// RFC 3339 text, or whole epoch seconds for instants RFC 3339 cannot
    /// represent.
    fn to_value(&self) -> Value {
        match self.format(&Rfc3339) {
            Ok(text) => Value::String(text),
            Err(_) => Value::Int(self.unix_timestamp()),
        }
    }
}

/// An owned byte buffer, decoded per the session's data strategy and encoded
/// as standard base64.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    /// Unwraps the buffer.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Bytes(bytes.to_vec())
    }
}

impl Jsum for Bytes {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::builder::<Self>(Kind::Special(Special::Bytes))
            .type_identifier("Bytes")
            .fallback(Fallback::Value(|| Value::String(String::new())))
            .build()
    }

    fn build(instance: Instance) -> Result<Self, BuildError> {
        match instance {
            Instance::Bytes(bytes) => Ok(Bytes(bytes)),
            other => Err(BuildError::mismatch("Bytes", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(STANDARD.encode(&self.0))
    }
}

impl Jsum for Value {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::builder::<Self>(Kind::Special(Special::Value))
            .type_identifier("Value")
            .fallback(Fallback::Value(|| Value::Null))
            .build()
    }

    fn build(instance: Instance) -> Result<Self, BuildError> {
        match instance {
            Instance::Value(value) => Ok(value),
            other => Err(BuildError::mismatch("Value", &other)),
        }
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}
