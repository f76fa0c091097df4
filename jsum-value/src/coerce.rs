//! Lenient coercion views over [`Value`].
//!
//! Every view is total: it either produces a value or reports (by `None`) that the
//! source cannot be converted at all. Whether a failed view is an error is decided
//! by the caller.

use std::borrow::Cow;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use time::OffsetDateTime;

use crate::datetime::{date_from_epoch_seconds, date_from_iso8601};
use crate::{Map, Value};

impl Value {
    /// Truthiness: null is false, numbers are true when nonzero, strings and
    /// arrays when nonempty, objects always.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// Integer view. Null is `0`, booleans are `0`/`1`, floats truncate toward
    /// zero (saturating), strings are parsed. Arrays and objects return `None`,
    /// as do strings that do not parse.
    pub fn to_int(&self) -> Option<i64> {
        match self {
            Value::Null => Some(0),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Int(i) => Some(*i),
            Value::Float(f) => Some(*f as i64),
            Value::String(s) => s.parse().ok(),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Float view, with the same fallbacks as [`Value::to_int`].
    pub fn to_float(&self) -> Option<f64> {
        match self {
            Value::Null => Some(0.0),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => s.parse().ok(),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// String view. Primitives are stringified (`null` becomes `"null"`), strings
    /// are returned as-is, arrays and objects are rendered as canonical JSON.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => "null".to_owned(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => s.clone(),
            Value::Array(_) | Value::Object(_) => self.to_string(),
        }
    }

    /// Timestamp view. Numbers are seconds since the Unix epoch, strings are
    /// parsed as ISO 8601. Anything else returns `None`.
    pub fn to_date(&self) -> Option<OffsetDateTime> {
        match self {
            Value::Int(i) => date_from_epoch_seconds(*i as f64),
            Value::Float(f) => date_from_epoch_seconds(*f),
            Value::String(s) => date_from_iso8601(s),
            _ => None,
        }
    }

    /// Byte-buffer view. Strings are decoded as standard base64, arrays and
    /// objects become the UTF-8 bytes of their canonical text.
    pub fn to_data(&self) -> Option<Vec<u8>> {
        match self {
            Value::String(s) => STANDARD.decode(s).ok(),
            Value::Array(_) | Value::Object(_) => Some(self.to_string().into_bytes()),
            _ => None,
        }
    }

    /// Array view. Null is empty, arrays are borrowed, objects yield their values
    /// in insertion order, everything else is empty.
    pub fn to_array(&self) -> Cow<'_, [Value]> {
        match self {
            Value::Array(a) => Cow::Borrowed(a.as_slice()),
            Value::Object(o) => Cow::Owned(o.values().cloned().collect()),
            _ => Cow::Borrowed(&[]),
        }
    }

    /// Object view. Null is an empty map and objects are borrowed. Any other
    /// value cannot be viewed as an object and returns `None`.
    pub fn to_object(&self) -> Option<Cow<'_, Map>> {
        match self {
            Value::Null => Some(Cow::Owned(Map::new())),
            Value::Object(o) => Some(Cow::Borrowed(o)),
            _ => None,
        }
    }
}

/// Integral floats keep a trailing `.0` so they read back as floats.
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}
