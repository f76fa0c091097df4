//! `jsum-value` provides the untyped, JSON-shaped value tree that jsum decodes from.
//!
//! # Features
//!
//! - **Seven value types**: Null, Bool, Int, Float, String, Array, Object
//! - **Ordered objects**: object keys keep their insertion order, so "the values of an
//!   object" is a well-defined sequence
//! - **Coercion views**: total, side-effect free conversions (`to_bool`, `to_int`,
//!   `to_float`, `to_text`, `to_date`, `to_data`, `to_array`, `to_object`) with
//!   documented fallbacks
//! - **Canonical text**: `Display` renders compact JSON; `FromStr` parses it
//!
//! # Example
//!
//! ```
//! use jsum_value::{Value, value};
//!
//! let v = value!({"score": "-25034", "tags": ["a", "b"]});
//! assert_eq!(v.get("score").and_then(Value::to_int), Some(-25034));
//! assert_eq!(v.get("tags").map(|t| t.to_array().len()), Some(2));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod value;
pub use value::*;

mod coerce;

mod convert;

mod datetime;
pub use datetime::{date_from_epoch_millis, date_from_epoch_seconds, date_from_iso8601};

mod macros;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
