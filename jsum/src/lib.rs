//! Decode loosely-shaped JSON into typed Rust values.
//!
//! jsum is for data whose producer is not careful about types: numbers that
//! arrive as strings, booleans as `0`/`1`, fields that move around between
//! API versions, nulls where a value should be. Instead of failing, the
//! decoder coerces each value toward the shape the target type asks for, and
//! falls back to defaults where nothing usable is present.
//!
//! ```
//! use jsum::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct Comment {
//!     author: String,
//!     score: i64,
//!     edited: bool,
//!     parent: Option<i64>,
//! }
//!
//! impl_jsum_struct!(Comment { author: String, score: i64, edited: bool, parent: Option<i64> },
//!     policy = FieldPolicy::new().key_path("score", "details.score"));
//!
//! let v = value!({
//!     "author": 42,
//!     "details": {"score": "-25034"},
//!     "edited": 1,
//!     "parent": 0
//! });
//! let comment: Comment = decode(&v).unwrap();
//! assert_eq!(comment, Comment {
//!     author: "42".into(),
//!     score: -25034,
//!     edited: true,
//!     parent: None,
//! });
//! ```
//!
//! The pieces live in separate crates, all re-exported here:
//!
//! - [`jsum_value`]: the untyped [`Value`] tree and its coercion views;
//! - [`jsum_core`]: the [`Jsum`] trait, type descriptors, field policies,
//!   transformers and the per-session [`Registry`];
//! - [`jsum_decode`]: the engine, its [`DecodeSession`] options and errors.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use jsum_core;
pub use jsum_decode;
pub use jsum_value;

pub use jsum_core::*;
pub use jsum_decode::*;
pub use jsum_value::*;

/// The names most decoding code needs.
pub mod prelude {
    pub use crate::{
        DecodeSession, FieldPolicy, Jsum, Property, Transform, Transformer, Value, decode,
        decode_with, impl_jsum_class, impl_jsum_struct, value,
    };
}
