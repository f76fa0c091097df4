//! The jsum decode engine.
//!
//! Decoding turns an untyped [`Value`] into any type implementing [`Jsum`],
//! coercing aggressively where the value's shape does not match:
//!
//! - primitives convert between each other (`"12"` decodes as `12`, `0` as
//!   `false`, anything as a string);
//! - optionals collapse null and empty-like values to `None`;
//! - struct and class fields can be relocated with key paths, rewritten by
//!   transformers, and filled from defaults when missing or null;
//! - tuples decode from arrays positionally or from objects by label.
//!
//! How lenient the engine is about missing keys and nulls is controlled by a
//! [`DecodeSession`]; [`decode`] uses the default, lenient session.
//!
//! ```
//! use jsum_core::{FieldPolicy, impl_jsum_struct};
//! use jsum_decode::decode;
//! use jsum_value::value;
//!
//! #[derive(Debug, PartialEq)]
//! struct Post {
//!     title: String,
//!     score: i64,
//! }
//!
//! impl_jsum_struct!(Post { title: String, score: i64 },
//!     policy = FieldPolicy::new().key_path("score", "details.score"));
//!
//! let post: Post = decode(&value!({"title": 7, "details": {"score": "-25034"}})).unwrap();
//! assert_eq!(post, Post { title: "7".into(), score: -25034 });
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[macro_use]
mod tracing_macros;

mod engine;

mod error;
pub use error::{DecodeError, DecodeErrorKind, HookPanicked, PathSegment, Result};

mod session;
pub use session::{DataDecoding, DateDecoding, DecodeSession, KeyDecoding};

mod typed;
pub use typed::Transform;

use std::panic::{AssertUnwindSafe, catch_unwind};

use jsum_core::{Instance, Jsum, Kind, TypeDescriptor};
use jsum_value::Value;

use engine::Decoder;

/// Decodes `value` as a `T` with the default, lenient session.
pub fn decode<T: Jsum>(value: &Value) -> Result<T> {
    decode_with(value, &DecodeSession::default())
}

/// Decodes `value` as a `T` with the given session.
pub fn decode_with<T: Jsum>(value: &Value, session: &DecodeSession) -> Result<T> {
    let descriptor = T::descriptor();
    decode_instance(descriptor, value, session)
        .and_then(|instance| T::build(instance).map_err(DecodeError::from))
        .map_err(|e| e.with_target(descriptor.type_identifier))
}

/// Decodes a tuple `T` whose elements carry the given labels.
///
/// With labels, an object source is read by label instead of by position
/// (unlabeled tuples use `"0"`, `"1"`, ...). There must be exactly one label
/// per element. For anything but a tuple the labels are ignored.
///
/// ```
/// use jsum_decode::{DecodeSession, decode_labeled};
/// use jsum_value::value;
///
/// let v = value!({"x": "1", "y": 2.5});
/// let (x, y): (i32, f64) = decode_labeled(&v, &["x", "y"], &DecodeSession::new()).unwrap();
/// assert_eq!((x, y), (1, 2.5));
/// ```
pub fn decode_labeled<T: Jsum>(
    value: &Value,
    labels: &[&'static str],
    session: &DecodeSession,
) -> Result<T> {
    let base = T::descriptor();
    if let Kind::Tuple(def) = &base.kind {
        if def.elements.len() != labels.len() {
            return Err(DecodeError::new(DecodeErrorKind::ArityMismatch {
                expected: def.elements.len(),
                got: labels.len(),
            })
            .with_target(base.type_identifier));
        }
    }
    let descriptor = base.with_labels(labels);
    let descriptor = descriptor.as_ref().unwrap_or(base);
    decode_instance(descriptor, value, session)
        .and_then(|instance| T::build(instance).map_err(DecodeError::from))
        .map_err(|e| e.with_target(base.type_identifier))
}

/// Like [`decode_with`], but a panic raised by a user hook or transformer
/// is caught and reported as [`HookPanicked`] instead of unwinding.
pub fn try_decode<T: Jsum>(value: &Value, session: &DecodeSession) -> Result<T> {
    match catch_unwind(AssertUnwindSafe(|| decode_with::<T>(value, session))) {
        Ok(result) => result,
        Err(payload) => {
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_owned()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic payload>".to_owned()
            };
            debug!("decode of {} panicked: {}", T::descriptor().type_identifier, message);
            Err(
                DecodeError::new(DecodeErrorKind::Other(Box::new(HookPanicked { message })))
                    .with_target(T::descriptor().type_identifier),
            )
        }
    }
}

/// Decodes `value` against a descriptor, without building a concrete type.
pub fn decode_instance(
    descriptor: &TypeDescriptor,
    value: &Value,
    session: &DecodeSession,
) -> Result<Instance> {
    Decoder::new(session).decode(descriptor, value)
}

/// Builds a default instance of `descriptor` from nothing.
///
/// Struct and class fields take their explicit default, `None` if optional,
/// or their type's own default; nested nominal types and tuples are
/// synthesized in turn. Strictness flags do not apply.
pub fn synthesize_instance(descriptor: &TypeDescriptor, session: &DecodeSession) -> Result<Instance> {
    Decoder::new(session).synthesize(descriptor)
}

/// Builds a default `T` with the default session.
///
/// ```
/// use jsum_decode::synthesize;
///
/// let (s, n, flag): (String, i64, Option<bool>) = synthesize().unwrap();
/// assert_eq!((s.as_str(), n, flag), ("", 0, None));
/// ```
pub fn synthesize<T: Jsum>() -> Result<T> {
    synthesize_with(&DecodeSession::default())
}

/// Builds a default `T` with the given session's registry overrides.
pub fn synthesize_with<T: Jsum>(session: &DecodeSession) -> Result<T> {
    let descriptor = T::descriptor();
    synthesize_instance(descriptor, session)
        .and_then(|instance| T::build(instance).map_err(DecodeError::from))
        .map_err(|e| e.with_target(descriptor.type_identifier))
}

/// The untyped form of `T`'s default value.
pub fn default_json<T: Jsum>() -> Result<Value> {
    synthesize::<T>().map(|t| t.to_value())
}
