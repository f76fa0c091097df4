use core::marker::PhantomData;

use jsum_core::{Jsum, Transformer};
use jsum_value::Value;

use crate::{Result, decode, default_json, synthesize};

/// A typed conversion from `T` to `U` that routes through [`Value`].
///
/// The source is encoded with [`Jsum::to_value`] and decoded leniently as a
/// `U`. An absent source stands in as `T`'s default value.
///
/// ```
/// use jsum_decode::Transform;
///
/// let t = Transform::<bool, i64>::new();
/// assert_eq!(t.transform(Some(&true)).unwrap(), 1);
/// assert_eq!(t.transform(None).unwrap(), 0);
/// ```
pub struct Transform<T, U> {
    _marker: PhantomData<fn(T) -> U>,
}

impl<T: Jsum, U: Jsum> Transform<T, U> {
    /// Creates the transform.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Converts a `T` (or, when absent, `T`'s default) into a `U`.
    pub fn transform(&self, source: Option<&T>) -> Result<U> {
        route::<T, U>(source.map(T::to_value))
    }

    /// Converts a `U` (or, when absent, `U`'s default) back into a `T`.
    pub fn reverse(&self, source: Option<&U>) -> Result<T> {
        route::<U, T>(source.map(U::to_value))
    }

    /// An untyped transformer that reads its input as a `T` and outputs the
    /// `U` it converts to, suitable for a field policy.
    pub fn transformer(&self) -> Transformer {
        Transformer::new(|input| {
            let source = input.map(decode::<T>).transpose()?;
            let out: U = route::<T, U>(source.as_ref().map(T::to_value))?;
            Ok(out.to_value())
        })
        .with_reverse(|input| {
            let source = input.map(decode::<U>).transpose()?;
            let out: T = route::<U, T>(source.as_ref().map(U::to_value))?;
            Ok(out.to_value())
        })
    }
}

impl<T: Jsum, U: Jsum> Default for Transform<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

fn route<T: Jsum, U: Jsum>(source: Option<Value>) -> Result<U> {
    let source = match source {
        Some(value) => value,
        None => default_json::<T>()?,
    };
    // a null source has nothing to coerce; non-optional targets get their default
    if source.is_null() && !U::descriptor().is_optional() {
        return synthesize::<U>();
    }
    decode::<U>(&source)
}
