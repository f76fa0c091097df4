use alloc::sync::Arc;
use core::fmt;

use jsum_value::Value;

use crate::{camel_case_to_snake_case, snake_case_to_camel_case};

/// Errors surfaced by transformers and hooks.
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

type Transformation = dyn Fn(Option<&Value>) -> Result<Value, BoxError> + Send + Sync;

/// A fallible conversion applied to a field's source value before it is
/// decoded.
///
/// The input is `None` when the source value is null or absent.
#[derive(Clone)]
pub struct Transformer {
    forward: Arc<Transformation>,
    reverse: Option<Arc<Transformation>>,
}

impl Transformer {
    /// Creates a one-way transformer.
    pub fn new<F>(forward: F) -> Self
    where
        F: Fn(Option<&Value>) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        Self {
            forward: Arc::new(forward),
            reverse: None,
        }
    }

    /// Adds the inverse conversion, making the transformer reversible.
    pub fn with_reverse<F>(mut self, reverse: F) -> Self
    where
        F: Fn(Option<&Value>) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.reverse = Some(Arc::new(reverse));
        self
    }

    /// Applies the forward conversion.
    pub fn transform(&self, value: Option<&Value>) -> Result<Value, BoxError> {
        (self.forward)(value)
    }

    /// Applies the reverse conversion.
    pub fn reverse(&self, value: Option<&Value>) -> Result<Value, BoxError> {
        match &self.reverse {
            Some(reverse) => reverse(value),
            None => Err(TransformError::NotReversible.into()),
        }
    }

    /// Returns true if [`Transformer::reversed`] would succeed.
    pub fn is_reversible(&self) -> bool {
        self.reverse.is_some()
    }

    /// Swaps the two directions. One-way transformers cannot be reversed.
    pub fn reversed(&self) -> Option<Transformer> {
        let reverse = self.reverse.clone()?;
        Some(Transformer {
            forward: reverse,
            reverse: Some(self.forward.clone()),
        })
    }

    /// Rewrites a string from `snake_case` to `camelCase`, and back.
    pub fn snake_case_to_camel_case() -> Self {
        Transformer::new(|v| map_text(v, snake_case_to_camel_case))
            .with_reverse(|v| map_text(v, camel_case_to_snake_case))
    }

    /// Rewrites a string from `camelCase` to `snake_case`, and back.
    pub fn camel_case_to_snake_case() -> Self {
        Transformer::new(|v| map_text(v, camel_case_to_snake_case))
            .with_reverse(|v| map_text(v, snake_case_to_camel_case))
    }
}

fn map_text(value: Option<&Value>, f: fn(&str) -> String) -> Result<Value, BoxError> {
    match value {
        Some(Value::String(s)) => Ok(Value::String(f(s))),
        Some(v) if !v.is_null() => Ok(Value::String(f(&v.to_text()))),
        _ => Err(TransformError::NotConvertible.into()),
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("reversible", &self.is_reversible())
            .finish_non_exhaustive()
    }
}

/// Failures of the built-in transformers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformError {
    /// The input cannot be converted
    NotConvertible,
    /// The transformer has no reverse direction
    NotReversible,
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::NotConvertible => write!(f, "value is not convertible"),
            TransformError::NotReversible => write!(f, "cannot reverse a one-way transformer"),
        }
    }
}

impl core::error::Error for TransformError {}
