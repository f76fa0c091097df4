//! Per-field decoding policy: where a field's data lives, how it is transformed,
//! and what it defaults to.

use core::fmt;

use indexmap::IndexMap;
use jsum_value::{Value, ValueType};

use crate::Transformer;

/// Key paths, transformers and explicit defaults for the fields of one type.
///
/// Each map is keyed by field name. A field absent from a map is read from
/// the source key of the same name, is not transformed, and has no explicit
/// default.
#[derive(Clone, Default)]
pub struct FieldPolicy {
    key_paths: IndexMap<String, KeyPath>,
    transformers: IndexMap<String, Transformer>,
    defaults: IndexMap<String, Value>,
}

impl FieldPolicy {
    /// Creates an empty policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `field` from the dotted `path` instead of its own name.
    pub fn key_path(mut self, field: impl Into<String>, path: impl Into<KeyPath>) -> Self {
        self.key_paths.insert(field.into(), path.into());
        self
    }

    /// Passes the source value of `field` through `transformer` before decoding.
    pub fn transform(mut self, field: impl Into<String>, transformer: Transformer) -> Self {
        self.transformers.insert(field.into(), transformer);
        self
    }

    /// Uses `value` when `field` is missing, or null where null is not allowed.
    pub fn default_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(field.into(), value.into());
        self
    }

    /// Adds everything `property` declares.
    pub fn property(mut self, property: Property) -> Self {
        let Property {
            name,
            key_path,
            transformer,
            default,
        } = property;
        if let Some(path) = key_path {
            self.key_paths.insert(name.clone(), path);
        }
        if let Some(transformer) = transformer {
            self.transformers.insert(name.clone(), transformer);
        }
        if let Some(default) = default {
            self.defaults.insert(name, default);
        }
        self
    }

    /// The key path configured for `field`.
    pub fn key_path_for(&self, field: &str) -> Option<&KeyPath> {
        self.key_paths.get(field)
    }

    /// The transformer configured for `field`.
    pub fn transformer_for(&self, field: &str) -> Option<&Transformer> {
        self.transformers.get(field)
    }

    /// The explicit default configured for `field`.
    pub fn default_for(&self, field: &str) -> Option<&Value> {
        self.defaults.get(field)
    }

    /// True if nothing is configured.
    pub fn is_empty(&self) -> bool {
        self.key_paths.is_empty() && self.transformers.is_empty() && self.defaults.is_empty()
    }

    /// Fills in entries from `base` for fields this policy does not mention.
    pub fn merged_over(mut self, base: &FieldPolicy) -> Self {
        for (field, path) in &base.key_paths {
            self.key_paths
                .entry(field.clone())
                .or_insert_with(|| path.clone());
        }
        for (field, transformer) in &base.transformers {
            self.transformers
                .entry(field.clone())
                .or_insert_with(|| transformer.clone());
        }
        for (field, value) in &base.defaults {
            self.defaults
                .entry(field.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }
}

impl fmt::Debug for FieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPolicy")
            .field("key_paths", &self.key_paths)
            .field("transformers", &self.transformers.keys().collect::<Vec<_>>())
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl FromIterator<Property> for FieldPolicy {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        iter.into_iter().fold(FieldPolicy::new(), FieldPolicy::property)
    }
}

/// Declarative description of one field's coding.
///
/// ```
/// use jsum_core::{FieldPolicy, Property, Transformer};
///
/// let policy: FieldPolicy = [
///     Property::new("score").keyed_as("details.score"),
///     Property::new("title").transform(Transformer::snake_case_to_camel_case()),
///     Property::new("views").default_value(0),
/// ]
/// .into_iter()
/// .collect();
/// assert_eq!(policy.key_path_for("score").map(|p| p.as_str()), Some("details.score"));
/// ```
#[derive(Clone, Debug)]
pub struct Property {
    name: String,
    key_path: Option<KeyPath>,
    transformer: Option<Transformer>,
    default: Option<Value>,
}

impl Property {
    /// Starts describing the field called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_path: None,
            transformer: None,
            default: None,
        }
    }

    /// Reads the field from `path` in the source.
    pub fn keyed_as(mut self, path: impl Into<KeyPath>) -> Self {
        self.key_path = Some(path.into());
        self
    }

    /// Transforms the source value before decoding.
    pub fn transform(mut self, transformer: Transformer) -> Self {
        self.transformer = Some(transformer);
        self
    }

    /// Defaults the field to `value`.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A dotted address into nested objects, such as `details.score`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyPath {
    text: String,
}

impl KeyPath {
    /// Parses a dotted path. Every dot separates two segments.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The path as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The segments of the path, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.text.split('.')
    }

    /// Walks the path through `root`.
    ///
    /// A missing key, or a null anywhere along the way, is a miss and yields
    /// `Ok(None)`. Stepping into anything else that is not an object is an
    /// error.
    pub fn resolve<'v>(&self, root: &'v Value) -> Result<Option<&'v Value>, KeyPathError> {
        let mut current = root;
        for segment in self.segments() {
            current = match current {
                Value::Object(map) => match map.get(segment) {
                    Some(next) => next,
                    None => return Ok(None),
                },
                Value::Null => return Ok(None),
                other => {
                    return Err(KeyPathError {
                        path: self.text.clone(),
                        segment: segment.to_owned(),
                        found: other.value_type(),
                    });
                }
            };
        }
        Ok(Some(current))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for KeyPath {
    fn from(text: &str) -> Self {
        KeyPath::new(text)
    }
}

impl From<String> for KeyPath {
    fn from(text: String) -> Self {
        KeyPath::new(text)
    }
}

/// A key path stepped into a value that is neither an object nor null.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPathError {
    /// The full path
    pub path: String,
    /// The segment that could not be looked up
    pub segment: String,
    /// What was found where an object was expected
    pub found: ValueType,
}

impl fmt::Display for KeyPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key path `{}`: expected an object at `{}`, found {}",
            self.path, self.segment, self.found
        )
    }
}

impl core::error::Error for KeyPathError {}
