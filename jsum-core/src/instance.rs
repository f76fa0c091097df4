use core::fmt;

use indexmap::IndexMap;
use jsum_value::Value;
use time::OffsetDateTime;

use crate::Jsum;

/// A fully decoded value, shaped after its target descriptor and ready to be
/// turned into a concrete type by [`Jsum::build`].
#[derive(Debug, Clone, PartialEq)]
pub enum Instance {
    /// A boolean
    Bool(bool),
    /// A signed integer, already truncated to the target width
    Int(i64),
    /// An unsigned integer, already truncated to the target width
    UInt(u64),
    /// A float, already narrowed to the target width
    Float(f64),
    /// A string
    String(String),
    /// A byte buffer
    Bytes(Vec<u8>),
    /// A timestamp
    Date(OffsetDateTime),
    /// An untyped value passed through as-is
    Value(Value),
    /// An optional: `None`, or the decoded inner value
    Option(Option<Box<Instance>>),
    /// Tuple slots, in positional order
    Tuple(Vec<Instance>),
    /// Array elements
    Array(Vec<Instance>),
    /// Map entries, in source order
    Map(IndexMap<String, Instance>),
    /// The fields of a struct or class
    Struct(FieldMap),
    /// An enum variant and its payload
    Variant {
        /// Variant name
        name: String,
        /// Decoded payload, if the variant carries one
        payload: Option<Box<Instance>>,
    },
}

impl Instance {
    /// The instance that represents an absent optional.
    pub const NONE: Instance = Instance::Option(None);

    /// Wraps `inner` as a present optional.
    pub fn some(inner: Instance) -> Instance {
        Instance::Option(Some(Box::new(inner)))
    }

    /// Emptiness predicate used to collapse optionals: an empty string, an
    /// empty array or map, or a numeric zero.
    pub fn is_empty_like(&self) -> bool {
        match self {
            Instance::String(s) => s.is_empty(),
            Instance::Array(items) => items.is_empty(),
            Instance::Map(entries) => entries.is_empty(),
            Instance::Int(i) => *i == 0,
            Instance::UInt(u) => *u == 0,
            Instance::Float(f) => *f == 0.0,
            _ => false,
        }
    }

    /// Short name of the variant, for errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Instance::Bool(_) => "bool",
            Instance::Int(_) => "int",
            Instance::UInt(_) => "uint",
            Instance::Float(_) => "float",
            Instance::String(_) => "string",
            Instance::Bytes(_) => "bytes",
            Instance::Date(_) => "date",
            Instance::Value(_) => "value",
            Instance::Option(_) => "option",
            Instance::Tuple(_) => "tuple",
            Instance::Array(_) => "array",
            Instance::Map(_) => "map",
            Instance::Struct(_) => "struct",
            Instance::Variant { .. } => "variant",
        }
    }

    /// Unwraps the fields of a struct instance.
    pub fn into_fields(self, type_identifier: &'static str) -> Result<FieldMap, BuildError> {
        match self {
            Instance::Struct(fields) => Ok(fields),
            other => Err(BuildError::mismatch(type_identifier, &other)),
        }
    }
}

/// Decoded fields of a struct or class, keyed by field name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMap {
    type_identifier: &'static str,
    fields: IndexMap<&'static str, Instance>,
}

impl FieldMap {
    /// Creates an empty field map for the named type.
    pub fn new(type_identifier: &'static str) -> Self {
        Self {
            type_identifier,
            fields: IndexMap::new(),
        }
    }

    /// The type these fields belong to.
    pub fn type_identifier(&self) -> &'static str {
        self.type_identifier
    }

    /// Stores a decoded field.
    pub fn insert(&mut self, name: &'static str, instance: Instance) {
        self.fields.insert(name, instance);
    }

    /// Looks up a decoded field.
    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.fields.get(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields in decode order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Instance)> {
        self.fields.iter().map(|(name, instance)| (*name, instance))
    }

    /// Removes the field `name` and builds it as a `T`.
    pub fn take<T: Jsum>(&mut self, name: &'static str) -> Result<T, BuildError> {
        let instance = self
            .fields
            .shift_remove(name)
            .ok_or(BuildError::MissingField {
                type_identifier: self.type_identifier,
                field: name,
            })?;
        T::build(instance).map_err(|e| e.at_field(name))
    }
}

/// The instance handed to [`Jsum::build`] does not fit the type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The instance has the wrong shape
    Mismatch {
        /// What the type can be built from
        expected: &'static str,
        /// What it was given
        got: &'static str,
    },
    /// A declared field was not decoded
    MissingField {
        /// The type being built
        type_identifier: &'static str,
        /// The missing field
        field: &'static str,
    },
    /// A tuple instance has the wrong number of slots
    Arity {
        /// Slots the tuple type declares
        expected: usize,
        /// Slots the instance holds
        got: usize,
    },
    /// An enum variant the type does not know
    UnknownVariant {
        /// The variant name
        name: String,
    },
    /// A failure inside a field, element or variant
    Nested {
        /// Where the failure happened, like `.score` or `[2]`
        at: String,
        /// The failure
        source: Box<BuildError>,
    },
}

impl BuildError {
    /// Reports that `got` cannot build an `expected`.
    pub fn mismatch(expected: &'static str, got: &Instance) -> Self {
        BuildError::Mismatch {
            expected,
            got: got.kind_name(),
        }
    }

    /// Scopes this error to field `name`.
    pub fn at_field(self, name: &str) -> Self {
        BuildError::Nested {
            at: format!(".{name}"),
            source: Box::new(self),
        }
    }

    /// Scopes this error to element `index`.
    pub fn at_index(self, index: usize) -> Self {
        BuildError::Nested {
            at: format!("[{index}]"),
            source: Box::new(self),
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Mismatch { expected, got } => {
                write!(f, "cannot build {expected} from {got}")
            }
            BuildError::MissingField {
                type_identifier,
                field,
            } => write!(f, "`{type_identifier}` has no decoded field `{field}`"),
            BuildError::Arity { expected, got } => {
                write!(f, "expected a tuple of {expected}, got {got} slots")
            }
            BuildError::UnknownVariant { name } => write!(f, "unknown variant `{name}`"),
            BuildError::Nested { at, source } => {
                // flatten nested scopes into one path
                let mut path = at.clone();
                let mut inner = source.as_ref();
                while let BuildError::Nested { at, source } = inner {
                    path.push_str(at);
                    inner = source.as_ref();
                }
                write!(f, "at {path}: {inner}")
            }
        }
    }
}

impl core::error::Error for BuildError {}
