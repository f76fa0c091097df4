use core::fmt;

use jsum_core::{BoxError, BuildError, KeyPathError};
use jsum_value::ValueType;

/// A segment in a decode path
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A field of a struct or class, or a label of a tuple
    Field(String),
    /// An index in an array or tuple
    Index(usize),
    /// A key in a map
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{name}"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
            PathSegment::Key(key) => write!(f, "[{key:?}]"),
        }
    }
}

/// Error type for decoding.
#[derive(Debug)]
pub struct DecodeError {
    /// The specific kind of error
    pub kind: DecodeErrorKind,
    /// Where in the target the error occurred, outermost first
    pub path: Vec<PathSegment>,
    /// The top-level type being decoded
    pub target: Option<&'static str>,
}

impl DecodeError {
    /// Create a new DecodeError with an empty path
    pub fn new(kind: DecodeErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
            target: None,
        }
    }

    /// Add a path segment (prepends since we unwind from the error site)
    pub fn with_path(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// Record the top-level target type, unless one is already recorded
    pub fn with_target(mut self, target: &'static str) -> Self {
        self.target.get_or_insert(target);
        self
    }

    /// Format the path as a string
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            "<root>".into()
        } else {
            use core::fmt::Write;
            let mut s = String::new();
            for seg in &self.path {
                let _ = write!(s, "{seg}");
            }
            s
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "at {}: {}", self.path_string(), self.kind)
        }
    }
}

impl core::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.kind {
            DecodeErrorKind::InvalidKeyPath(e) => Some(e),
            DecodeErrorKind::Other(e) => Some(&**e),
            DecodeErrorKind::Build(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BuildError> for DecodeError {
    fn from(err: BuildError) -> Self {
        DecodeError::new(DecodeErrorKind::Build(err))
    }
}

impl From<KeyPathError> for DecodeError {
    fn from(err: KeyPathError) -> Self {
        DecodeError::new(DecodeErrorKind::InvalidKeyPath(err))
    }
}

/// Specific error kinds for decoding.
#[derive(Debug)]
pub enum DecodeErrorKind {
    /// The value has the wrong shape and no fallback applies
    CouldNotDecode {
        /// What the target type expected
        expected: &'static str,
        /// What the value actually contained
        got: ValueType,
    },
    /// The engine has no way to decode this kind of type
    NotSupported {
        /// The kind of the type
        kind: &'static str,
        /// The type
        type_identifier: &'static str,
    },
    /// A required key is absent and no default applies
    MissingKey {
        /// The source key, or key path, that was looked up
        key: String,
    },
    /// A null was found where null is not allowed and no default applies
    NullOnNonOptional {
        /// The non-optional type
        expected: &'static str,
    },
    /// A key path stepped into something that is not an object
    InvalidKeyPath(KeyPathError),
    /// A tuple source has the wrong number of elements
    ArityMismatch {
        /// Elements the tuple declares
        expected: usize,
        /// Elements the source holds
        got: usize,
    },
    /// A transformer, hook, or custom strategy failed
    Other(BoxError),
    /// The decoded instance could not be built into the target type
    Build(BuildError),
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::CouldNotDecode { expected, got } => {
                write!(f, "could not decode {expected} from {got}")
            }
            DecodeErrorKind::NotSupported {
                kind,
                type_identifier,
            } => write!(f, "decoding {kind} `{type_identifier}` is not supported"),
            DecodeErrorKind::MissingKey { key } => write!(f, "missing key `{key}`"),
            DecodeErrorKind::NullOnNonOptional { expected } => {
                write!(f, "null found for non-optional {expected}")
            }
            DecodeErrorKind::InvalidKeyPath(e) => write!(f, "{e}"),
            DecodeErrorKind::ArityMismatch { expected, got } => {
                write!(f, "expected {expected} elements, got {got}")
            }
            DecodeErrorKind::Other(e) => write!(f, "{e}"),
            DecodeErrorKind::Build(e) => write!(f, "build failed: {e}"),
        }
    }
}

/// A hook panicked inside [`try_decode`](crate::try_decode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookPanicked {
    /// The panic message, if it was a string
    pub message: String,
}

impl fmt::Display for HookPanicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hook panicked: {}", self.message)
    }
}

impl core::error::Error for HookPanicked {}

/// Result type for decoding.
pub type Result<T> = core::result::Result<T, DecodeError>;
