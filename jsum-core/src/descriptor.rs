use core::any::TypeId;
use core::fmt;

use jsum_value::Value;

use crate::{BoxError, FieldPolicy, Instance};

/// Lazily resolves a descriptor.
///
/// The layer of indirection allows for cyclic type definitions.
pub type DescriptorRef = fn() -> &'static TypeDescriptor;

/// Decodes a value through a type's own canonical form instead of the generic
/// field-by-field path. Used for enums and for codable fallbacks.
pub type DecodeHook = fn(&Value) -> Result<Instance, BoxError>;

/// Labels for unlabelled tuple elements.
pub const INDEX_LABELS: [&str; 12] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11",
];

/// Static description of a target type's shape.
///
/// Built once per type by [`Jsum::describe`](crate::Jsum::describe), cached
/// for the life of the process and never mutated afterwards.
pub struct TypeDescriptor {
    /// Human-readable name of the type, used in errors and traces
    pub type_identifier: &'static str,

    /// Identity of the described type
    pub type_id: TypeId,

    /// What sort of type this is
    pub kind: Kind,

    /// The type's own default, used when a field of this type is missing or null
    pub fallback: Fallback,

    /// Key paths, transformers and defaults for the fields of a nominal type
    pub policy: FieldPolicy,

    /// Conversion through the type's canonical form, tried when the source
    /// value has the wrong shape for field-by-field decoding
    pub codable: Option<DecodeHook>,
}

impl TypeDescriptor {
    /// Starts describing `T` as a `kind`.
    pub fn builder<T: 'static>(kind: Kind) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            descriptor: TypeDescriptor {
                type_identifier: core::any::type_name::<T>(),
                type_id: TypeId::of::<T>(),
                kind,
                fallback: Fallback::None,
                policy: FieldPolicy::new(),
                codable: None,
            },
        }
    }

    /// Returns true for `Optional` descriptors.
    #[inline]
    pub fn is_optional(&self) -> bool {
        matches!(self.kind, Kind::Optional(_))
    }

    /// Returns true for struct and class descriptors.
    #[inline]
    pub fn is_nominal(&self) -> bool {
        matches!(self.kind, Kind::Struct(_) | Kind::Class(_))
    }

    /// Returns the consolidated field list of a nominal type.
    ///
    /// For classes, the class's own fields come first, then each ancestor's
    /// in turn. A field whose name was already seen is skipped, so derived
    /// fields shadow base fields. Non-nominal kinds have no fields.
    pub fn fields(&self) -> Vec<Field> {
        match &self.kind {
            Kind::Struct(def) => def.fields.clone(),
            Kind::Class(def) => {
                let mut fields: Vec<Field> = Vec::new();
                let mut next = Some(def);
                while let Some(class) = next {
                    for field in &class.fields {
                        if !fields.iter().any(|f| f.name == field.name) {
                            fields.push(*field);
                        }
                    }
                    next = class.superclass.and_then(|sup| match &sup().kind {
                        Kind::Class(def) => Some(def),
                        _ => None,
                    });
                }
                fields
            }
            _ => Vec::new(),
        }
    }

    /// Returns the field policy of this type, with a class's policy merged
    /// over those of its ancestors.
    pub fn field_policy(&self) -> FieldPolicy {
        let mut policy = self.policy.clone();
        let mut next = match &self.kind {
            Kind::Class(def) => def.superclass,
            _ => None,
        };
        while let Some(sup) = next {
            let sup = sup();
            policy = policy.merged_over(&sup.policy);
            next = match &sup.kind {
                Kind::Class(def) => def.superclass,
                _ => None,
            };
        }
        policy
    }

    /// Returns a copy of this tuple descriptor whose elements carry `labels`.
    ///
    /// Returns `None` if this is not a tuple or the label count differs from
    /// the element count.
    pub fn with_labels(&self, labels: &[&'static str]) -> Option<TypeDescriptor> {
        let Kind::Tuple(def) = &self.kind else {
            return None;
        };
        if def.elements.len() != labels.len() {
            return None;
        }
        let elements = def
            .elements
            .iter()
            .zip(labels.iter().copied())
            .map(|(element, label)| TupleElement::new(label, element.descriptor))
            .collect();
        Some(TypeDescriptor {
            type_identifier: self.type_identifier,
            type_id: self.type_id,
            kind: Kind::Tuple(TupleDef::new(elements)),
            fallback: self.fallback,
            policy: self.policy.clone(),
            codable: self.codable,
        })
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_identifier", &self.type_identifier)
            .field("kind", &self.kind.name())
            .field("fallback", &self.fallback)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_identifier)
    }
}

/// Builder for [`TypeDescriptor`].
pub struct TypeDescriptorBuilder {
    descriptor: TypeDescriptor,
}

impl TypeDescriptorBuilder {
    /// Overrides the type identifier (defaults to `core::any::type_name`).
    pub fn type_identifier(mut self, type_identifier: &'static str) -> Self {
        self.descriptor.type_identifier = type_identifier;
        self
    }

    /// Sets the type's own default.
    pub fn fallback(mut self, fallback: Fallback) -> Self {
        self.descriptor.fallback = fallback;
        self
    }

    /// Sets the field policy.
    pub fn policy(mut self, policy: FieldPolicy) -> Self {
        self.descriptor.policy = policy;
        self
    }

    /// Sets the codable conversion hook.
    pub fn codable(mut self, hook: DecodeHook) -> Self {
        self.descriptor.codable = Some(hook);
        self
    }

    /// Finishes the descriptor.
    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}

/// The kind of a described type.
#[derive(Debug, Clone)]
pub enum Kind {
    /// A scalar with a fixed coercion
    Primitive(Primitive),
    /// A record with named fields
    Struct(StructDef),
    /// A record with named fields and an optional base class
    Class(ClassDef),
    /// A tagged union, decoded only through a hook
    Enum(EnumDef),
    /// Zero or one value of the wrapped type
    Optional(DescriptorRef),
    /// A fixed-arity, heterogeneous sequence
    Tuple(TupleDef),
    /// A homogeneous sequence
    Array(DescriptorRef),
    /// A string-keyed map with homogeneous values
    Map(DescriptorRef),
    /// A well-known nominal shape with its own decoding strategy
    Special(Special),
    /// Anything the engine cannot decode
    Opaque,
}

impl Kind {
    /// A short name for this kind, for errors and traces.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Primitive(p) => p.name(),
            Kind::Struct(_) => "struct",
            Kind::Class(_) => "class",
            Kind::Enum(_) => "enum",
            Kind::Optional(_) => "optional",
            Kind::Tuple(_) => "tuple",
            Kind::Array(_) => "array",
            Kind::Map(_) => "map",
            Kind::Special(Special::Date) => "date",
            Kind::Special(Special::Bytes) => "bytes",
            Kind::Special(Special::Value) => "value",
            Kind::Opaque => "opaque",
        }
    }
}

/// Scalar target types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Primitive {
    Bool,
    String,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

impl Primitive {
    /// The built-in numeric set, decoded by numeric cast.
    pub fn is_builtin(self) -> bool {
        !matches!(self, Primitive::Bool | Primitive::String)
    }

    /// True for `F32` and `F64`.
    pub fn is_float(self) -> bool {
        matches!(self, Primitive::F32 | Primitive::F64)
    }

    /// Lower-case name of the primitive.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::String => "string",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
        }
    }
}

/// Well-known nominal shapes that bypass field-by-field decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Special {
    /// A timestamp, decoded per the session's date strategy
    Date,
    /// A byte buffer, decoded per the session's data strategy
    Bytes,
    /// The untyped value itself; accepts anything, including null
    Value,
}

/// Describes a field in a struct or class.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    /// Name of the field, also its default source key
    pub name: &'static str,

    /// Descriptor of the field's type
    pub descriptor: DescriptorRef,
}

impl Field {
    /// Creates a field.
    pub const fn new(name: &'static str, descriptor: DescriptorRef) -> Self {
        Self { name, descriptor }
    }

    /// Resolves the field's descriptor.
    #[inline]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        (self.descriptor)()
    }
}

/// Fields of a struct, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct StructDef {
    /// The declared fields
    pub fields: Vec<Field>,
}

impl StructDef {
    /// Creates a struct definition.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }
}

/// Own fields of a class plus a link to its base class.
#[derive(Clone, Debug, Default)]
pub struct ClassDef {
    /// Fields declared by the class itself
    pub fields: Vec<Field>,

    /// The base class, if any
    pub superclass: Option<DescriptorRef>,
}

impl ClassDef {
    /// Creates a class definition with no base class.
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            superclass: None,
        }
    }

    /// Sets the base class.
    pub fn extends(mut self, superclass: DescriptorRef) -> Self {
        self.superclass = Some(superclass);
        self
    }
}

/// Variants of an enum and the hook that decodes it.
#[derive(Clone, Debug, Default)]
pub struct EnumDef {
    /// Variant names, in declaration order
    pub variants: Vec<&'static str>,

    /// Decodes the enum from a value; without it, enums cannot be decoded
    pub decode: Option<DecodeHook>,
}

impl EnumDef {
    /// Creates an enum definition without a decode hook.
    pub fn new(variants: Vec<&'static str>) -> Self {
        Self {
            variants,
            decode: None,
        }
    }

    /// Sets the decode hook.
    pub fn decode_with(mut self, hook: DecodeHook) -> Self {
        self.decode = Some(hook);
        self
    }
}

/// One slot of a tuple.
#[derive(Clone, Copy, Debug)]
pub struct TupleElement {
    /// Key used when decoding the tuple from an object
    pub label: &'static str,

    /// Descriptor of the element type
    pub descriptor: DescriptorRef,
}

impl TupleElement {
    /// Creates a tuple element.
    pub const fn new(label: &'static str, descriptor: DescriptorRef) -> Self {
        Self { label, descriptor }
    }

    /// Resolves the element's descriptor.
    #[inline]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        (self.descriptor)()
    }
}

/// Elements of a tuple, in positional order.
#[derive(Clone, Debug, Default)]
pub struct TupleDef {
    /// The elements
    pub elements: Vec<TupleElement>,
}

impl TupleDef {
    /// Creates a tuple definition.
    pub fn new(elements: Vec<TupleElement>) -> Self {
        Self { elements }
    }
}

/// A type's own default value.
#[derive(Clone, Copy, Debug, Default)]
pub enum Fallback {
    /// The type has no default
    #[default]
    None,
    /// The default is this value, decoded against the type
    Value(fn() -> Value),
    /// The default is synthesized from the defaults of the type's parts
    Synthesized,
}

impl Fallback {
    /// Returns true unless this is [`Fallback::None`].
    pub fn exists(&self) -> bool {
        !matches!(self, Fallback::None)
    }
}
