//! The recursive decode engine.
//!
//! [`Decoder::decode`] walks a [`TypeDescriptor`] against a [`Value`]:
//!
//! 1. a null is rejected unless the target accepts null;
//! 2. primitives whose value already has the target's runtime shape pass
//!    through unchanged;
//! 3. everything else dispatches on the descriptor's [`Kind`].
//!
//! Nominal types are decoded field by field. Each field's source value is
//! located by key path or (cased) name, transformed, and decoded recursively;
//! missing and null fields go through the default lookup shared with
//! synthesis.

use indexmap::IndexMap;
use jsum_core::{
    DecodeHook, EnumDef, Fallback, Field, FieldMap, FieldPolicy, Instance, Kind, Primitive,
    Special, TupleDef, TypeDescriptor,
};
use jsum_value::{Map, Value, date_from_epoch_millis, date_from_epoch_seconds, date_from_iso8601};

use crate::{
    DataDecoding, DateDecoding, DecodeError, DecodeErrorKind, DecodeSession, KeyDecoding,
    PathSegment, Result,
};

/// Walks descriptors against values under one session.
pub(crate) struct Decoder<'s> {
    session: &'s DecodeSession,
}

impl<'s> Decoder<'s> {
    pub(crate) fn new(session: &'s DecodeSession) -> Self {
        Self { session }
    }

    pub(crate) fn decode(&self, descriptor: &TypeDescriptor, value: &Value) -> Result<Instance> {
        trace!(
            "decode {} ({}) from {}",
            descriptor.type_identifier,
            descriptor.kind.name(),
            value.value_type()
        );

        if value.is_null() && !accepts_null(descriptor) {
            return Err(DecodeError::new(DecodeErrorKind::NullOnNonOptional {
                expected: descriptor.type_identifier,
            }));
        }

        match &descriptor.kind {
            Kind::Primitive(primitive) => decode_primitive(descriptor, *primitive, value),
            Kind::Special(special) => self.decode_special(descriptor, *special, value),
            Kind::Struct(_) | Kind::Class(_) => self.decode_nominal(descriptor, value),
            Kind::Enum(def) => self.decode_enum(descriptor, def, value),
            Kind::Optional(inner) => self.decode_optional(inner(), value),
            Kind::Tuple(def) => self.decode_tuple(descriptor, def, value),
            Kind::Array(element) => self.decode_array(descriptor, element(), value),
            Kind::Map(element) => self.decode_map(descriptor, element(), value),
            Kind::Opaque => Err(not_supported(descriptor)),
        }
    }

    fn decode_special(
        &self,
        descriptor: &TypeDescriptor,
        special: Special,
        value: &Value,
    ) -> Result<Instance> {
        match special {
            Special::Value => Ok(Instance::Value(value.clone())),
            Special::Date => {
                let date = match self.session.date_strategy() {
                    DateDecoding::SecondsSince1970 => {
                        epoch_number(value).and_then(date_from_epoch_seconds)
                    }
                    DateDecoding::MillisecondsSince1970 => {
                        epoch_number(value).and_then(date_from_epoch_millis)
                    }
                    DateDecoding::Iso8601 => value.as_str().and_then(date_from_iso8601),
                    DateDecoding::BestGuess => value
                        .as_str()
                        .and_then(date_from_iso8601)
                        .or_else(|| epoch_number(value).and_then(date_from_epoch_seconds)),
                    DateDecoding::Custom(read) => {
                        return read(value)
                            .map(Instance::Date)
                            .map_err(|e| DecodeError::new(DecodeErrorKind::Other(e)));
                    }
                };
                date.map(Instance::Date)
                    .ok_or_else(|| could_not_decode(descriptor, value))
            }
            Special::Bytes => match self.session.data_strategy() {
                DataDecoding::Base64 => value
                    .to_data()
                    .map(Instance::Bytes)
                    .ok_or_else(|| could_not_decode(descriptor, value)),
                DataDecoding::Custom(read) => read(value)
                    .map(Instance::Bytes)
                    .map_err(|e| DecodeError::new(DecodeErrorKind::Other(e))),
            },
        }
    }

    fn decode_nominal(&self, descriptor: &TypeDescriptor, value: &Value) -> Result<Instance> {
        let Some(object) = value.to_object() else {
            // wrong shape: last resort is the type's codable conversion
            return match self.hook_for(descriptor, descriptor.codable) {
                Some(hook) => {
                    debug!(
                        "decoding {} from {} through its codable hook",
                        descriptor.type_identifier,
                        value.value_type()
                    );
                    run_hook(hook, value)
                }
                None => Err(could_not_decode(descriptor, value)),
            };
        };

        let policy = self.policy_for(descriptor);
        let source = SourceObject::new(&object, self.session.key_strategy());
        let mut fields = FieldMap::new(descriptor.type_identifier);
        for field in descriptor.fields() {
            let instance = self
                .decode_field(&field, &policy, &source, value)
                .map_err(|e| e.with_path(PathSegment::Field(field.name.to_owned())))?;
            fields.insert(field.name, instance);
        }
        Ok(Instance::Struct(fields))
    }

    fn decode_field(
        &self,
        field: &Field,
        policy: &FieldPolicy,
        source: &SourceObject<'_>,
        root: &Value,
    ) -> Result<Instance> {
        let descriptor = field.descriptor();
        let key_path = policy.key_path_for(field.name);

        let found = match key_path {
            Some(path) => path.resolve(root)?,
            None => source.get(field.name),
        };
        let Some(found) = found else {
            let key = key_path.map_or(field.name, |p| p.as_str());
            return self.missing_field(field, descriptor, policy, key, false);
        };

        let transformed;
        let value = match policy.transformer_for(field.name) {
            Some(transformer) => {
                let input = (!found.is_null()).then_some(found);
                transformed = transformer
                    .transform(input)
                    .map_err(|e| DecodeError::new(DecodeErrorKind::Other(e)))?;
                trace!("transformed field {}: {} -> {}", field.name, found, transformed);
                &transformed
            }
            None => found,
        };

        if value.is_null() && !accepts_null(descriptor) {
            return self.null_field(field, descriptor, policy);
        }
        self.decode(descriptor, value)
    }

    /// Default lookup for a field with no source value: explicit default,
    /// then none for optionals, then the field type's own default.
    ///
    /// When missing keys are strict, only nominal types keep their declared
    /// default. Synthesis has no source to be missing from and is never
    /// strict.
    fn missing_field(
        &self,
        field: &Field,
        descriptor: &TypeDescriptor,
        policy: &FieldPolicy,
        key: &str,
        synthesizing: bool,
    ) -> Result<Instance> {
        if let Some(default) = policy.default_for(field.name) {
            debug!("field {} is missing, using its explicit default {}", field.name, default);
            return self.decode(descriptor, default);
        }
        if descriptor.is_optional() {
            return Ok(Instance::NONE);
        }
        if synthesizing || !self.session.fails_on_missing_keys() || declares_fallback(descriptor) {
            if let Some(instance) = self.type_default(descriptor)? {
                debug!(
                    "field {} is missing, using the default of {}",
                    field.name, descriptor.type_identifier
                );
                return Ok(instance);
            }
            if synthesizing && descriptor.is_nominal() {
                return self.synthesize(descriptor);
            }
        }
        Err(DecodeError::new(DecodeErrorKind::MissingKey {
            key: key.to_owned(),
        }))
    }

    /// Default lookup for a null non-optional field: explicit default, then
    /// the field type's own default. Strict nulls keep only the defaults that
    /// a missing key would get.
    fn null_field(
        &self,
        field: &Field,
        descriptor: &TypeDescriptor,
        policy: &FieldPolicy,
    ) -> Result<Instance> {
        if let Some(default) = policy.default_for(field.name) {
            debug!("field {} is null, using its explicit default {}", field.name, default);
            return self.decode(descriptor, default);
        }
        if !self.session.fails_on_null_non_optionals() || declares_fallback(descriptor) {
            if let Some(instance) = self.type_default(descriptor)? {
                debug!(
                    "field {} is null, using the default of {}",
                    field.name, descriptor.type_identifier
                );
                return Ok(instance);
            }
        }
        Err(DecodeError::new(DecodeErrorKind::NullOnNonOptional {
            expected: descriptor.type_identifier,
        }))
    }

    /// The type's own default, if it declares one.
    fn type_default(&self, descriptor: &TypeDescriptor) -> Result<Option<Instance>> {
        match descriptor.fallback {
            Fallback::None => Ok(None),
            Fallback::Value(make) => self.decode(descriptor, &make()).map(Some),
            Fallback::Synthesized => self.synthesize(descriptor).map(Some),
        }
    }

    /// Builds a default instance with no source value.
    pub(crate) fn synthesize(&self, descriptor: &TypeDescriptor) -> Result<Instance> {
        trace!("synthesize {}", descriptor.type_identifier);
        match &descriptor.kind {
            Kind::Struct(_) | Kind::Class(_) => {
                if let Fallback::Value(make) = descriptor.fallback {
                    return self.decode(descriptor, &make());
                }
                let policy = self.policy_for(descriptor);
                let mut fields = FieldMap::new(descriptor.type_identifier);
                for field in descriptor.fields() {
                    let key = policy.key_path_for(field.name).map_or(field.name, |p| p.as_str());
                    let instance = self
                        .missing_field(&field, field.descriptor(), &policy, key, true)
                        .map_err(|e| e.with_path(PathSegment::Field(field.name.to_owned())))?;
                    fields.insert(field.name, instance);
                }
                Ok(Instance::Struct(fields))
            }
            Kind::Tuple(def) => {
                let mut slots = Vec::with_capacity(def.elements.len());
                for (i, element) in def.elements.iter().enumerate() {
                    let element_descriptor = element.descriptor();
                    let slot = match element_descriptor.kind {
                        Kind::Optional(_) => Ok(Instance::NONE),
                        _ => match self.type_default(element_descriptor)? {
                            Some(instance) => Ok(instance),
                            None => self.synthesize(element_descriptor),
                        },
                    };
                    slots.push(slot.map_err(|e| e.with_path(PathSegment::Index(i)))?);
                }
                Ok(Instance::Tuple(slots))
            }
            Kind::Optional(_) => Ok(Instance::NONE),
            _ => match descriptor.fallback {
                Fallback::Value(make) => self.decode(descriptor, &make()),
                _ => Err(DecodeError::new(DecodeErrorKind::MissingKey {
                    key: descriptor.type_identifier.to_owned(),
                })),
            },
        }
    }

    fn decode_enum(
        &self,
        descriptor: &TypeDescriptor,
        def: &EnumDef,
        value: &Value,
    ) -> Result<Instance> {
        match self.hook_for(descriptor, def.decode) {
            Some(hook) => run_hook(hook, value),
            None => Err(not_supported(descriptor)),
        }
    }

    fn decode_optional(&self, inner: &TypeDescriptor, value: &Value) -> Result<Instance> {
        if value.is_null() {
            return Ok(Instance::NONE);
        }
        let decoded = self.decode(inner, value)?;
        if decoded.is_empty_like() {
            trace!("collapsing empty {} to none", decoded.kind_name());
            return Ok(Instance::NONE);
        }
        Ok(Instance::some(decoded))
    }

    fn decode_tuple(
        &self,
        descriptor: &TypeDescriptor,
        def: &TupleDef,
        value: &Value,
    ) -> Result<Instance> {
        match value {
            Value::Array(items) => {
                if items.len() != def.elements.len() {
                    return Err(DecodeError::new(DecodeErrorKind::ArityMismatch {
                        expected: def.elements.len(),
                        got: items.len(),
                    }));
                }
                def.elements
                    .iter()
                    .zip(items)
                    .enumerate()
                    .map(|(i, (element, item))| {
                        self.decode(element.descriptor(), item)
                            .map_err(|e| e.with_path(PathSegment::Index(i)))
                    })
                    .collect::<Result<Vec<_>>>()
                    .map(Instance::Tuple)
            }
            Value::Object(object) => def
                .elements
                .iter()
                .map(|element| {
                    let item = object.get(element.label).ok_or_else(|| {
                        DecodeError::new(DecodeErrorKind::MissingKey {
                            key: element.label.to_owned(),
                        })
                    })?;
                    self.decode(element.descriptor(), item)
                        .map_err(|e| e.with_path(PathSegment::Field(element.label.to_owned())))
                })
                .collect::<Result<Vec<_>>>()
                .map(Instance::Tuple),
            other => Err(could_not_decode(descriptor, other)),
        }
    }

    fn decode_array(
        &self,
        descriptor: &TypeDescriptor,
        element: &TypeDescriptor,
        value: &Value,
    ) -> Result<Instance> {
        let Value::Array(items) = value else {
            return Err(could_not_decode(descriptor, value));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                self.decode(element, item)
                    .map_err(|e| e.with_path(PathSegment::Index(i)))
            })
            .collect::<Result<Vec<_>>>()
            .map(Instance::Array)
    }

    fn decode_map(
        &self,
        descriptor: &TypeDescriptor,
        element: &TypeDescriptor,
        value: &Value,
    ) -> Result<Instance> {
        let Value::Object(object) = value else {
            return Err(could_not_decode(descriptor, value));
        };
        object
            .iter()
            .map(|(key, item)| {
                let instance = self
                    .decode(element, item)
                    .map_err(|e| e.with_path(PathSegment::Key(key.clone())))?;
                Ok((key.clone(), instance))
            })
            .collect::<Result<IndexMap<_, _>>>()
            .map(Instance::Map)
    }

    /// The descriptor's policy, with any registry override layered on top.
    fn policy_for(&self, descriptor: &TypeDescriptor) -> FieldPolicy {
        let own = descriptor.field_policy();
        match self.session.type_registry().policy_for(descriptor.type_id) {
            Some(registered) => registered.clone().merged_over(&own),
            None => own,
        }
    }

    /// A registry hook wins over the one the type declares.
    fn hook_for(&self, descriptor: &TypeDescriptor, own: Option<DecodeHook>) -> Option<DecodeHook> {
        self.session
            .type_registry()
            .hook_for(descriptor.type_id)
            .or(own)
    }
}

/// Structs and classes that declare their own default keep it under strict
/// sessions.
fn declares_fallback(descriptor: &TypeDescriptor) -> bool {
    descriptor.is_nominal() && descriptor.fallback.exists()
}

/// Optionals and the untyped value accept null; nothing else does.
fn accepts_null(descriptor: &TypeDescriptor) -> bool {
    matches!(
        descriptor.kind,
        Kind::Optional(_) | Kind::Special(Special::Value)
    )
}

fn decode_primitive(
    descriptor: &TypeDescriptor,
    primitive: Primitive,
    value: &Value,
) -> Result<Instance> {
    // values already in the target's runtime shape pass through
    match (primitive, value) {
        (Primitive::Bool, Value::Bool(b)) => return Ok(Instance::Bool(*b)),
        (Primitive::String, Value::String(s)) => return Ok(Instance::String(s.clone())),
        (Primitive::I64, Value::Int(i)) => return Ok(Instance::Int(*i)),
        (Primitive::F64, Value::Float(f)) => return Ok(Instance::Float(*f)),
        _ => {}
    }

    match primitive {
        Primitive::Bool => Ok(Instance::Bool(value.to_bool())),
        Primitive::String => Ok(Instance::String(value.to_text())),
        _ if value.is_array() || value.is_object() => Err(could_not_decode(descriptor, value)),
        float if float.is_float() => {
            let f = value
                .to_float()
                .ok_or_else(|| could_not_decode(descriptor, value))?;
            match float {
                Primitive::F32 => Ok(Instance::Float(f64::from(f as f32))),
                _ => Ok(Instance::Float(f)),
            }
        }
        integer => match number(value) {
            Some(Number::Integral(n)) => Ok(truncate(integer, n)),
            Some(Number::Fractional(f)) => Ok(saturate(integer, f)),
            None => Err(could_not_decode(descriptor, value)),
        },
    }
}

/// A numeric source, before it is cast to an integer target.
enum Number {
    /// Wide enough to hold every `i64` and `u64`.
    Integral(i128),
    Fractional(f64),
}

/// Strings may be integral or fractional.
fn number(value: &Value) -> Option<Number> {
    match value {
        Value::Float(f) => Some(Number::Fractional(*f)),
        Value::String(s) => s
            .parse::<i128>()
            .ok()
            .map(Number::Integral)
            .or_else(|| s.parse::<f64>().ok().map(Number::Fractional)),
        other => other.to_int().map(|n| Number::Integral(i128::from(n))),
    }
}

/// Narrows to the target width the way a plain `as` cast does.
fn truncate(primitive: Primitive, n: i128) -> Instance {
    match primitive {
        Primitive::I8 => Instance::Int(i64::from(n as i8)),
        Primitive::I16 => Instance::Int(i64::from(n as i16)),
        Primitive::I32 => Instance::Int(i64::from(n as i32)),
        Primitive::U8 => Instance::UInt(u64::from(n as u8)),
        Primitive::U16 => Instance::UInt(u64::from(n as u16)),
        Primitive::U32 => Instance::UInt(u64::from(n as u32)),
        Primitive::U64 => Instance::UInt(n as u64),
        _ => Instance::Int(n as i64),
    }
}

/// Floats go straight to the target width: toward zero, saturating at the
/// bounds, NaN as zero.
fn saturate(primitive: Primitive, f: f64) -> Instance {
    match primitive {
        Primitive::I8 => Instance::Int(i64::from(f as i8)),
        Primitive::I16 => Instance::Int(i64::from(f as i16)),
        Primitive::I32 => Instance::Int(i64::from(f as i32)),
        Primitive::U8 => Instance::UInt(u64::from(f as u8)),
        Primitive::U16 => Instance::UInt(u64::from(f as u16)),
        Primitive::U32 => Instance::UInt(u64::from(f as u32)),
        Primitive::U64 => Instance::UInt(f as u64),
        _ => Instance::Int(f as i64),
    }
}

/// Numbers, and strings that parse as numbers, for epoch strategies.
fn epoch_number(value: &Value) -> Option<f64> {
    match value {
        Value::Int(_) | Value::Float(_) | Value::String(_) => value.to_float(),
        _ => None,
    }
}

fn run_hook(hook: DecodeHook, value: &Value) -> Result<Instance> {
    hook(value).map_err(|e| DecodeError::new(DecodeErrorKind::Other(e)))
}

fn could_not_decode(descriptor: &TypeDescriptor, value: &Value) -> DecodeError {
    DecodeError::new(DecodeErrorKind::CouldNotDecode {
        expected: descriptor.type_identifier,
        got: value.value_type(),
    })
}

fn not_supported(descriptor: &TypeDescriptor) -> DecodeError {
    DecodeError::new(DecodeErrorKind::NotSupported {
        kind: descriptor.kind.name(),
        type_identifier: descriptor.type_identifier,
    })
}

/// The source object of a nominal type, with keys rewritten per the
/// session's key decoding. When two source keys rewrite to the same name,
/// the first wins.
enum SourceObject<'v> {
    Direct(&'v Map),
    Renamed(IndexMap<String, &'v Value>),
}

impl<'v> SourceObject<'v> {
    fn new(object: &'v Map, strategy: KeyDecoding) -> Self {
        if let KeyDecoding::Identity = strategy {
            return SourceObject::Direct(object);
        }
        let mut renamed = IndexMap::with_capacity(object.len());
        for (key, value) in object {
            renamed.entry(strategy.decode_key(key)).or_insert(value);
        }
        SourceObject::Renamed(renamed)
    }

    fn get(&self, key: &str) -> Option<&'v Value> {
        match self {
            SourceObject::Direct(object) => object.get(key),
            SourceObject::Renamed(object) => object.get(key).copied(),
        }
    }
}
