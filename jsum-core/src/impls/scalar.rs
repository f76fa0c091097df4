use jsum_value::Value;

use crate::{BuildError, Fallback, Instance, Jsum, Kind, Primitive, TypeDescriptor};

impl Jsum for bool {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::builder::<Self>(Kind::Primitive(Primitive::Bool))
            .type_identifier("bool")
            .fallback(Fallback::Value(|| Value::FALSE))
            .build()
    }

    fn build(instance: Instance) -> Result<Self, BuildError> {
        match instance {
            Instance::Bool(b) => Ok(b),
            other => Err(BuildError::mismatch("bool", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Jsum for String {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::builder::<Self>(Kind::Primitive(Primitive::String))
            .type_identifier("String")
            .fallback(Fallback::Value(|| Value::String(String::new())))
            .build()
    }

    fn build(instance: Instance) -> Result<Self, BuildError> {
        match instance {
            Instance::String(s) => Ok(s),
            other => Err(BuildError::mismatch("String", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

// Integer instances arrive already truncated to the target width, so the
// casts below are exact for them.
macro_rules! impl_jsum_int {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(
            impl Jsum for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::builder::<Self>(Kind::Primitive(Primitive::$prim))
                        .type_identifier(stringify!($ty))
                        .fallback(Fallback::Value(|| Value::Int(0)))
                        .build()
                }

                fn build(instance: Instance) -> Result<Self, BuildError> {
                    match instance {
                        Instance::Int(i) => Ok(i as $ty),
                        Instance::UInt(u) => Ok(u as $ty),
                        Instance::Float(f) => Ok(f as $ty),
                        other => Err(BuildError::mismatch(stringify!($ty), &other)),
                    }
                }

                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_jsum_int! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => U64,
}

macro_rules! impl_jsum_float {
    ($($ty:ty => $prim:ident),* $(,)?) => {
        $(
            impl Jsum for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::builder::<Self>(Kind::Primitive(Primitive::$prim))
                        .type_identifier(stringify!($ty))
                        .fallback(Fallback::Value(|| Value::Float(0.0)))
                        .build()
                }

                fn build(instance: Instance) -> Result<Self, BuildError> {
                    match instance {
                        Instance::Float(f) => Ok(f as $ty),
                        Instance::Int(i) => Ok(i as $ty),
                        Instance::UInt(u) => Ok(u as $ty),
                        other => Err(BuildError::mismatch(stringify!($ty), &other)),
                    }
                }

                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_jsum_float! {
    f32 => F32,
    f64 => F64,
}

impl<T: Jsum> Jsum for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::builder::<Self>(Kind::Optional(T::descriptor))
            .fallback(Fallback::Value(|| Value::Null))
            .build()
    }

    fn build(instance: Instance) -> Result<Self, BuildError> {
        match instance {
            Instance::Option(None) => Ok(None),
            Instance::Option(Some(inner)) => T::build(*inner).map(Some),
            other => Err(BuildError::mismatch("Option", &other)),
        }
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, T::to_value)
    }
}

impl<T: Jsum> Jsum for Box<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }

    fn descriptor() -> &'static TypeDescriptor {
        T::descriptor()
    }

    fn build(instance: Instance) -> Result<Self, BuildError> {
        T::build(instance).map(Box::new)
    }

    fn to_value(&self) -> Value {
        T::to_value(self)
    }
}
