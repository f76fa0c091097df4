/// Implements [`Jsum`](crate::Jsum) for a struct with named fields.
///
/// Field declaration order is the decode order. A field policy and the
/// struct's own fallback can be given after the field list.
///
/// ```
/// use jsum_core::{FieldPolicy, impl_jsum_struct};
///
/// #[derive(Debug, PartialEq)]
/// struct Post {
///     title: String,
///     score: i64,
/// }
///
/// impl_jsum_struct!(Post { title: String, score: i64 },
///     policy = FieldPolicy::new().key_path("score", "details.score"));
/// ```
#[macro_export]
macro_rules! impl_jsum_struct {
    (
        $ty:ident { $($field:ident : $fty:ty),* $(,)? }
        $(, policy = $policy:expr)?
        $(, fallback = $fallback:expr)?
        $(,)?
    ) => {
        impl $crate::Jsum for $ty {
            fn describe() -> $crate::TypeDescriptor {
                #[allow(unused_mut)]
                let mut builder = $crate::TypeDescriptor::builder::<Self>($crate::Kind::Struct(
                    $crate::StructDef::new(vec![
                        $($crate::Field::new(stringify!($field), <$fty as $crate::Jsum>::descriptor)),*
                    ]),
                ))
                .type_identifier(stringify!($ty));
                $(builder = builder.policy($policy);)?
                $(builder = builder.fallback($fallback);)?
                builder.build()
            }

            fn build(
                instance: $crate::Instance,
            ) -> ::core::result::Result<Self, $crate::BuildError> {
                #[allow(unused_mut, unused_variables)]
                let mut fields = instance.into_fields(stringify!($ty))?;
                Ok(Self {
                    $($field: fields.take(stringify!($field))?),*
                })
            }

            fn to_value(&self) -> $crate::Value {
                #[allow(unused_mut)]
                let mut object = $crate::Map::new();
                $(object.insert(
                    stringify!($field).to_owned(),
                    $crate::Jsum::to_value(&self.$field),
                );)*
                $crate::Value::Object(object)
            }
        }
    };
}

/// Implements [`Jsum`](crate::Jsum) for a class-like struct.
///
/// With `extends field: Base`, the struct holds its base class in `field`.
/// The base's fields are decoded alongside the class's own, with the class's
/// fields shadowing base fields of the same name, and the base is built from
/// the same decoded field set.
///
/// ```
/// use jsum_core::impl_jsum_class;
///
/// struct Animal {
///     name: String,
/// }
///
/// struct Dog {
///     animal: Animal,
///     breed: String,
/// }
///
/// impl_jsum_class!(Animal { name: String });
/// impl_jsum_class!(Dog extends animal: Animal { breed: String });
/// ```
#[macro_export]
macro_rules! impl_jsum_class {
    (
        $ty:ident $(extends $base_field:ident : $base:ident)?
        { $($field:ident : $fty:ty),* $(,)? }
        $(, policy = $policy:expr)?
        $(, fallback = $fallback:expr)?
        $(,)?
    ) => {
        impl $crate::Jsum for $ty {
            fn describe() -> $crate::TypeDescriptor {
                let def = $crate::ClassDef::new(vec![
                    $($crate::Field::new(stringify!($field), <$fty as $crate::Jsum>::descriptor)),*
                ])
                $(.extends(<$base as $crate::Jsum>::descriptor))?;
                #[allow(unused_mut)]
                let mut builder = $crate::TypeDescriptor::builder::<Self>($crate::Kind::Class(def))
                    .type_identifier(stringify!($ty));
                $(builder = builder.policy($policy);)?
                $(builder = builder.fallback($fallback);)?
                builder.build()
            }

            fn build(
                instance: $crate::Instance,
            ) -> ::core::result::Result<Self, $crate::BuildError> {
                #[allow(unused_mut, unused_variables)]
                let mut fields = instance.into_fields(stringify!($ty))?;
                Ok(Self {
                    $($base_field: <$base as $crate::Jsum>::build(
                        $crate::Instance::Struct(fields.clone()),
                    )?,)?
                    $($field: fields.take(stringify!($field))?),*
                })
            }

            fn to_value(&self) -> $crate::Value {
                #[allow(unused_mut)]
                let mut object = $crate::Map::new();
                $(if let $crate::Value::Object(base) = $crate::Jsum::to_value(&self.$base_field) {
                    object.extend(base);
                })?
                $(object.insert(
                    stringify!($field).to_owned(),
                    $crate::Jsum::to_value(&self.$field),
                );)*
                $crate::Value::Object(object)
            }
        }
    };
}
