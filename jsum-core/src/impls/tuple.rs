use jsum_value::Value;

use crate::{
    BuildError, Fallback, INDEX_LABELS, Instance, Jsum, Kind, TupleDef, TupleElement,
    TypeDescriptor,
};

macro_rules! impl_jsum_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Jsum),+> Jsum for ($($name,)+) {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::builder::<Self>(Kind::Tuple(TupleDef::new(vec![
                    $(TupleElement::new(INDEX_LABELS[$idx], $name::descriptor)),+
                ])))
                .fallback(Fallback::Synthesized)
                .build()
            }

            fn build(instance: Instance) -> Result<Self, BuildError> {
                let slots = match instance {
                    Instance::Tuple(slots) => slots,
                    other => return Err(BuildError::mismatch("tuple", &other)),
                };
                let expected = [$($idx),+].len();
                let got = slots.len();
                if got != expected {
                    return Err(BuildError::Arity { expected, got });
                }
                let mut slots = slots.into_iter();
                Ok(($(
                    $name::build(slots.next().ok_or(BuildError::Arity { expected, got })?)
                        .map_err(|e| e.at_index($idx))?,
                )+))
            }

            fn to_value(&self) -> Value {
                Value::Array(vec![$(self.$idx.to_value()),+])
            }
        }
    };
}

impl_jsum_tuple!(A: 0);
impl_jsum_tuple!(A: 0, B: 1);
impl_jsum_tuple!(A: 0, B: 1, C: 2);
impl_jsum_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_jsum_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_jsum_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_jsum_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_jsum_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
