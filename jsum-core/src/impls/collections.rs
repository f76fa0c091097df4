use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use jsum_value::{Map, Value};

use crate::{BuildError, Fallback, Instance, Jsum, Kind, TypeDescriptor};

impl<T: Jsum> Jsum for Vec<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::builder::<Self>(Kind::Array(T::descriptor))
            .fallback(Fallback::Value(|| Value::Array(Vec::new())))
            .build()
    }

    fn build(instance: Instance) -> Result<Self, BuildError> {
        match instance {
            Instance::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| T::build(item).map_err(|e| e.at_index(i)))
                .collect(),
            other => Err(BuildError::mismatch("Vec", &other)),
        }
    }

    fn to_value(&self) -> Value {
        self.iter().map(T::to_value).collect()
    }
}

fn build_entries<V: Jsum, M: FromIterator<(String, V)>>(
    expected: &'static str,
    instance: Instance,
) -> Result<M, BuildError> {
    match instance {
        Instance::Map(entries) => entries
            .into_iter()
            .map(|(key, value)| {
                let value = V::build(value).map_err(|e| e.at_field(&key))?;
                Ok((key, value))
            })
            .collect(),
        other => Err(BuildError::mismatch(expected, &other)),
    }
}

fn encode_entries<'a, V: Jsum>(entries: impl Iterator<Item = (&'a String, &'a V)>) -> Value {
    Value::Object(
        entries
            .map(|(key, value)| (key.clone(), value.to_value()))
            .collect::<Map>(),
    )
}

macro_rules! impl_jsum_string_map {
    ($($map:ident),* $(,)?) => {
        $(
            impl<V: Jsum> Jsum for $map<String, V> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::builder::<Self>(Kind::Map(V::descriptor))
                        .fallback(Fallback::Value(|| Value::Object(Map::new())))
                        .build()
                }

                fn build(instance: Instance) -> Result<Self, BuildError> {
                    build_entries(stringify!($map), instance)
                }

                fn to_value(&self) -> Value {
                    encode_entries(self.iter())
                }
            }
        )*
    };
}

impl_jsum_string_map!(HashMap, BTreeMap, IndexMap);
