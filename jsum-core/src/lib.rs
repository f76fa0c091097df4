//! Type descriptors, field policies and decoded instances for jsum.
//!
//! Every decodable type implements [`Jsum`], which gives the decode engine
//! three things:
//!
//! - a [`TypeDescriptor`]: the type's [`Kind`], its fields (for nominal
//!   types), its own default ([`Fallback`]) and its [`FieldPolicy`];
//! - a builder that turns a decoded [`Instance`] into the concrete type;
//! - an encoder back into a [`Value`].
//!
//! Descriptors are built once per type and cached for the life of the process.
//! Nominal types get their implementation from [`impl_jsum_struct!`] or
//! [`impl_jsum_class!`]; enums implement [`Jsum`] by hand and supply a decode
//! hook through [`EnumDef`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

extern crate alloc;

pub use jsum_value::{Map, Value, ValueType};

mod cache;
pub use cache::descriptor_of;

mod casing;
pub use casing::{camel_case_to_snake_case, snake_case_to_camel_case};

mod descriptor;
pub use descriptor::*;

mod impls;
pub use impls::Bytes;

mod instance;
pub use instance::{BuildError, FieldMap, Instance};

mod macros;

mod policy;
pub use policy::{FieldPolicy, KeyPath, KeyPathError, Property};

mod registry;
pub use registry::Registry;

mod traits;
pub use traits::Jsum;

mod transform;
pub use transform::{BoxError, TransformError, Transformer};
