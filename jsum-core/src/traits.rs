use jsum_value::Value;

use crate::{BuildError, Instance, TypeDescriptor};

/// A type that jsum can decode into (and encode from).
///
/// Implementations describe their shape once, build themselves from a
/// decoded [`Instance`], and render themselves back into a [`Value`].
/// Nominal types usually get this from [`impl_jsum_struct!`](crate::impl_jsum_struct)
/// or [`impl_jsum_class!`](crate::impl_jsum_class).
pub trait Jsum: Sized + 'static {
    /// Describes the type. Called at most once per type by
    /// [`Jsum::descriptor`]; prefer that.
    fn describe() -> TypeDescriptor;

    /// The cached descriptor of this type.
    fn descriptor() -> &'static TypeDescriptor {
        crate::descriptor_of::<Self>()
    }

    /// Builds the type from a decoded instance.
    fn build(instance: Instance) -> Result<Self, BuildError>;

    /// Encodes the type as an untyped value.
    fn to_value(&self) -> Value;
}
