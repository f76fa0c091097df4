use core::any::TypeId;
use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use crate::{Jsum, TypeDescriptor};

static DESCRIPTORS: LazyLock<RwLock<HashMap<TypeId, &'static TypeDescriptor>>> =
    LazyLock::new(Default::default);

/// Returns the cached descriptor of `T`, describing it on first use.
///
/// Descriptors are built outside the lock. When two threads race to describe
/// the same type, the first insert wins and the other copy is leaked.
pub fn descriptor_of<T: Jsum>() -> &'static TypeDescriptor {
    let id = TypeId::of::<T>();
    if let Some(found) = DESCRIPTORS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
    {
        return *found;
    }

    let built: &'static TypeDescriptor = Box::leak(Box::new(T::describe()));
    *DESCRIPTORS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(id)
        .or_insert(built)
}
