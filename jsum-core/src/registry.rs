use core::any::TypeId;
use core::fmt;
use std::collections::HashMap;

use crate::{DecodeHook, FieldPolicy, Jsum, Property};

/// Per-type overrides supplied by the caller instead of the type itself.
///
/// A registry is an ordinary value: build one, hand it to a decode session,
/// and every decode in that session sees it. Nothing is registered globally.
#[derive(Clone, Default)]
pub struct Registry {
    policies: HashMap<TypeId, FieldPolicy>,
    hooks: HashMap<TypeId, DecodeHook>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers `policy` over the policy `T` declares for itself. Registering a
    /// policy for the same type twice merges them, later entries winning.
    pub fn with_policy<T: Jsum>(mut self, policy: FieldPolicy) -> Self {
        let id = TypeId::of::<T>();
        let merged = match self.policies.remove(&id) {
            Some(existing) => policy.merged_over(&existing),
            None => policy,
        };
        self.policies.insert(id, merged);
        self
    }

    /// Shorthand for [`Registry::with_policy`] from a list of properties.
    pub fn with_properties<T: Jsum>(self, properties: impl IntoIterator<Item = Property>) -> Self {
        self.with_policy::<T>(properties.into_iter().collect())
    }

    /// Decodes `T` through `hook`. For enums this supplies the missing decode
    /// capability; for structs and classes it is the codable fallback.
    pub fn with_hook<T: Jsum>(mut self, hook: DecodeHook) -> Self {
        self.hooks.insert(TypeId::of::<T>(), hook);
        self
    }

    /// The policy override registered for a type.
    pub fn policy_for(&self, type_id: TypeId) -> Option<&FieldPolicy> {
        self.policies.get(&type_id)
    }

    /// The decode hook registered for a type.
    pub fn hook_for(&self, type_id: TypeId) -> Option<DecodeHook> {
        self.hooks.get(&type_id).copied()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty() && self.hooks.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("policies", &self.policies.len())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
