//! Process-wide descriptor cache keyed by mapped type

use super::descriptor::EntityDescriptor;
use super::Entity;
use crate::errors::ConfigurationError;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

static DESCRIPTORS: LazyLock<RwLock<HashMap<TypeId, Arc<EntityDescriptor>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Resolve the descriptor of `T`, building it on first use.
///
/// Failed resolutions are not cached, so a misconfigured type reports its
/// error on every attempt.
pub fn descriptor_for<T: Entity>() -> Result<Arc<EntityDescriptor>, ConfigurationError> {
    let key = TypeId::of::<T>();

    {
        let cache = DESCRIPTORS.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(descriptor) = cache.get(&key) {
            return Ok(Arc::clone(descriptor));
        }
    }

    let descriptor = Arc::new(EntityDescriptor::from_schema(T::entity_schema())?);
    crate::debug_log!(
        "Resolved descriptor for {} -> table '{}'",
        descriptor.type_name(),
        descriptor.table_name()
    );

    let mut cache = DESCRIPTORS.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    Ok(Arc::clone(cache.entry(key).or_insert(descriptor)))
}
