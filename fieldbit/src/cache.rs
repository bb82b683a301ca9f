use crate::key::AccessorKey;
use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A compiled accessor as the cache stores it, type-erased. The key embeds every type
/// identity involved, so the facade downcasts back to the concrete accessor type.
pub type CachedAccessor = Arc<dyn Any + Send + Sync>;

/// Concurrent map from [`AccessorKey`] to compiled accessor. Entries never expire on
/// their own; removal is only explicit. One instance can back several facades, the
/// owner component of the key keeps their entries apart.
#[derive(Default)]
pub struct DelegateCache {
    inner: Mutex<HashMap<AccessorKey, CachedAccessor>>,
}

impl DelegateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_get(&self, key: &AccessorKey) -> Option<CachedAccessor> {
        self.inner.lock().unwrap().get(key).cloned()
    }

    /// Stores the accessor only if no entry exists for the key. Returns whether the
    /// supplied accessor became the authoritative entry; a racing loser keeps its own
    /// copy for the current call, which is equivalent since compilation is pure.
    pub fn insert_if_absent(&self, key: AccessorKey, accessor: CachedAccessor) -> bool {
        match self.inner.lock().unwrap().entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(accessor);
                true
            }
        }
    }

    pub fn remove(&self, key: &AccessorKey) -> bool {
        self.inner.lock().unwrap().remove(key).is_some()
    }

    /// Drops every entry, for all owner types reachable from this instance.
    pub fn clear_all(&self) {
        self.inner.lock().unwrap().clear();
    }

    /// Drops every entry belonging to one owner type, leaving the rest intact.
    pub fn clear_owner(&self, owner: TypeId) {
        self.inner.lock().unwrap().retain(|key, _| key.owner != owner);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
