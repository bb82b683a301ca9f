use crate::cache::{CachedAccessor, DelegateCache};
use crate::compiler::{self, DynamicGetter, DynamicSetter};
use crate::error::AccessorError;
use crate::field::FieldAccess;
use crate::key::{AccessorKey, AccessorKind};
use std::any::{type_name, Any, TypeId};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Per-owner-type facade over the delegate cache. Explicitly constructed and passed
/// around, never a process-wide singleton; tests and callers own its lifecycle.
///
/// Every operation follows the same route: build a key, look it up, on miss compile
/// and install via insert-if-absent, then invoke. Compilation happens outside any
/// lock; when two callers race on the same miss the loser just uses its own freshly
/// compiled copy for the current call.
pub struct PropertyAccessor<T: FieldAccess> {
    cache: Arc<DelegateCache>,
    compilations: AtomicU64,
    _owner: PhantomData<fn(T)>,
}

impl<T: FieldAccess> Default for PropertyAccessor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FieldAccess> PropertyAccessor<T> {
    pub fn new() -> Self {
        Self::with_cache(Arc::new(DelegateCache::new()))
    }

    /// Shares one cache instance across facades of different owner types; the owner
    /// component of the key keeps their entries apart.
    pub fn with_cache(cache: Arc<DelegateCache>) -> Self {
        PropertyAccessor { cache, compilations: AtomicU64::new(0), _owner: PhantomData }
    }

    /// Statically-typed read. The compiled accessor is bound to R once; a foreign R
    /// is a caller error reported as [`AccessorError::TypeMismatch`], never coerced.
    pub fn get_value_typed<R: 'static>(&self, obj: &T, member: &str) -> Result<R, AccessorError> {
        let key = AccessorKey::for_owner::<T>(AccessorKind::TypedGet, member, Some(TypeId::of::<R>()));
        let getter = match self.cache.try_get(&key) {
            Some(slot) => *self.downcast::<fn(&T) -> R>(slot, member),
            None => {
                let compiled = compiler::typed_getter::<T, R>(member)?;
                self.install(key, Arc::new(compiled));
                compiled
            }
        };
        Ok(getter(obj))
    }

    /// Statically-typed write; the key carries V, no runtime inspection of `value`.
    pub fn set_value_typed<V: 'static>(&self, obj: &mut T, member: &str, value: V) -> Result<(), AccessorError> {
        let key = AccessorKey::for_owner::<T>(AccessorKind::TypedSet, member, Some(TypeId::of::<V>()));
        let setter = match self.cache.try_get(&key) {
            Some(slot) => *self.downcast::<fn(&mut T, V)>(slot, member),
            None => {
                let compiled = compiler::typed_setter::<T, V>(member)?;
                self.install(key, Arc::new(compiled));
                compiled
            }
        };
        setter(obj, value);
        Ok(())
    }

    /// Dynamically-typed read, for call sites that only learn the value type later.
    pub fn get_value(&self, obj: &T, member: &str) -> Result<Box<dyn Any + Send>, AccessorError> {
        let key = AccessorKey::for_owner::<T>(AccessorKind::DynamicGet, member, None);
        let getter = match self.cache.try_get(&key) {
            Some(slot) => self.downcast::<DynamicGetter<T>>(slot, member),
            None => {
                let compiled = Arc::new(compiler::dynamic_getter::<T>(member)?);
                self.install(key, compiled.clone());
                compiled
            }
        };
        Ok((getter.0)(obj))
    }

    /// Dynamically-typed write, keyed by the runtime type of the boxed value.
    pub fn set_value(&self, obj: &mut T, member: &str, value: Box<dyn Any>) -> Result<(), AccessorError> {
        let runtime_type = (*value).type_id();
        let key = AccessorKey::for_owner::<T>(AccessorKind::DynamicSet, member, Some(runtime_type));
        let setter = match self.cache.try_get(&key) {
            Some(slot) => self.downcast::<DynamicSetter<T>>(slot, member),
            None => {
                let compiled = Arc::new(compiler::dynamic_setter::<T>(member, runtime_type)?);
                self.install(key, compiled.clone());
                compiled
            }
        };
        if !(setter.0)(obj, value) {
            let expected = T::field(member).map(|def| def.value_type_name).unwrap_or("unknown");
            return Err(AccessorError::TypeMismatch {
                owner: type_name::<T>(),
                member: member.to_string(),
                expected,
                requested: format!("{runtime_type:?}"),
            });
        }
        Ok(())
    }

    /// Drops every cached accessor for this owner type. An access racing the clear
    /// either recompiles or finishes on the accessor it already pulled; both are
    /// correct since accessors are pure functions of (type, member).
    pub fn clear_cache(&self) {
        self.cache.clear_owner(TypeId::of::<T>());
    }

    /// How many accessors this facade compiled so far, including copies that lost an
    /// insertion race. Purely observational.
    pub fn compile_count(&self) -> u64 {
        self.compilations.load(Ordering::Relaxed)
    }

    pub fn cache(&self) -> &Arc<DelegateCache> {
        &self.cache
    }

    fn install(&self, key: AccessorKey, accessor: CachedAccessor) {
        self.compilations.fetch_add(1, Ordering::Relaxed);
        self.cache.insert_if_absent(key, accessor);
    }

    fn downcast<A: Send + Sync + 'static>(&self, slot: CachedAccessor, member: &str) -> Arc<A> {
        // The key embeds every type identity, so a cached slot of the wrong type is
        // an invariant breach, not a caller error.
        slot.downcast::<A>()
            .unwrap_or_else(|_| panic!("cache slot for {}.{member} holds a foreign accessor type", type_name::<T>()))
    }
}
