use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

/// Boxing getter, shared between the field table and compiled dynamic accessors.
pub type DynGetFn<T> = Arc<dyn Fn(&T) -> Box<dyn Any + Send> + Send + Sync>;
/// Downcasting setter; returns false when the boxed value is not the field's type.
pub type DynSetFn<T> = Arc<dyn Fn(&mut T, Box<dyn Any>) -> bool + Send + Sync>;

/// Per-type accessor registration, implemented by `#[derive(FieldAccess)]` or by hand
/// with [`FieldDef::new`]. The table is built once per type and lives for the process
/// lifetime; member resolution is a linear scan over it, done only on cache miss.
pub trait FieldAccess: Sized + 'static {
    fn fields() -> &'static [FieldDef<Self>];

    fn field(member: &str) -> Option<&'static FieldDef<Self>> {
        Self::fields().iter().find(|def| def.name == member)
    }
}

/// One registered field: its name, its value type identity and both typed and
/// dynamically-typed accessor entry points over it.
pub struct FieldDef<T> {
    pub name: &'static str,
    pub value_type: TypeId,
    pub value_type_name: &'static str,
    typed_get: Box<dyn Any + Send + Sync>,
    typed_set: Box<dyn Any + Send + Sync>,
    dyn_get: DynGetFn<T>,
    dyn_set: DynSetFn<T>,
}

impl<T: 'static> FieldDef<T> {
    pub fn new<V: Send + 'static>(name: &'static str, get: fn(&T) -> V, set: fn(&mut T, V)) -> Self {
        let dyn_get: DynGetFn<T> = Arc::new(move |obj: &T| -> Box<dyn Any + Send> { Box::new(get(obj)) });
        let dyn_set: DynSetFn<T> = Arc::new(move |obj: &mut T, value: Box<dyn Any>| match value.downcast::<V>() {
            Ok(v) => {
                set(obj, *v);
                true
            }
            Err(_) => false,
        });
        FieldDef {
            name,
            value_type: TypeId::of::<V>(),
            value_type_name: type_name::<V>(),
            typed_get: Box::new(get),
            typed_set: Box::new(set),
            dyn_get,
            dyn_set,
        }
    }

    /// The typed getter as a plain fn pointer, or None when R is not the field's type.
    pub(crate) fn getter_for<R: 'static>(&self) -> Option<fn(&T) -> R> {
        self.typed_get.downcast_ref::<fn(&T) -> R>().copied()
    }

    pub(crate) fn setter_for<V: 'static>(&self) -> Option<fn(&mut T, V)> {
        self.typed_set.downcast_ref::<fn(&mut T, V)>().copied()
    }

    pub(crate) fn boxed_getter(&self) -> DynGetFn<T> {
        Arc::clone(&self.dyn_get)
    }

    pub(crate) fn boxed_setter(&self) -> DynSetFn<T> {
        Arc::clone(&self.dyn_set)
    }
}
