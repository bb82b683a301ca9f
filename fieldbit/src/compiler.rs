use crate::error::AccessorError;
use crate::field::{DynGetFn, DynSetFn, FieldAccess, FieldDef};
use std::any::{type_name, TypeId};

/// Compiled dynamically-typed getter. A sized wrapper so the type-erased cache slot
/// can be downcast back to it.
pub struct DynamicGetter<T>(pub(crate) DynGetFn<T>);

/// Compiled dynamically-typed setter, keyed by the value's runtime type.
pub struct DynamicSetter<T>(pub(crate) DynSetFn<T>);

fn resolve<T: FieldAccess>(member: &str) -> Result<&'static FieldDef<T>, AccessorError> {
    if member.trim().is_empty() {
        return Err(AccessorError::InvalidArgument("member name must not be empty".into()));
    }
    T::field(member).ok_or_else(|| AccessorError::MemberNotFound {
        owner: type_name::<T>(),
        member: member.to_string(),
    })
}

fn mismatch<T>(def: &FieldDef<T>, requested: String) -> AccessorError {
    AccessorError::TypeMismatch {
        owner: type_name::<T>(),
        member: def.name.to_string(),
        expected: def.value_type_name,
        requested,
    }
}

/// Resolves the member and binds its getter to the statically known result type R.
/// The result is a plain fn pointer, invocation does no further dispatch.
pub fn typed_getter<T: FieldAccess, R: 'static>(member: &str) -> Result<fn(&T) -> R, AccessorError> {
    let def = resolve::<T>(member)?;
    def.getter_for::<R>().ok_or_else(|| mismatch::<T>(def, type_name::<R>().to_string()))
}

pub fn typed_setter<T: FieldAccess, V: 'static>(member: &str) -> Result<fn(&mut T, V), AccessorError> {
    let def = resolve::<T>(member)?;
    def.setter_for::<V>().ok_or_else(|| mismatch::<T>(def, type_name::<V>().to_string()))
}

pub fn dynamic_getter<T: FieldAccess>(member: &str) -> Result<DynamicGetter<T>, AccessorError> {
    Ok(DynamicGetter(resolve::<T>(member)?.boxed_getter()))
}

/// Resolves with the runtime type of the value the caller is about to write in place
/// of a statically known one. A foreign runtime type fails here, before anything is
/// cached under its key.
pub fn dynamic_setter<T: FieldAccess>(member: &str, runtime_type: TypeId) -> Result<DynamicSetter<T>, AccessorError> {
    let def = resolve::<T>(member)?;
    if def.value_type != runtime_type {
        return Err(mismatch::<T>(def, format!("{runtime_type:?}")));
    }
    Ok(DynamicSetter(def.boxed_setter()))
}
