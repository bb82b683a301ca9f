use std::any::TypeId;

/// Which of the four facade operations an accessor was compiled for. Dynamic and
/// typed variants of the same member never share a cache entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    DynamicGet,
    TypedGet,
    DynamicSet,
    TypedSet,
}

/// Composite cache identity. Structural on purpose: equality and hashing go over the
/// components themselves, so component-swapped tuples that would collide under an
/// additive hash combination stay distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccessorKey {
    pub kind: AccessorKind,
    pub owner: TypeId,
    pub member: String,
    pub value: Option<TypeId>,
}

impl AccessorKey {
    pub fn new(kind: AccessorKind, owner: TypeId, member: &str, value: Option<TypeId>) -> Self {
        AccessorKey { kind, owner, member: member.to_string(), value }
    }

    pub fn for_owner<T: 'static>(kind: AccessorKind, member: &str, value: Option<TypeId>) -> Self {
        Self::new(kind, TypeId::of::<T>(), member, value)
    }
}
