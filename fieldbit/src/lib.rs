//! fieldbit resolves struct field accessors by name and memoizes them in a concurrent,
//! explicitly owned delegate cache, so that repeated by-name get/set calls cost one map
//! lookup plus a direct call instead of a fresh table scan on every access.
//!
//! Accessor tables are registered at compile time through `#[derive(FieldAccess)]` (or
//! by hand via [`FieldDef::new`]), which replaces runtime method-name reflection with a
//! per-type static table of plain function pointers.
//!
//! The schema side is independent glue: an abstract [`MetadataProvider`] for pulling
//! table/column metadata out of an opened data source, provider export by guid tag
//! through `inventory`, and XML persistence of schema documents via `quick-xml`.

pub mod accessor;
pub mod cache;
pub mod compiler;
pub mod error;
pub mod field;
pub mod key;
pub mod logger;
pub mod metadata;
pub mod schema;

pub use accessor::PropertyAccessor;
pub use cache::{CachedAccessor, DelegateCache};
pub use chrono;
pub use error::{AccessorError, SchemaError};
pub use field::{FieldAccess, FieldDef};
pub use inventory;
pub use key::{AccessorKey, AccessorKind};
pub use macros::FieldAccess;
pub use metadata::{ColumnSchema, MetadataProvider, ProviderInfo, TableSchema};
pub use once_cell;
pub use quick_xml;
pub use schema::{SchemaBuffer, SchemaDocument, TableNode};
pub use serde;
pub use serde::Deserialize;
pub use serde::Serialize;
pub use std::any::{Any, TypeId};
pub use std::sync::Arc;
