extern crate proc_macro;
mod field_access;
mod macro_utils;

use proc_macro::TokenStream;
use proc_macro_error::proc_macro_error;
use syn::{parse_macro_input, DeriveInput};

/// Derives `fieldbit::FieldAccess` for a struct with named fields, registering one
/// `FieldDef` per field. Every field type must be `Clone + Send + 'static`; generic
/// structs and tuple/unit structs are rejected.
///
/// Set `FIELDBIT_MACRO_DUMP` to write the pretty-printed expansion under
/// `target/macros/` for inspection.
#[proc_macro_derive(FieldAccess)]
#[proc_macro_error]
pub fn derive_field_access(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    field_access::expand(input)
}
