use crate::macro_utils;
use proc_macro::TokenStream;
use proc_macro_error::abort;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

pub fn expand(input: DeriveInput) -> TokenStream {
    let struct_ident = &input.ident;
    if !input.generics.params.is_empty() {
        abort!(input.generics, "FieldAccess cannot be derived for generic structs");
    }
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => abort!(struct_ident, "FieldAccess requires a struct with named fields"),
        },
        _ => abort!(struct_ident, "FieldAccess can only be derived for structs"),
    };

    let defs = fields.iter().map(|field| {
        let field_ident = field.ident.as_ref().expect("named field");
        let member = field_ident.to_string();
        let ty = &field.ty;
        // Closures coerce to plain fn pointers, so the compiled accessors carry no
        // captured state and invocation is a direct call.
        quote! {
            fieldbit::FieldDef::new(
                #member,
                (|obj: &#struct_ident| obj.#field_ident.clone()) as fn(&#struct_ident) -> #ty,
                (|obj: &mut #struct_ident, value: #ty| obj.#field_ident = value) as fn(&mut #struct_ident, #ty),
            )
        }
    });

    let stream = quote! {
        impl fieldbit::FieldAccess for #struct_ident {
            fn fields() -> &'static [fieldbit::FieldDef<Self>] {
                static FIELDS: fieldbit::once_cell::sync::Lazy<Vec<fieldbit::FieldDef<#struct_ident>>> =
                    fieldbit::once_cell::sync::Lazy::new(|| vec![#(#defs),*]);
                &FIELDS
            }
        }
    };
    macro_utils::submit_impl_to_stream(stream, "field_access", struct_ident)
}
