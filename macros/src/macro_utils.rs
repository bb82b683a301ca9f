use proc_macro::TokenStream;
use proc_macro2::Ident;
use quote::quote;
use std::env;

/// Hands the expansion back to the compiler, dumping a pretty-printed copy under
/// `target/macros/<dir>/<Struct>.rs` when `FIELDBIT_MACRO_DUMP` is set.
pub fn submit_impl_to_stream(stream: proc_macro2::TokenStream, dir: &str, struct_ident: &Ident) -> TokenStream {
    if env::var_os("FIELDBIT_MACRO_DUMP").is_some() {
        let pretty = match syn::parse2::<syn::File>(stream.clone()) {
            Ok(ast) => prettyplease::unparse(&ast),
            Err(_) => stream.to_string(),
        };
        dump(&pretty, dir, &format!("{}.rs", struct_ident));
    }
    quote! { #stream }.into()
}

fn dump(code: &str, dir_name: &str, file_name: &str) {
    let dir_path = match env::current_dir() {
        Ok(cwd) => cwd.join("target").join("macros").join(dir_name),
        Err(e) => {
            eprintln!("current dir inaccessible: {}", e);
            return;
        }
    };
    if let Err(e) = std::fs::create_dir_all(&dir_path) {
        eprintln!("failed to create directory {:?}: {}", dir_path, e);
        return;
    }
    if let Err(e) = std::fs::write(dir_path.join(file_name), code) {
        eprintln!("failed to write {}: {}", file_name, e);
    }
}
