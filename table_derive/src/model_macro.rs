use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error};

/// Adds `Debug`, `Clone`, `Default`, `PartialEq` and `Entity` to a struct
pub fn model_attribute(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let name = &input.ident;
    let attrs = &input.attrs;
    let vis = &input.vis;
    let generics = &input.generics;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Error::new_spanned(name, "#[model] can only be used on structs")
                .to_compile_error()
                .into()
        }
    };

    // Tuple and unit structs need a trailing semicolon
    let terminator = match fields {
        syn::Fields::Named(_) => quote! {},
        _ => quote! { ; },
    };

    let expanded = quote! {
        #[derive(Debug, Clone, Default, PartialEq, ::entityhaus::Entity)]
        #(#attrs)*
        #vis struct #name #generics #fields #terminator
    };

    TokenStream::from(expanded)
}
