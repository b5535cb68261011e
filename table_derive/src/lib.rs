//! Procedural macros for mapping structs onto tables
//!
//! This crate provides the `#[model]` attribute and the `Entity` derive,
//! which generate the static schema and field accessors the entity store
//! works from.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod entity_generation;
mod model_macro;
mod parsing;

use entity_generation::generate_entity_impl;
use model_macro::model_attribute;
use parsing::{parse_field_attributes, parse_table_attributes};

/// Derive macro for the `Entity` trait
///
/// Note: It's recommended to use the `#[model]` attribute macro instead,
/// which adds this derive together with `Default` and the other derives a
/// mapped type needs.
///
/// ```rust,ignore
/// #[derive(Debug, Default, Entity)]
/// #[table(name = "employees")]
/// pub struct Employee {
///     #[primary_key]
///     pub id: i64,
///
///     #[column(name = "first_name")]
///     pub first_name: String,
///
///     #[column]
///     pub age: i32,
///
///     // not marked: never stored
///     pub nickname: String,
/// }
/// ```
///
/// Identifiers are validated here, at compile time. Primary key cardinality
/// and type are checked when the descriptor is first resolved.
#[proc_macro_derive(Entity, attributes(table, primary_key, column))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let table_info = match parse_table_attributes(&input.attrs) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let field_info = match parse_field_attributes(&input.data) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    TokenStream::from(generate_entity_impl(name, &table_info, &field_info))
}

/// Convenience attribute macro that adds all necessary derives for a mapped type
///
/// ```rust,ignore
/// use entityhaus::model;
///
/// #[model]
/// #[table(name = "employees")]
/// pub struct Employee {
///     #[primary_key]
///     pub id: i64,
///     #[column]
///     pub first_name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn model(attr: TokenStream, item: TokenStream) -> TokenStream {
    model_attribute(attr, item)
}
