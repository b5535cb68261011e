//! Code generation for the `Entity` trait
//!
//! Emits a static `EntitySchema` listing every marked field and the
//! `read_field` / `write_field` accessors for the fields that have a column
//! mapping. Unmapped marked fields appear in the schema (so the descriptor
//! can report a non-integer key) but get no accessor.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;
use type_mapping::SemanticType;

use crate::parsing::{FieldInfo, MarkedField, MarkerKind, TableInfo};

pub fn generate_entity_impl(
    name: &Ident,
    table_info: &TableInfo,
    field_info: &FieldInfo,
) -> TokenStream {
    let type_name = name.to_string();

    let table_name = match &table_info.name {
        Some(table) => quote! { ::core::option::Option::Some(#table) },
        None => quote! { ::core::option::Option::None },
    };

    let field_schemas: Vec<TokenStream> = field_info.fields.iter().map(field_schema).collect();

    let mapped_names: Vec<String> = field_info.mapped().map(|f| f.ident.to_string()).collect();
    let mapped_idents: Vec<&Ident> = field_info.mapped().map(|f| &f.ident).collect();

    quote! {
        impl ::entityhaus::entity_store::Entity for #name {
            fn entity_schema() -> &'static ::entityhaus::entity_store::EntitySchema {
                static SCHEMA: ::entityhaus::entity_store::EntitySchema =
                    ::entityhaus::entity_store::EntitySchema {
                        type_name: #type_name,
                        table_name: #table_name,
                        fields: &[#(#field_schemas),*],
                    };
                &SCHEMA
            }

            fn read_field(&self, field: &str) -> ::core::option::Option<::entityhaus::type_mapping::SqlValue> {
                match field {
                    #(
                        #mapped_names => ::core::option::Option::Some(
                            ::entityhaus::type_mapping::ToSqlValue::to_sql_value(&self.#mapped_idents)
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn write_field(
                &mut self,
                field: &str,
                value: ::entityhaus::type_mapping::SqlValue,
            ) -> ::core::result::Result<(), ::entityhaus::type_mapping::ConversionError> {
                match field {
                    #(
                        #mapped_names => {
                            self.#mapped_idents =
                                ::entityhaus::type_mapping::FromSqlValue::from_sql_value(value)?;
                            ::core::result::Result::Ok(())
                        }
                    )*
                    other => ::core::result::Result::Err(
                        ::entityhaus::type_mapping::ConversionError::UnknownField(other.to_string())
                    ),
                }
            }
        }
    }
}

fn field_schema(field: &MarkedField) -> TokenStream {
    let field_name = field.ident.to_string();
    let column = &field.column;
    let rust_type = &field.rust_type;

    let marker = match field.kind {
        MarkerKind::PrimaryKey => {
            quote! { ::entityhaus::entity_store::FieldMarker::PrimaryKey(#column) }
        }
        MarkerKind::Column => quote! { ::entityhaus::entity_store::FieldMarker::Column(#column) },
    };

    let semantic_type = match field.semantic_type {
        Some(SemanticType::Integer) => quote! {
            ::core::option::Option::Some(::entityhaus::type_mapping::SemanticType::Integer)
        },
        Some(SemanticType::Text) => quote! {
            ::core::option::Option::Some(::entityhaus::type_mapping::SemanticType::Text)
        },
        None => quote! { ::core::option::Option::None },
    };

    quote! {
        ::entityhaus::entity_store::FieldSchema {
            field: #field_name,
            marker: #marker,
            rust_type: #rust_type,
            semantic_type: #semantic_type,
        }
    }
}
