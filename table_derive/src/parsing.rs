//! Parsing utilities for table and field attributes
//!
//! This module handles the parsing of `#[table]`, `#[primary_key]` and
//! `#[column]` attributes and validation of table and column names.

use quote::quote;
use syn::{Attribute, Data, Error, Fields, Ident, LitStr, Meta, Result};
use type_mapping::{rust_type_to_semantic_type, SemanticType};

/// Validate table name and return syn::Error for better proc macro error handling
pub fn validate_table_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid table name '{}': {}", name, e)))
}

/// Validate column name and return syn::Error for better proc macro error handling
pub fn validate_column_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid column name '{}': {}", name, e)))
}

/// Mirrors `entity_store::validation` so a name rejected at runtime is
/// already rejected at compile time
fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    let first_char = name
        .chars()
        .next()
        .ok_or_else(|| "Name cannot be empty".to_string())?;

    // MySQL identifier limit
    if name.len() > 64 {
        return Err(format!(
            "Name '{}' is too long: {} characters (max 64)",
            name,
            name.len()
        ));
    }

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(format!(
            "Name '{}' must start with a letter or underscore",
            name
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("Name '{}' contains invalid characters: only alphanumeric characters and underscores are allowed", name));
    }

    if is_reserved_keyword(name) {
        return Err(format!("Name '{}' is a reserved SQL keyword", name));
    }

    Ok(())
}

/// Same list as `entity_store::validation::ValidatedIdentifier`
fn is_reserved_keyword(name: &str) -> bool {
    const RESERVED_KEYWORDS: &[&str] = &[
        "SELECT", "INSERT", "UPDATE", "DELETE", "FROM", "WHERE", "JOIN", "INNER",
        "LEFT", "RIGHT", "OUTER", "CROSS", "ON", "AS", "AND", "OR", "NOT", "NULL",
        "TRUE", "FALSE", "CASE", "WHEN", "THEN", "ELSE", "IF", "EXISTS", "IN", "IS",
        "LIKE", "BETWEEN", "ORDER", "BY", "GROUP", "HAVING", "LIMIT", "UNION", "ALL",
        "DISTINCT", "CREATE", "DROP", "ALTER", "TABLE", "INDEX", "DATABASE", "SCHEMA",
        "PRIMARY", "KEY", "KEYS", "FOREIGN", "REFERENCES", "UNIQUE", "CHECK", "DEFAULT",
        "CONSTRAINT", "COLUMN", "ADD", "MODIFY", "RENAME", "TO", "SET", "VALUES",
        "INTO", "WITH", "INT", "INTEGER", "BIGINT", "SMALLINT", "TINYINT", "VARCHAR",
        "CHAR", "DECIMAL", "NUMERIC", "DOUBLE", "FLOAT", "REAL", "AUTO_INCREMENT",
        "USE", "SHOW", "DESC", "ASC", "REPLACE", "TRIGGER", "PROCEDURE", "FUNCTION",
        "READ", "WRITE", "LOCK", "UNLOCK", "GRANT", "REVOKE",
    ];

    RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    PrimaryKey,
    Column,
}

#[derive(Debug)]
pub struct TableInfo {
    /// Explicit table name; `None` falls back to the derived default
    pub name: Option<String>,
}

#[derive(Debug)]
pub struct MarkedField {
    pub ident: Ident,
    pub kind: MarkerKind,
    pub column: String,
    /// Field type with whitespace removed
    pub rust_type: String,
    pub semantic_type: Option<SemanticType>,
}

#[derive(Debug)]
pub struct FieldInfo {
    /// Marked fields in declaration order; unmarked fields are skipped
    pub fields: Vec<MarkedField>,
}

impl FieldInfo {
    /// Fields whose type has a column mapping
    pub fn mapped(&self) -> impl Iterator<Item = &MarkedField> {
        self.fields.iter().filter(|f| f.semantic_type.is_some())
    }
}

pub fn parse_table_attributes(attrs: &[Attribute]) -> Result<TableInfo> {
    let mut table_name = None;

    for attr in attrs {
        if attr.path().is_ident("table") {
            if let Some((name, span)) = parse_name_argument(attr)? {
                validate_table_name_syn(&name, span)?;
                table_name = Some(name);
            }
        }
    }

    Ok(TableInfo { name: table_name })
}

pub fn parse_field_attributes(data: &Data) -> Result<FieldInfo> {
    let Data::Struct(data_struct) = data else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "Entity can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(fields_named) = &data_struct.fields else {
        return Err(Error::new_spanned(
            &data_struct.fields,
            "Entity can only be derived for structs with named fields",
        ));
    };

    let mut fields = Vec::new();

    for field in &fields_named.named {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "Field must have a name"))?;

        let primary_key = find_attribute(&field.attrs, "primary_key");
        let column = find_attribute(&field.attrs, "column");

        let (kind, attr) = match (primary_key, column) {
            (Some(_), Some(column)) => {
                return Err(Error::new_spanned(
                    column,
                    "a field cannot be both #[primary_key] and #[column]",
                ))
            }
            (Some(attr), None) => (MarkerKind::PrimaryKey, attr),
            (None, Some(attr)) => (MarkerKind::Column, attr),
            (None, None) => continue,
        };

        let (column_name, span) = match parse_name_argument(attr)? {
            Some(explicit) => explicit,
            None => (field_name.to_string(), field_name.span()),
        };
        validate_column_name_syn(&column_name, span)?;

        let ty = &field.ty;
        // Normalize type string by removing all whitespace for consistent matching
        let rust_type = quote!(#ty).to_string().replace(' ', "");
        let semantic_type = rust_type_to_semantic_type(&rust_type);

        fields.push(MarkedField {
            ident: field_name.clone(),
            kind,
            column: column_name,
            rust_type,
            semantic_type,
        });
    }

    Ok(FieldInfo { fields })
}

fn find_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

/// Reads the optional `name = "..."` argument of a marker attribute
fn parse_name_argument(attr: &Attribute) -> Result<Option<(String, proc_macro2::Span)>> {
    match &attr.meta {
        Meta::Path(_) => Ok(None),
        Meta::List(_) => {
            let mut name = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    name = Some((value.value(), value.span()));
                    Ok(())
                } else {
                    Err(meta.error("unsupported argument, expected `name = \"...\"`"))
                }
            })?;
            Ok(name)
        }
        Meta::NameValue(meta) => Err(Error::new_spanned(
            meta,
            "expected a list argument such as `(name = \"...\")`",
        )),
    }
}
