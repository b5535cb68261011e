//! Unified type mapping between Rust field types and MySQL columns
//! This crate provides the mapping logic shared by the derive macro and the runtime

pub mod convert;
pub mod sql;
pub mod types;

pub use convert::{ConversionError, FromSqlValue, ToSqlValue};
pub use sql::{rust_type_to_semantic_type, semantic_type_to_sql};
pub use types::{SemanticType, SqlValue};
