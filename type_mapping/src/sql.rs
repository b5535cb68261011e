//! SQL type conversion utilities
//!
//! This module handles conversion between Rust type names
//! and their semantic and SQL equivalents.

use crate::types::SemanticType;

/// Map Rust type names to semantic column types.
///
/// Whole-number types that widen losslessly to `i64` map to `Integer`,
/// `String` maps to `Text`. Any other type is not mapped.
pub fn rust_type_to_semantic_type(rust_type: &str) -> Option<SemanticType> {
    // Normalize type string by removing all whitespace for consistent matching
    let normalized = rust_type.replace(' ', "");
    let unqualified = normalized
        .strip_prefix("std::primitive::")
        .or_else(|| normalized.strip_prefix("core::primitive::"))
        .unwrap_or(&normalized);
    match unqualified {
        "i8" | "i16" | "i32" | "i64" | "isize" => Some(SemanticType::Integer),
        "u8" | "u16" | "u32" => Some(SemanticType::Integer),
        "String" | "std::string::String" | "alloc::string::String" => Some(SemanticType::Text),
        _ => None,
    }
}

/// Map semantic types to MySQL column types for DDL generation
pub fn semantic_type_to_sql(semantic_type: SemanticType) -> &'static str {
    match semantic_type {
        SemanticType::Integer => "INT",
        SemanticType::Text => "VARCHAR(255)",
    }
}
