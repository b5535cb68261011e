//! Type mapping definitions
//!
//! This module provides the semantic column types and the runtime value
//! representation used for parameter binding and decoded row cells.

use std::fmt;

/// Semantic type of a mapped column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
    Integer,
    Text,
}

impl SemanticType {
    /// SQL column type used in DDL
    pub fn sql_type(self) -> &'static str {
        crate::sql::semantic_type_to_sql(self)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Integer => write!(f, "Integer"),
            SemanticType::Text => write!(f, "Text"),
        }
    }
}

/// A single SQL value, either bound as a statement parameter or read from a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Null,
}

impl SqlValue {
    /// Legacy literal form: text is wrapped in single quotes, everything else
    /// uses its plain text form. Embedded quotes are NOT escaped, so the
    /// result must never be sent to the database.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Integer(value) => value.to_string(),
            SqlValue::Text(value) => format!("'{}'", value),
            SqlValue::Null => "NULL".to_string(),
        }
    }

    /// Coerce the value to the given semantic type.
    ///
    /// Integers become their decimal text, numeric text becomes an integer.
    /// `Null` stays `Null`. Returns `None` when text cannot be parsed as an integer.
    pub fn coerce(self, semantic_type: SemanticType) -> Option<SqlValue> {
        match (self, semantic_type) {
            (SqlValue::Null, _) => Some(SqlValue::Null),
            (value @ SqlValue::Integer(_), SemanticType::Integer) => Some(value),
            (value @ SqlValue::Text(_), SemanticType::Text) => Some(value),
            (SqlValue::Integer(value), SemanticType::Text) => Some(SqlValue::Text(value.to_string())),
            (SqlValue::Text(value), SemanticType::Integer) => {
                value.trim().parse::<i64>().ok().map(SqlValue::Integer)
            }
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Integer(value) => write!(f, "{}", value),
            SqlValue::Text(value) => write!(f, "{}", value),
            SqlValue::Null => write!(f, "NULL"),
        }
    }
}

impl From<String> for SqlValue {
    fn from(val: String) -> Self {
        SqlValue::Text(val)
    }
}

impl From<&str> for SqlValue {
    fn from(val: &str) -> Self {
        SqlValue::Text(val.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(val: i64) -> Self {
        SqlValue::Integer(val)
    }
}

impl From<i32> for SqlValue {
    fn from(val: i32) -> Self {
        SqlValue::Integer(val as i64)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}
