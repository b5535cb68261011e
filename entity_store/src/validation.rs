//! Validation module
//!
//! Table and column names end up verbatim in statement text, so every name
//! is checked here before a descriptor is built.

use std::fmt;
use thiserror::Error;

/// Validation errors for database identifiers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Name contains invalid characters (only alphanumeric and underscore allowed)
    #[error("Invalid characters in name '{0}': only alphanumeric characters and underscores are allowed")]
    InvalidCharacters(String),

    /// Name is too long (MySQL limit is 64 characters)
    #[error("Name '{name}' is too long: {length} characters (max {max_length})")]
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },

    #[error("Name cannot be empty")]
    Empty,

    /// Name starts with invalid character (must start with letter or underscore)
    #[error("Name '{0}' must start with a letter or underscore")]
    InvalidStartCharacter(String),

    #[error("Name '{0}' is a reserved SQL keyword")]
    ReservedKeyword(String),
}

/// A validated identifier (table or column name) that is safe to splice into SQL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedIdentifier(String);

impl ValidatedIdentifier {
    /// MySQL identifier length limit
    pub const MAX_LENGTH: usize = 64;

    pub fn new(name: &str) -> Result<Self, ValidationError> {
        Self::validate_identifier(name)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn validate_identifier(name: &str) -> Result<(), ValidationError> {
        let first_char = name.chars().next().ok_or(ValidationError::Empty)?;

        if name.len() > Self::MAX_LENGTH {
            return Err(ValidationError::TooLong {
                name: name.to_string(),
                length: name.len(),
                max_length: Self::MAX_LENGTH,
            });
        }

        if !first_char.is_ascii_alphabetic() && first_char != '_' {
            return Err(ValidationError::InvalidStartCharacter(name.to_string()));
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::InvalidCharacters(name.to_string()));
        }

        if Self::is_reserved_keyword(name) {
            return Err(ValidationError::ReservedKeyword(name.to_string()));
        }

        Ok(())
    }

    /// Check if a name is a reserved MySQL keyword
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
}

impl fmt::Display for ValidatedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
