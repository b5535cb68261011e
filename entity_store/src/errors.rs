use crate::validation::ValidationError;
use thiserror::Error;
use type_mapping::ConversionError;

/// Errors raised while resolving a mapped type into an `EntityDescriptor`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Type {type_name} does not declare a primary key field")]
    MissingPrimaryKey { type_name: &'static str },

    #[error("Type {type_name} declares more than one primary key field: {}", .fields.join(", "))]
    AmbiguousPrimaryKey {
        type_name: &'static str,
        fields: Vec<&'static str>,
    },

    #[error("Primary key field {type_name}.{field} has type {rust_type}; an integer type is required")]
    NonIntegerPrimaryKey {
        type_name: &'static str,
        field: &'static str,
        rust_type: &'static str,
    },

    #[error("Type {type_name} maps column '{column}' more than once")]
    DuplicateColumn {
        type_name: &'static str,
        column: String,
    },

    #[error("Type {type_name} has an invalid identifier: {source}")]
    InvalidIdentifier {
        type_name: &'static str,
        #[source]
        source: ValidationError,
    },
}

#[derive(Error, Debug)]
pub enum EntityError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Database error during {operation} on '{table}': {source}")]
    Database {
        operation: &'static str,
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Not found in '{table}'{}", .predicate.as_ref().map(|p| format!(" where {}", p)).unwrap_or_default())]
    NotFound {
        table: String,
        predicate: Option<String>,
    },

    #[error("Cannot read column '{column}' of '{table}': {source}")]
    Conversion {
        table: String,
        column: String,
        #[source]
        source: ConversionError,
    },

    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),
}

impl EntityError {
    pub fn database_operation(table: &str, operation: &'static str, source: sqlx::Error) -> Self {
        EntityError::Database {
            operation,
            table: table.to_string(),
            source,
        }
    }

    pub fn not_found(table: &str, predicate: Option<&str>) -> Self {
        EntityError::NotFound {
            table: table.to_string(),
            predicate: predicate.map(str::to_string),
        }
    }

    pub fn conversion(table: &str, column: &str, source: ConversionError) -> Self {
        EntityError::Conversion {
            table: table.to_string(),
            column: column.to_string(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EntityError::NotFound { .. })
    }
}
