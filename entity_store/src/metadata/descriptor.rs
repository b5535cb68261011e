//! Metadata extraction
//!
//! Turns the declared [`EntitySchema`] of a mapped type into the resolved
//! table/column mapping used by the synchronizer, query builder and materializer.

use super::{EntitySchema, FieldMarker, FieldSchema};
use crate::errors::ConfigurationError;
use crate::validation::ValidatedIdentifier;
use std::collections::HashSet;
use type_mapping::SemanticType;

/// Opaque handle to a field of the mapped type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldRef(&'static str);

impl FieldRef {
    pub fn name(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub semantic_type: SemanticType,
    pub field: FieldRef,
}

impl ColumnDescriptor {
    /// Column definition used by CREATE TABLE and ALTER TABLE
    pub fn definition(&self) -> String {
        format!("{} {}", self.name, self.semantic_type.sql_type())
    }
}

/// Resolved table mapping of one mapped type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    type_name: &'static str,
    table_name: String,
    primary_key: ColumnDescriptor,
    columns: Vec<ColumnDescriptor>,
}

impl EntityDescriptor {
    /// Resolve a declared schema.
    ///
    /// Exactly one primary key is required and it must map to an integer.
    /// Column fields whose type has no mapping are skipped.
    pub fn from_schema(schema: &EntitySchema) -> Result<Self, ConfigurationError> {
        let type_name = schema.type_name;

        let primary_keys: Vec<&FieldSchema> = schema
            .fields
            .iter()
            .filter(|f| matches!(f.marker, FieldMarker::PrimaryKey(_)))
            .collect();

        let pk_field = match primary_keys.as_slice() {
            [] => return Err(ConfigurationError::MissingPrimaryKey { type_name }),
            [single] => *single,
            many => {
                return Err(ConfigurationError::AmbiguousPrimaryKey {
                    type_name,
                    fields: many.iter().map(|f| f.field).collect(),
                })
            }
        };

        if pk_field.semantic_type != Some(SemanticType::Integer) {
            return Err(ConfigurationError::NonIntegerPrimaryKey {
                type_name,
                field: pk_field.field,
                rust_type: pk_field.rust_type,
            });
        }

        let table_name = match schema.table_name {
            Some(name) => name.to_string(),
            None => default_table_name(type_name),
        };
        let table_name = validate(type_name, &table_name)?;

        let primary_key = ColumnDescriptor {
            name: validate(type_name, pk_field.marker.column_name())?,
            semantic_type: SemanticType::Integer,
            field: FieldRef(pk_field.field),
        };

        let mut seen = HashSet::new();
        seen.insert(primary_key.name.to_ascii_lowercase());

        let mut columns = Vec::new();
        for field in schema.fields {
            let FieldMarker::Column(column_name) = field.marker else {
                continue;
            };
            let Some(semantic_type) = field.semantic_type else {
                crate::trace_log!(
                    "Skipping {}.{}: type {} has no column mapping",
                    type_name,
                    field.field,
                    field.rust_type
                );
                continue;
            };

            let name = validate(type_name, column_name)?;
            // MySQL column names are case-insensitive
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(ConfigurationError::DuplicateColumn {
                    type_name,
                    column: name,
                });
            }

            columns.push(ColumnDescriptor {
                name,
                semantic_type,
                field: FieldRef(field.field),
            });
        }

        Ok(Self {
            type_name,
            table_name,
            primary_key,
            columns,
        })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn primary_key(&self) -> &ColumnDescriptor {
        &self.primary_key
    }

    /// Mapped non-key columns in declaration order
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Primary key followed by every mapped column
    pub fn all_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        std::iter::once(&self.primary_key).chain(self.columns.iter())
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.all_columns()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Lower-cased type name with a trailing "s"
pub fn default_table_name(type_name: &str) -> String {
    format!("{}s", type_name.to_lowercase())
}

fn validate(type_name: &'static str, name: &str) -> Result<String, ConfigurationError> {
    ValidatedIdentifier::new(name)
        .map(ValidatedIdentifier::into_string)
        .map_err(|source| ConfigurationError::InvalidIdentifier { type_name, source })
}
