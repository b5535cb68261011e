//! Hand-registered entities shared by the unit tests

use crate::metadata::{Entity, EntityDescriptor, EntitySchema, FieldMarker, FieldSchema};
use type_mapping::{ConversionError, FromSqlValue, SemanticType, SqlValue, ToSqlValue};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    /// Marked but unmapped: never stored or read
    pub active: bool,
}

impl Employee {
    pub fn new(first_name: &str, last_name: &str, age: i32) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age,
            ..Self::default()
        }
    }
}

impl Entity for Employee {
    fn entity_schema() -> &'static EntitySchema {
        static SCHEMA: EntitySchema = EntitySchema {
            type_name: "Employee",
            table_name: Some("employees"),
            fields: &[
                FieldSchema {
                    field: "id",
                    marker: FieldMarker::PrimaryKey("id"),
                    rust_type: "i64",
                    semantic_type: Some(SemanticType::Integer),
                },
                FieldSchema {
                    field: "first_name",
                    marker: FieldMarker::Column("first_name"),
                    rust_type: "String",
                    semantic_type: Some(SemanticType::Text),
                },
                FieldSchema {
                    field: "last_name",
                    marker: FieldMarker::Column("last_name"),
                    rust_type: "String",
                    semantic_type: Some(SemanticType::Text),
                },
                FieldSchema {
                    field: "age",
                    marker: FieldMarker::Column("age"),
                    rust_type: "i32",
                    semantic_type: Some(SemanticType::Integer),
                },
                FieldSchema {
                    field: "active",
                    marker: FieldMarker::Column("active"),
                    rust_type: "bool",
                    semantic_type: None,
                },
            ],
        };
        &SCHEMA
    }

    fn read_field(&self, field: &str) -> Option<SqlValue> {
        match field {
            "id" => Some(self.id.to_sql_value()),
            "first_name" => Some(self.first_name.to_sql_value()),
            "last_name" => Some(self.last_name.to_sql_value()),
            "age" => Some(self.age.to_sql_value()),
            _ => None,
        }
    }

    fn write_field(&mut self, field: &str, value: SqlValue) -> Result<(), ConversionError> {
        match field {
            "id" => self.id = FromSqlValue::from_sql_value(value)?,
            "first_name" => self.first_name = FromSqlValue::from_sql_value(value)?,
            "last_name" => self.last_name = FromSqlValue::from_sql_value(value)?,
            "age" => self.age = FromSqlValue::from_sql_value(value)?,
            other => return Err(ConversionError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

pub fn employee_descriptor() -> EntityDescriptor {
    EntityDescriptor::from_schema(Employee::entity_schema()).expect("valid employee schema")
}
