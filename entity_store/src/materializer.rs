//! Result materialization
//!
//! Converts decoded rows into fresh instances of the mapped type.

use crate::errors::EntityError;
use crate::executor::ResultRow;
use crate::metadata::{ColumnDescriptor, Entity, EntityDescriptor};
use type_mapping::ConversionError;

/// Materialize every row, preserving row order
pub fn materialize_all<T: Entity>(
    descriptor: &EntityDescriptor,
    rows: Vec<ResultRow>,
) -> Result<Vec<T>, EntityError> {
    rows.iter()
        .map(|row| materialize::<T>(descriptor, row))
        .collect()
}

/// Build one instance from a row.
///
/// Result columns outside the descriptor are ignored; descriptor columns
/// missing from the row leave the field at its default.
pub fn materialize<T: Entity>(
    descriptor: &EntityDescriptor,
    row: &ResultRow,
) -> Result<T, EntityError> {
    let mut entity = T::default();

    for column in descriptor.all_columns() {
        let Some(value) = row.get(&column.name) else {
            continue;
        };
        assign(&mut entity, descriptor, column, value.clone())?;
    }

    Ok(entity)
}

fn assign<T: Entity>(
    entity: &mut T,
    descriptor: &EntityDescriptor,
    column: &ColumnDescriptor,
    value: type_mapping::SqlValue,
) -> Result<(), EntityError> {
    let shown = value.to_string();
    let coerced = value.coerce(column.semantic_type).ok_or_else(|| {
        EntityError::conversion(
            descriptor.table_name(),
            &column.name,
            ConversionError::InvalidText {
                value: shown,
                target: "integer column",
            },
        )
    })?;

    entity
        .write_field(column.field.name(), coerced)
        .map_err(|e| EntityError::conversion(descriptor.table_name(), &column.name, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{employee_descriptor, Employee};
    use type_mapping::SqlValue;

    fn row(id: i64, first: &str, last: &str, age: i64) -> ResultRow {
        ResultRow::new()
            .with("id", id)
            .with("first_name", first)
            .with("last_name", last)
            .with("age", age)
    }

    #[test]
    fn test_materialize_full_row() {
        let descriptor = employee_descriptor();
        let employee: Employee = materialize(&descriptor, &row(3, "Ann", "Lee", 31)).unwrap();

        assert_eq!(
            employee,
            Employee {
                id: 3,
                first_name: "Ann".to_string(),
                last_name: "Lee".to_string(),
                age: 31,
                active: false,
            }
        );
    }

    #[test]
    fn test_materialize_preserves_row_order() {
        let descriptor = employee_descriptor();
        let rows = vec![row(2, "Peter", "Pan", 12), row(1, "Paula", "Abdul", 40)];
        let employees: Vec<Employee> = materialize_all(&descriptor, rows).unwrap();

        let ids: Vec<i64> = employees.iter().map(|e| e.id).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let descriptor = employee_descriptor();
        let row = row(1, "Ann", "Lee", 31)
            .with("salary", 5000i64)
            .with("active", 1i64);
        let employee: Employee = materialize(&descriptor, &row).unwrap();

        assert_eq!(employee.first_name, "Ann");
        assert!(!employee.active);
    }

    #[test]
    fn test_missing_columns_keep_defaults() {
        let descriptor = employee_descriptor();
        let row = ResultRow::new().with("id", 9i64).with("first_name", "Ann");
        let employee: Employee = materialize(&descriptor, &row).unwrap();

        assert_eq!(employee.id, 9);
        assert_eq!(employee.last_name, "");
        assert_eq!(employee.age, 0);
    }

    #[test]
    fn test_null_cells_yield_defaults() {
        let descriptor = employee_descriptor();
        let row = ResultRow::new()
            .with("id", 4i64)
            .with("last_name", SqlValue::Null)
            .with("age", SqlValue::Null);
        let employee: Employee = materialize(&descriptor, &row).unwrap();

        assert_eq!(employee.last_name, "");
        assert_eq!(employee.age, 0);
    }

    #[test]
    fn test_cells_are_coerced_to_semantic_type() {
        let descriptor = employee_descriptor();
        let row = ResultRow::new()
            .with("id", "5")
            .with("first_name", 77i64)
            .with("age", "41");
        let employee: Employee = materialize(&descriptor, &row).unwrap();

        assert_eq!(employee.id, 5);
        assert_eq!(employee.first_name, "77");
        assert_eq!(employee.age, 41);
    }

    #[test]
    fn test_unconvertible_cell_is_an_error() {
        let descriptor = employee_descriptor();
        let row = ResultRow::new().with("id", 1i64).with("age", "forty");
        let err = materialize::<Employee>(&descriptor, &row).unwrap_err();
        assert!(matches!(err, EntityError::Conversion { ref column, .. } if column == "age"));

        let row = ResultRow::new().with("id", 1i64).with("age", i64::MAX);
        let err = materialize::<Employee>(&descriptor, &row).unwrap_err();
        assert!(matches!(
            err,
            EntityError::Conversion {
                source: ConversionError::OutOfRange { .. },
                ..
            }
        ));
    }
}
