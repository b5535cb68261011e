//! Schema synchronization
//!
//! Aligns the live table with a descriptor: creates the table when it is
//! missing, otherwise adds every descriptor column the table lacks.
//!
//! Existing columns are never dropped, renamed or retyped. Renaming a mapped
//! field therefore adds a new column and leaves the old one orphaned.
//! Statements run one by one without a transaction, so a failure part-way
//! through leaves the earlier ALTERs applied. The catalog lookup and the DDL
//! that follows are not locked against concurrent synchronizers.

use crate::errors::EntityError;
use crate::executor::{DatabaseExecutor, ResultRow};
use crate::metadata::{ColumnDescriptor, EntityDescriptor};
use crate::query_builder::Statement;
use std::collections::HashSet;
use type_mapping::SqlValue;

const TABLE_EXISTS_SQL: &str = "SELECT TABLE_NAME FROM information_schema.TABLES \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?";

const TABLE_COLUMNS_SQL: &str = "SELECT COLUMN_NAME FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// The table did not exist and was created
    Created,
    /// Missing columns were added to an existing table
    Migrated,
    /// The existing table already had every column
    UpToDate,
}

/// Outcome of one synchronization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub table: String,
    pub action: SyncAction,
    /// Columns added by ALTER TABLE, in descriptor order
    pub added_columns: Vec<String>,
    /// Table columns the descriptor no longer maps
    pub orphaned_columns: Vec<String>,
}

pub struct SchemaSynchronizer<'d> {
    descriptor: &'d EntityDescriptor,
}

impl<'d> SchemaSynchronizer<'d> {
    pub fn new(descriptor: &'d EntityDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn table_exists_query(&self) -> Statement {
        Statement::new(TABLE_EXISTS_SQL).bind(self.descriptor.table_name())
    }

    pub fn table_columns_query(&self) -> Statement {
        Statement::new(TABLE_COLUMNS_SQL).bind(self.descriptor.table_name())
    }

    /// CREATE TABLE with the auto-incrementing primary key first
    pub fn create_table(&self) -> Statement {
        let primary_key = self.descriptor.primary_key();
        let definitions: Vec<String> = std::iter::once(format!(
            "{} {} PRIMARY KEY AUTO_INCREMENT",
            primary_key.name,
            primary_key.semantic_type.sql_type()
        ))
        .chain(self.descriptor.columns().iter().map(ColumnDescriptor::definition))
        .collect();

        Statement::new(format!(
            "CREATE TABLE {} ({})",
            self.descriptor.table_name(),
            definitions.join(", ")
        ))
    }

    pub fn add_column(&self, column: &ColumnDescriptor) -> Statement {
        Statement::new(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            self.descriptor.table_name(),
            column.definition()
        ))
    }

    /// Descriptor columns (primary key included) absent from `existing`
    pub fn missing_columns(&self, existing: &[String]) -> Vec<&'d ColumnDescriptor> {
        let existing: HashSet<String> = existing.iter().map(|c| c.to_ascii_lowercase()).collect();
        self.descriptor
            .all_columns()
            .filter(|column| !existing.contains(&column.name.to_ascii_lowercase()))
            .collect()
    }

    /// Columns of `existing` the descriptor does not map
    pub fn orphaned_columns(&self, existing: &[String]) -> Vec<String> {
        existing
            .iter()
            .filter(|name| self.descriptor.column(name).is_none())
            .cloned()
            .collect()
    }

    pub async fn synchronize<E>(&self, executor: &mut E) -> Result<SyncReport, EntityError>
    where
        E: DatabaseExecutor + ?Sized,
    {
        let table = self.descriptor.table_name();

        let found = executor
            .fetch_all(&self.table_exists_query())
            .await
            .map_err(|e| EntityError::database_operation(table, "table lookup", e))?;

        if found.is_empty() {
            let statement = self.create_table();
            tracing::info!("Creating table {}: {}", table, statement.sql());
            executor
                .execute(&statement)
                .await
                .map_err(|e| EntityError::database_operation(table, "create table", e))?;

            return Ok(SyncReport {
                table: table.to_string(),
                action: SyncAction::Created,
                added_columns: Vec::new(),
                orphaned_columns: Vec::new(),
            });
        }

        let rows = executor
            .fetch_all(&self.table_columns_query())
            .await
            .map_err(|e| EntityError::database_operation(table, "column lookup", e))?;
        let existing = column_names(&rows);

        let orphaned_columns = self.orphaned_columns(&existing);
        if !orphaned_columns.is_empty() {
            tracing::warn!(
                "Table {} has columns no longer mapped by {}: {}",
                table,
                self.descriptor.type_name(),
                orphaned_columns.join(", ")
            );
        }

        let mut added_columns = Vec::new();
        for column in self.missing_columns(&existing) {
            let statement = self.add_column(column);
            tracing::info!("Adding column {}.{}: {}", table, column.name, statement.sql());
            executor
                .execute(&statement)
                .await
                .map_err(|e| EntityError::database_operation(table, "add column", e))?;
            added_columns.push(column.name.clone());
        }

        let action = if added_columns.is_empty() {
            SyncAction::UpToDate
        } else {
            SyncAction::Migrated
        };

        Ok(SyncReport {
            table: table.to_string(),
            action,
            added_columns,
            orphaned_columns,
        })
    }
}

fn column_names(rows: &[ResultRow]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| match row.get("COLUMN_NAME").or_else(|| row.first()) {
            Some(SqlValue::Text(name)) => Some(name.clone()),
            _ => None,
        })
        .collect()
}
