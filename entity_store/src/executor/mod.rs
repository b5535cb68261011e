//! Database execution seam
//!
//! The context never talks to a driver directly; it issues [`Statement`]s
//! through a [`DatabaseExecutor`] and reads back driver-independent rows.

#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod mysql;

use crate::query_builder::Statement;
use async_trait::async_trait;
use type_mapping::SqlValue;

/// Result of a statement that returns no rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    /// Value generated for an AUTO_INCREMENT column, when the driver reports one
    pub last_insert_id: Option<u64>,
}

/// One decoded result row: column names with their values, in select order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRow {
    cells: Vec<(String, SqlValue)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        self.cells.push((column.into(), value.into()));
    }

    /// Look up a cell by column name, ignoring ASCII case
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.cells
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
    }

    /// Value of the first column
    pub fn first(&self) -> Option<&SqlValue> {
        self.cells.first().map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }
}

/// A live, exclusively held database session
#[async_trait]
pub trait DatabaseExecutor: Send {
    /// Execute a statement that returns no rows
    async fn execute(&mut self, statement: &Statement) -> Result<ExecOutcome, sqlx::Error>;

    /// Execute a query and decode every row
    async fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<ResultRow>, sqlx::Error>;
}
