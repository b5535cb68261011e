//! Statement templates for one mapped table

use super::predicate::Predicate;
use super::statement::Statement;
use crate::metadata::EntityDescriptor;
use type_mapping::SqlValue;

/// Builds SELECT / INSERT / UPDATE / DELETE statements for a descriptor
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder<'d> {
    descriptor: &'d EntityDescriptor,
}

impl<'d> QueryBuilder<'d> {
    pub fn new(descriptor: &'d EntityDescriptor) -> Self {
        Self { descriptor }
    }

    /// `SELECT * FROM <table> [WHERE <predicate>]`
    pub fn select(&self, predicate: Option<&Predicate>) -> Statement {
        self.filtered(format!("SELECT * FROM {}", self.table()), predicate)
    }

    /// `SELECT * FROM <table> [WHERE <predicate>] LIMIT 1`
    pub fn select_first(&self, predicate: Option<&Predicate>) -> Statement {
        let statement = self.select(predicate);
        let sql = format!("{} LIMIT 1", statement.sql());
        Statement::new(sql).bind_all(statement.params().to_vec())
    }

    /// `INSERT INTO <table> (<c1>, <c2>) VALUES (?, ?)`
    pub fn insert(&self, values: Vec<(&str, SqlValue)>) -> Statement {
        let columns: Vec<&str> = values.iter().map(|(column, _)| *column).collect();
        let placeholders = vec!["?"; values.len()];

        Statement::new(format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table(),
            columns.join(", "),
            placeholders.join(", ")
        ))
        .bind_all(values.into_iter().map(|(_, value)| value))
    }

    /// `UPDATE <table> SET <c1> = ?, <c2> = ? WHERE <pk> = ?`
    ///
    /// Returns `None` when there is nothing to assign.
    pub fn update(&self, values: Vec<(&str, SqlValue)>, primary_key: i64) -> Option<Statement> {
        if values.is_empty() {
            return None;
        }

        let assignments: Vec<String> = values
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect();

        let statement = Statement::new(format!(
            "UPDATE {} SET {} WHERE {} = ?",
            self.table(),
            assignments.join(", "),
            self.descriptor.primary_key().name
        ))
        .bind_all(values.into_iter().map(|(_, value)| value))
        .bind(primary_key);

        Some(statement)
    }

    /// `DELETE FROM <table> WHERE <predicate>`
    pub fn delete(&self, predicate: &Predicate) -> Statement {
        self.filtered(format!("DELETE FROM {}", self.table()), Some(predicate))
    }

    /// Primary-key equality predicate with the id bound
    pub fn primary_key_equals(&self, id: i64) -> Predicate {
        Predicate::equals(&self.descriptor.primary_key().name, id)
    }

    fn table(&self) -> &str {
        self.descriptor.table_name()
    }

    fn filtered(&self, base: String, predicate: Option<&Predicate>) -> Statement {
        match predicate {
            Some(predicate) => {
                Statement::new(format!("{} WHERE {}", base, predicate.text()))
                    .bind_all(predicate.params().to_vec())
            }
            None => Statement::new(base),
        }
    }
}
