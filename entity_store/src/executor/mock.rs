//! Scripted executor for tests
//!
//! Records every statement it receives and answers from a queue of scripted
//! responses. An empty queue answers with no rows / nothing affected.

use super::{DatabaseExecutor, ExecOutcome, ResultRow};
use crate::query_builder::Statement;
use async_trait::async_trait;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub enum MockResponse {
    Rows(Vec<ResultRow>),
    Outcome(ExecOutcome),
    Error(String),
}

#[derive(Debug, Default)]
pub struct MockExecutor {
    statements: Vec<Statement>,
    responses: VecDeque<MockResponse>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog answer for a table that does not exist yet, plus the CREATE TABLE outcome
    pub fn with_missing_table(mut self) -> Self {
        self.push_rows(Vec::new());
        self.push_outcome(0, None);
        self
    }

    /// Catalog answers for an existing table with the given columns.
    ///
    /// Outcomes for the ALTER statements that follow are not scripted; they
    /// default to nothing affected unless pushed explicitly.
    pub fn with_existing_table(mut self, table: &str, columns: &[&str]) -> Self {
        self.push_rows(vec![ResultRow::new().with("TABLE_NAME", table)]);
        self.push_rows(
            columns
                .iter()
                .map(|column| ResultRow::new().with("COLUMN_NAME", *column))
                .collect(),
        );
        self
    }

    pub fn push_rows(&mut self, rows: Vec<ResultRow>) -> &mut Self {
        self.responses.push_back(MockResponse::Rows(rows));
        self
    }

    pub fn push_outcome(&mut self, rows_affected: u64, last_insert_id: Option<u64>) -> &mut Self {
        self.responses.push_back(MockResponse::Outcome(ExecOutcome {
            rows_affected,
            last_insert_id,
        }));
        self
    }

    pub fn push_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.responses.push_back(MockResponse::Error(message.into()));
        self
    }

    /// Every statement received so far, in order
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Statement texts received so far, in order
    pub fn sql_log(&self) -> Vec<&str> {
        self.statements.iter().map(Statement::sql).collect()
    }

    pub fn last_statement(&self) -> Option<&Statement> {
        self.statements.last()
    }

    fn next_response(&mut self, statement: &Statement) -> Option<MockResponse> {
        self.statements.push(statement.clone());
        self.responses.pop_front()
    }
}

#[async_trait]
impl DatabaseExecutor for MockExecutor {
    async fn execute(&mut self, statement: &Statement) -> Result<ExecOutcome, sqlx::Error> {
        match self.next_response(statement) {
            None => Ok(ExecOutcome::default()),
            Some(MockResponse::Outcome(outcome)) => Ok(outcome),
            Some(MockResponse::Rows(rows)) => Ok(ExecOutcome {
                rows_affected: rows.len() as u64,
                last_insert_id: None,
            }),
            Some(MockResponse::Error(message)) => Err(sqlx::Error::Protocol(message)),
        }
    }

    async fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<ResultRow>, sqlx::Error> {
        match self.next_response(statement) {
            None | Some(MockResponse::Outcome(_)) => Ok(Vec::new()),
            Some(MockResponse::Rows(rows)) => Ok(rows),
            Some(MockResponse::Error(message)) => Err(sqlx::Error::Protocol(message)),
        }
    }
}
