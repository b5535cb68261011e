//! SQL statement text with bound parameters

use std::fmt;
use type_mapping::SqlValue;

/// Statement text with `?` placeholders and the values bound to them, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind the next placeholder
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn bind_all(mut self, values: impl IntoIterator<Item = SqlValue>) -> Self {
        self.params.extend(values);
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Statement text with every placeholder replaced by its literal value.
    ///
    /// Diagnostic only: literals are not escaped. Placeholders inside quoted
    /// strings of caller predicates are left alone.
    pub fn interpolated(&self) -> String {
        let mut rendered = String::with_capacity(self.sql.len() + self.params.len() * 8);
        let mut params = self.params.iter();
        let mut in_quotes = false;

        for c in self.sql.chars() {
            match c {
                '\'' => {
                    in_quotes = !in_quotes;
                    rendered.push(c);
                }
                '?' if !in_quotes => match params.next() {
                    Some(value) => rendered.push_str(&value.to_literal()),
                    None => rendered.push(c),
                },
                _ => rendered.push(c),
            }
        }

        rendered
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.interpolated())
    }
}
