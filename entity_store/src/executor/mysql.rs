//! MySQL executor backed by a single `sqlx::MySqlConnection`

use super::{DatabaseExecutor, ExecOutcome, ResultRow};
use crate::query_builder::Statement;
use async_trait::async_trait;
use sqlx::mysql::{MySql, MySqlArguments, MySqlColumn, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column, MySqlConnection, Row, TypeInfo, ValueRef};
use type_mapping::SqlValue;

#[async_trait]
impl DatabaseExecutor for MySqlConnection {
    async fn execute(&mut self, statement: &Statement) -> Result<ExecOutcome, sqlx::Error> {
        crate::trace_log!("execute: {}", statement);
        let result = bind_params(sqlx::query(statement.sql()), statement.params())
            .execute(&mut *self)
            .await?;

        let last_insert_id = match result.last_insert_id() {
            0 => None,
            id => Some(id),
        };

        Ok(ExecOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id,
        })
    }

    async fn fetch_all(&mut self, statement: &Statement) -> Result<Vec<ResultRow>, sqlx::Error> {
        crate::trace_log!("fetch_all: {}", statement);
        let rows = bind_params(sqlx::query(statement.sql()), statement.params())
            .fetch_all(&mut *self)
            .await?;

        rows.iter().map(decode_row).collect()
    }
}

fn bind_params<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    params: &'q [SqlValue],
) -> Query<'q, MySql, MySqlArguments> {
    for param in params {
        query = match param {
            SqlValue::Integer(value) => query.bind(*value),
            SqlValue::Text(value) => query.bind(value.as_str()),
            SqlValue::Null => query.bind(None::<String>),
        };
    }
    query
}

/// How a result column is read, by the type name the server reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Signed,
    Unsigned,
    Float,
    Double,
    Text,
    Binary,
    /// No decoder here (DECIMAL, DATETIME, JSON, ...); the cell is left out of the row
    Unsupported,
}

fn cell_kind(type_name: &str) -> CellKind {
    let upper = type_name.to_ascii_uppercase();
    let (base, unsigned) = match upper.strip_suffix(" UNSIGNED") {
        Some(base) => (base, true),
        None => (upper.as_str(), false),
    };

    match base {
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "BOOLEAN" if unsigned => {
            CellKind::Unsigned
        }
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "BOOLEAN" => CellKind::Signed,
        "FLOAT" => CellKind::Float,
        "DOUBLE" => CellKind::Double,
        "CHAR" | "VARCHAR" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "ENUM" => {
            CellKind::Text
        }
        // Catalog views may report names as binary strings
        "BINARY" | "VARBINARY" | "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
            CellKind::Binary
        }
        _ => CellKind::Unsupported,
    }
}

fn decode_row(row: &MySqlRow) -> Result<ResultRow, sqlx::Error> {
    let mut decoded = ResultRow::new();
    for column in row.columns() {
        if let Some(value) = decode_cell(row, column)? {
            decoded.push(column.name(), value);
        }
    }
    Ok(decoded)
}

fn decode_cell(row: &MySqlRow, column: &MySqlColumn) -> Result<Option<SqlValue>, sqlx::Error> {
    let index = column.ordinal();
    if row.try_get_raw(index)?.is_null() {
        return Ok(Some(SqlValue::Null));
    }

    let type_name = column.type_info().name();
    let value = match cell_kind(type_name) {
        CellKind::Signed => SqlValue::Integer(row.try_get::<i64, _>(index)?),
        CellKind::Unsigned => {
            let n = row.try_get::<u64, _>(index)?;
            match i64::try_from(n) {
                Ok(n) => SqlValue::Integer(n),
                Err(_) => SqlValue::Text(n.to_string()),
            }
        }
        CellKind::Float => SqlValue::Text(row.try_get::<f32, _>(index)?.to_string()),
        CellKind::Double => SqlValue::Text(row.try_get::<f64, _>(index)?.to_string()),
        CellKind::Text => SqlValue::Text(row.try_get::<String, _>(index)?),
        CellKind::Binary => {
            let bytes = row.try_get::<Vec<u8>, _>(index)?;
            SqlValue::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        CellKind::Unsupported => {
            crate::trace_log!("skipping column {} of type {}", column.name(), type_name);
            return Ok(None);
        }
    };

    Ok(Some(value))
}
