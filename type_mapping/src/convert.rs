//! Conversions between mapped field types and `SqlValue`
//!
//! Generated entity accessors go through these traits, so every type accepted
//! by `rust_type_to_semantic_type` has an implementation here.

use crate::types::SqlValue;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Value {value} does not fit into {target}")]
    OutOfRange { value: i64, target: &'static str },

    #[error("Cannot convert '{value}' into {target}")]
    InvalidText { value: String, target: &'static str },

    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// Convert a field value into a bindable SQL value
pub trait ToSqlValue {
    fn to_sql_value(&self) -> SqlValue;
}

/// Build a field value from a SQL value.
///
/// `SqlValue::Null` always yields the type's default.
pub trait FromSqlValue: Sized {
    fn from_sql_value(value: SqlValue) -> Result<Self, ConversionError>;
}

impl ToSqlValue for String {
    fn to_sql_value(&self) -> SqlValue {
        SqlValue::Text(self.clone())
    }
}

impl FromSqlValue for String {
    fn from_sql_value(value: SqlValue) -> Result<Self, ConversionError> {
        match value {
            SqlValue::Text(text) => Ok(text),
            SqlValue::Integer(number) => Ok(number.to_string()),
            SqlValue::Null => Ok(String::new()),
        }
    }
}

macro_rules! integer_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(&self) -> SqlValue {
                    SqlValue::Integer(*self as i64)
                }
            }

            impl FromSqlValue for $ty {
                fn from_sql_value(value: SqlValue) -> Result<Self, ConversionError> {
                    let number = match value {
                        SqlValue::Integer(number) => number,
                        SqlValue::Null => return Ok(<$ty>::default()),
                        SqlValue::Text(text) => text.trim().parse::<i64>().map_err(|_| {
                            ConversionError::InvalidText {
                                value: text.clone(),
                                target: stringify!($ty),
                            }
                        })?,
                    };
                    <$ty>::try_from(number).map_err(|_| ConversionError::OutOfRange {
                        value: number,
                        target: stringify!($ty),
                    })
                }
            }
        )*
    };
}

integer_conversions!(i8, i16, i32, i64, isize, u8, u16, u32);
