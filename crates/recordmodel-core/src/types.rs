//! Column types and value casting.

use crate::error::{Error, Result};
use crate::value::Value;

/// The SQL type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// BOOLEAN.
    Boolean,
    /// SMALLINT (16-bit).
    SmallInt,
    /// INTEGER (32-bit).
    Integer,
    /// BIGINT (64-bit).
    BigInt,
    /// DOUBLE PRECISION.
    Double,
    /// TEXT.
    Text,
    /// BLOB / BYTEA.
    Bytes,
}

impl ColumnType {
    /// The SQL name of this type.
    #[must_use]
    pub const fn sql_name(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Double => "DOUBLE PRECISION",
            ColumnType::Text => "TEXT",
            ColumnType::Bytes => "BLOB",
        }
    }

    /// Cast `value` to this column type.
    ///
    /// Integer variants widen losslessly and narrow only when the content
    /// fits. `Null` passes through untouched; nullability is the attribute
    /// writer's concern, not the cast's. Anything else is a `TypeCast` error
    /// naming `column`.
    pub fn cast(&self, column: &str, value: Value) -> Result<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        match (self, value) {
            (ColumnType::Boolean, Value::Bool(b)) => Ok(Value::Bool(b)),
            // Drivers commonly hand booleans back as 0/1 integers.
            (ColumnType::Boolean, v) if v.as_i64() == Some(0) => Ok(Value::Bool(false)),
            (ColumnType::Boolean, v) if v.as_i64() == Some(1) => Ok(Value::Bool(true)),

            (ColumnType::SmallInt, v) => match v.as_i64() {
                Some(i) => i16::try_from(i).map(Value::SmallInt).map_err(|_| {
                    Error::type_cast(column, self.sql_name(), v, "out of range for SMALLINT")
                }),
                None => Err(self.mismatch(column, v)),
            },
            (ColumnType::Integer, v) => match v.as_i64() {
                Some(i) => i32::try_from(i).map(Value::Int).map_err(|_| {
                    Error::type_cast(column, self.sql_name(), v, "out of range for INTEGER")
                }),
                None => Err(self.mismatch(column, v)),
            },
            (ColumnType::BigInt, v) => match v.as_i64() {
                Some(i) => Ok(Value::BigInt(i)),
                None => Err(self.mismatch(column, v)),
            },

            (ColumnType::Double, Value::Double(f)) => Ok(Value::Double(f)),
            (ColumnType::Double, v) => match v.as_i64() {
                Some(i) => Ok(Value::Double(i as f64)),
                None => Err(self.mismatch(column, v)),
            },

            (ColumnType::Text, Value::Text(s)) => Ok(Value::Text(s)),
            (ColumnType::Bytes, Value::Bytes(b)) => Ok(Value::Bytes(b)),

            (_, v) => Err(self.mismatch(column, v)),
        }
    }

    fn mismatch(&self, column: &str, value: Value) -> Error {
        let message = format!("got {}", value.kind_name());
        Error::type_cast(column, self.sql_name(), value, message)
    }
}
