//! Stock converters shared by the built-in dialect providers.
//!
//! Each converter is a small unit parameterized by the column type name it
//! targets, so one implementation serves several engines (SQLite stores a
//! UUID in a TEXT column, MySQL in CHAR(36); same conversion either way).

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::convert::{SqlValue, TypeConverter};
use crate::error::{ForgeError, ForgeResult};
use crate::value::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

fn mismatch(value: &Value, column_type: &str) -> ForgeError {
    ForgeError::unsupported_type(value.kind(), column_type)
}

fn raw_mismatch(kind: &'static str, column_type: &str) -> ForgeError {
    ForgeError::unsupported_type(kind, column_type)
}

fn raw_kind(raw: &SqlValue) -> &'static str {
    match raw {
        SqlValue::Null => "null",
        SqlValue::Bool(_) => "bool",
        SqlValue::Integer(_) => "integer",
        SqlValue::Real(_) => "real",
        SqlValue::Text(_) => "text",
        SqlValue::Blob(_) => "blob",
    }
}

/// Native boolean column (PostgreSQL).
pub struct BoolConverter {
    column_type: &'static str,
}

impl BoolConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for BoolConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Bool(b) => Ok(SqlValue::Bool(*b)),
            other => Err(mismatch(other, self.column_type)),
        }
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Bool(b) => Ok(Value::Bool(*b)),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}

/// Boolean stored as 0/1 (SQLite, MySQL).
pub struct IntegerBoolConverter {
    column_type: &'static str,
}

impl IntegerBoolConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for IntegerBoolConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
            other => Err(mismatch(other, self.column_type)),
        }
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Integer(n) => Ok(Value::Bool(*n != 0)),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}

pub struct IntegerConverter {
    column_type: &'static str,
}

impl IntegerConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for IntegerConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Int(n) => Ok(SqlValue::Integer(*n)),
            other => Err(mismatch(other, self.column_type)),
        }
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Integer(n) => Ok(Value::Int(*n)),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}

pub struct FloatConverter {
    column_type: &'static str,
}

impl FloatConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for FloatConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Float(n) => Ok(SqlValue::Real(*n)),
            other => Err(mismatch(other, self.column_type)),
        }
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Real(n) => Ok(Value::Float(*n)),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}

/// Decimal carried as text so precision survives both directions.
pub struct DecimalConverter {
    column_type: &'static str,
}

impl DecimalConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for DecimalConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Decimal(d) => Ok(SqlValue::Text(d.to_string())),
            other => Err(mismatch(other, self.column_type)),
        }
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Text(s) => Decimal::from_str(s)
                .map(Value::Decimal)
                .map_err(|_| raw_mismatch("text", self.column_type)),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}

pub struct TextConverter {
    column_type: &'static str,
}

impl TextConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for TextConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Text(s) => Ok(SqlValue::Text(s.clone())),
            other => Err(mismatch(other, self.column_type)),
        }
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Text(s) => Ok(Value::Text(s.clone())),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}

/// Declared fallback for unregistered tags: renders anything textual as
/// text, refuses what has no faithful text form.
pub struct TextFallbackConverter {
    column_type: &'static str,
}

impl TextFallbackConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for TextFallbackConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        let text = match value {
            Value::Null => return Ok(SqlValue::Null),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Text(s) => s.clone(),
            Value::Uuid(u) => u.to_string(),
            Value::Date(d) => d.format(DATE_FORMAT).to_string(),
            Value::Time(t) => t.format(TIME_FORMAT).to_string(),
            Value::DateTime(ts) => ts.to_rfc3339(),
            Value::Json(json) => json.to_string(),
            Value::Bytes(_) | Value::Array(_) => {
                return Err(mismatch(value, self.column_type));
            }
        };
        Ok(SqlValue::Text(text))
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Text(s) => Ok(Value::Text(s.clone())),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}

pub struct BlobConverter {
    column_type: &'static str,
}

impl BlobConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for BlobConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Bytes(b) => Ok(SqlValue::Blob(b.clone())),
            other => Err(mismatch(other, self.column_type)),
        }
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Blob(b) => Ok(Value::Bytes(b.clone())),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}

/// UUID carried as its hyphenated text form.
pub struct UuidTextConverter {
    column_type: &'static str,
}

impl UuidTextConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for UuidTextConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Uuid(u) => Ok(SqlValue::Text(u.to_string())),
            other => Err(mismatch(other, self.column_type)),
        }
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Text(s) => Uuid::parse_str(s)
                .map(Value::Uuid)
                .map_err(|_| raw_mismatch("text", self.column_type)),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}

pub struct DateConverter {
    column_type: &'static str,
}

impl DateConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for DateConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Date(d) => Ok(SqlValue::Text(d.format(DATE_FORMAT).to_string())),
            other => Err(mismatch(other, self.column_type)),
        }
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Text(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map(Value::Date)
                .map_err(|_| raw_mismatch("text", self.column_type)),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}

pub struct TimeConverter {
    column_type: &'static str,
}

impl TimeConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for TimeConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Time(t) => Ok(SqlValue::Text(t.format(TIME_FORMAT).to_string())),
            other => Err(mismatch(other, self.column_type)),
        }
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Text(s) => NaiveTime::parse_from_str(s, TIME_FORMAT)
                .map(Value::Time)
                .map_err(|_| raw_mismatch("text", self.column_type)),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}

/// UTC timestamp carried as RFC 3339 text.
pub struct DateTimeConverter {
    column_type: &'static str,
}

impl DateTimeConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for DateTimeConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::DateTime(ts) => Ok(SqlValue::Text(ts.to_rfc3339())),
            other => Err(mismatch(other, self.column_type)),
        }
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Text(s) => DateTime::parse_from_rfc3339(s)
                .map(|ts| Value::DateTime(ts.with_timezone(&Utc)))
                .map_err(|_| raw_mismatch("text", self.column_type)),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}

/// JSON document carried as compact text.
pub struct JsonConverter {
    column_type: &'static str,
}

impl JsonConverter {
    pub const fn new(column_type: &'static str) -> Self {
        Self { column_type }
    }
}

impl TypeConverter for JsonConverter {
    fn column_type(&self) -> &str {
        self.column_type
    }

    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue> {
        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Json(json) => Ok(SqlValue::Text(json.to_string())),
            other => Err(mismatch(other, self.column_type)),
        }
    }

    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value> {
        match raw {
            SqlValue::Null => Ok(Value::Null),
            SqlValue::Text(s) => serde_json::from_str(s)
                .map(Value::Json)
                .map_err(|_| raw_mismatch("text", self.column_type)),
            other => Err(raw_mismatch(raw_kind(other), self.column_type)),
        }
    }
}
