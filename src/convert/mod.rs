//! Bidirectional conversion between native values and column values.
//!
//! A [`TypeConverter`] owns one direction pair: `to_column_value` produces
//! the terminal representation handed to the driver's parameter binding
//! (never SQL-embedded text), and `from_column_value` is its exact inverse
//! for every value it produces. Converters are registered per [`TypeTag`]
//! in a [`ConverterRegistry`]; lookups for unregistered tags silently fall
//! back to the registry's declared text converter.

mod standard;

pub use standard::{
    BlobConverter, BoolConverter, DateConverter, DateTimeConverter, DecimalConverter,
    FloatConverter, IntegerBoolConverter, IntegerConverter, JsonConverter, TextConverter,
    TextFallbackConverter, TimeConverter, UuidTextConverter,
};

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, ForgeResult};
use crate::schema::TypeTag;
use crate::value::Value;

/// The terminal driver-side representation of one bound parameter.
///
/// Null is a distinguished sentinel in both directions: it is never folded
/// into a type's zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

/// One bidirectional native-type ⇄ column-type mapping.
pub trait TypeConverter: Send + Sync {
    /// The DDL type name this converter targets (before length/precision
    /// decoration).
    fn column_type(&self) -> &str;

    /// Convert a native value into the driver-side representation.
    fn to_column_value(&self, value: &Value) -> ForgeResult<SqlValue>;

    /// Exact left inverse of [`Self::to_column_value`] for every value it
    /// produces.
    fn from_column_value(&self, raw: &SqlValue) -> ForgeResult<Value>;
}

/// Per-dialect table of converters keyed by type tag.
pub struct ConverterRegistry {
    converters: HashMap<TypeTag, Arc<dyn TypeConverter>>,
    fallback: Arc<dyn TypeConverter>,
}

impl ConverterRegistry {
    pub fn new(fallback: Arc<dyn TypeConverter>) -> Self {
        Self {
            converters: HashMap::new(),
            fallback,
        }
    }

    /// Store or replace the converter for a type tag.
    pub fn register(&mut self, tag: TypeTag, converter: Arc<dyn TypeConverter>) {
        self.converters.insert(tag, converter);
    }

    /// Look up the converter for a tag. Unknown tags get the fallback text
    /// converter; this never fails.
    pub fn converter_for(&self, tag: TypeTag) -> &dyn TypeConverter {
        self.converters
            .get(&tag)
            .map(Arc::as_ref)
            .unwrap_or(self.fallback.as_ref())
    }

    /// Convert a native value for binding, routed by the value's own tag.
    /// Null passes through as the null sentinel without touching a converter.
    pub fn bind(&self, value: &Value) -> ForgeResult<SqlValue> {
        if value.is_null() {
            return Ok(SqlValue::Null);
        }
        match value.tag() {
            Some(tag) => self.converter_for(tag).to_column_value(value),
            None => Err(ForgeError::unsupported_type(value.kind(), "parameter")),
        }
    }

    /// Convert a native value for binding into a specific column.
    pub fn bind_as(&self, tag: TypeTag, value: &Value) -> ForgeResult<SqlValue> {
        if value.is_null() {
            return Ok(SqlValue::Null);
        }
        self.converter_for(tag).to_column_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_falls_back_to_text() {
        let registry = ConverterRegistry::new(Arc::new(TextFallbackConverter::new("TEXT")));
        let converter = registry.converter_for(TypeTag::Uuid);
        assert_eq!(converter.column_type(), "TEXT");
    }

    #[test]
    fn test_bind_null_is_sentinel() {
        let registry = ConverterRegistry::new(Arc::new(TextFallbackConverter::new("TEXT")));
        assert_eq!(registry.bind(&Value::Null).unwrap(), SqlValue::Null);
    }

    #[test]
    fn test_bind_array_is_rejected() {
        let registry = ConverterRegistry::new(Arc::new(TextFallbackConverter::new("TEXT")));
        let err = registry.bind(&Value::array([1, 2])).unwrap_err();
        assert!(matches!(err, ForgeError::UnsupportedType { value: "array", .. }));
    }
}
