//! MySQL dialect provider.

use std::sync::Arc;

use crate::convert::{
    BlobConverter, ConverterRegistry, DateConverter, DateTimeConverter, DecimalConverter,
    FloatConverter, IntegerBoolConverter, IntegerConverter, JsonConverter, TextConverter,
    TextFallbackConverter, TimeConverter, UuidTextConverter,
};
use crate::dialect::{Dialect, IdentityRetrieval};
use crate::schema::{ColumnDefinition, TypeTag};

pub struct MySqlDialect {
    converters: ConverterRegistry,
}

impl Default for MySqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl MySqlDialect {
    pub fn new() -> Self {
        let mut converters =
            ConverterRegistry::new(Arc::new(TextFallbackConverter::new("TEXT")));
        converters.register(
            TypeTag::Bool,
            Arc::new(IntegerBoolConverter::new("TINYINT(1)")),
        );
        converters.register(TypeTag::Int, Arc::new(IntegerConverter::new("INT")));
        converters.register(TypeTag::BigInt, Arc::new(IntegerConverter::new("BIGINT")));
        converters.register(TypeTag::Float, Arc::new(FloatConverter::new("FLOAT")));
        converters.register(TypeTag::Double, Arc::new(FloatConverter::new("DOUBLE")));
        converters.register(TypeTag::Decimal, Arc::new(DecimalConverter::new("DECIMAL")));
        converters.register(TypeTag::Text, Arc::new(TextConverter::new("TEXT")));
        converters.register(TypeTag::Bytes, Arc::new(BlobConverter::new("BLOB")));
        converters.register(TypeTag::Uuid, Arc::new(UuidTextConverter::new("CHAR(36)")));
        converters.register(TypeTag::Date, Arc::new(DateConverter::new("DATE")));
        converters.register(TypeTag::Time, Arc::new(TimeConverter::new("TIME")));
        converters.register(
            TypeTag::DateTime,
            Arc::new(DateTimeConverter::new("DATETIME")),
        );
        converters.register(TypeTag::Json, Arc::new(JsonConverter::new("JSON")));
        Self { converters }
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_chars(&self) -> (char, char) {
        ('`', '`')
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn supports_returning(&self) -> bool {
        false
    }

    fn supports_multiple_statements(&self) -> bool {
        true
    }

    fn identity_retrieval(&self) -> IdentityRetrieval {
        IdentityRetrieval::FollowUpQuery
    }

    fn last_insert_id_sql(&self) -> Option<&'static str> {
        Some("SELECT LAST_INSERT_ID()")
    }

    fn function_name(&self, name: &str) -> Option<&'static str> {
        match name {
            // CHAR_LENGTH counts characters; LENGTH counts bytes here.
            "length" => Some("CHAR_LENGTH"),
            "upper" => Some("UPPER"),
            "lower" => Some("LOWER"),
            "trim" => Some("TRIM"),
            "abs" => Some("ABS"),
            "coalesce" => Some("COALESCE"),
            _ => None,
        }
    }

    fn identity_column_sql(&self, column: &ColumnDefinition) -> String {
        let base = match column.type_tag {
            TypeTag::Int => "INT",
            _ => "BIGINT",
        };
        format!(
            "{} {} NOT NULL AUTO_INCREMENT PRIMARY KEY",
            self.quote_identifier(&column.name),
            base
        )
    }
}
