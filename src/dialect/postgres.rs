//! PostgreSQL dialect provider.

use std::sync::Arc;

use crate::convert::{
    BlobConverter, BoolConverter, ConverterRegistry, DateConverter, DateTimeConverter,
    DecimalConverter, FloatConverter, IntegerConverter, JsonConverter, TextConverter,
    TextFallbackConverter, TimeConverter, UuidTextConverter,
};
use crate::dialect::{Dialect, IdentityRetrieval};
use crate::schema::{ColumnDefinition, TypeTag};

pub struct PostgresDialect {
    converters: ConverterRegistry,
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl PostgresDialect {
    pub fn new() -> Self {
        let mut converters =
            ConverterRegistry::new(Arc::new(TextFallbackConverter::new("TEXT")));
        converters.register(TypeTag::Bool, Arc::new(BoolConverter::new("BOOLEAN")));
        converters.register(TypeTag::Int, Arc::new(IntegerConverter::new("INTEGER")));
        converters.register(TypeTag::BigInt, Arc::new(IntegerConverter::new("BIGINT")));
        converters.register(TypeTag::Float, Arc::new(FloatConverter::new("REAL")));
        converters.register(
            TypeTag::Double,
            Arc::new(FloatConverter::new("DOUBLE PRECISION")),
        );
        converters.register(TypeTag::Decimal, Arc::new(DecimalConverter::new("NUMERIC")));
        converters.register(TypeTag::Text, Arc::new(TextConverter::new("TEXT")));
        converters.register(TypeTag::Bytes, Arc::new(BlobConverter::new("BYTEA")));
        converters.register(TypeTag::Uuid, Arc::new(UuidTextConverter::new("UUID")));
        converters.register(TypeTag::Date, Arc::new(DateConverter::new("DATE")));
        converters.register(TypeTag::Time, Arc::new(TimeConverter::new("TIME")));
        converters.register(
            TypeTag::DateTime,
            Arc::new(DateTimeConverter::new("TIMESTAMPTZ")),
        );
        converters.register(TypeTag::Json, Arc::new(JsonConverter::new("JSONB")));
        Self { converters }
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_chars(&self) -> (char, char) {
        ('"', '"')
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${index}")
    }

    fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn supports_returning(&self) -> bool {
        true
    }

    fn identity_retrieval(&self) -> IdentityRetrieval {
        IdentityRetrieval::Returning
    }

    fn identity_column_sql(&self, column: &ColumnDefinition) -> String {
        let serial = match column.type_tag {
            TypeTag::BigInt => "BIGSERIAL",
            _ => "SERIAL",
        };
        format!(
            "{} {} PRIMARY KEY",
            self.quote_identifier(&column.name),
            serial
        )
    }
}
