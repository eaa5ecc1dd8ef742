//! SQLite dialect provider.
//!
//! SQLite keeps booleans, UUIDs, and timestamps in its four storage
//! classes, so most converters here target INTEGER or TEXT.

use std::sync::Arc;

use crate::convert::{
    BlobConverter, ConverterRegistry, DateConverter, DateTimeConverter, DecimalConverter,
    FloatConverter, IntegerBoolConverter, IntegerConverter, JsonConverter, TextConverter,
    TextFallbackConverter, TimeConverter, UuidTextConverter,
};
use crate::dialect::{Dialect, IdentityRetrieval};
use crate::schema::{ColumnDefinition, TypeTag};

pub struct SqliteDialect {
    converters: ConverterRegistry,
}

impl Default for SqliteDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqliteDialect {
    pub fn new() -> Self {
        let mut converters =
            ConverterRegistry::new(Arc::new(TextFallbackConverter::new("TEXT")));
        converters.register(TypeTag::Bool, Arc::new(IntegerBoolConverter::new("INTEGER")));
        converters.register(TypeTag::Int, Arc::new(IntegerConverter::new("INTEGER")));
        converters.register(TypeTag::BigInt, Arc::new(IntegerConverter::new("INTEGER")));
        converters.register(TypeTag::Float, Arc::new(FloatConverter::new("REAL")));
        converters.register(TypeTag::Double, Arc::new(FloatConverter::new("REAL")));
        converters.register(TypeTag::Decimal, Arc::new(DecimalConverter::new("NUMERIC")));
        converters.register(TypeTag::Text, Arc::new(TextConverter::new("TEXT")));
        converters.register(TypeTag::Bytes, Arc::new(BlobConverter::new("BLOB")));
        converters.register(TypeTag::Uuid, Arc::new(UuidTextConverter::new("TEXT")));
        converters.register(TypeTag::Date, Arc::new(DateConverter::new("TEXT")));
        converters.register(TypeTag::Time, Arc::new(TimeConverter::new("TEXT")));
        converters.register(TypeTag::DateTime, Arc::new(DateTimeConverter::new("TEXT")));
        converters.register(TypeTag::Json, Arc::new(JsonConverter::new("TEXT")));
        Self { converters }
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_chars(&self) -> (char, char) {
        ('"', '"')
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

    fn identity_retrieval(&self) -> IdentityRetrieval {
        IdentityRetrieval::FollowUpQuery
    }

    fn last_insert_id_sql(&self) -> Option<&'static str> {
        Some("SELECT last_insert_rowid()")
    }

    // Length on TEXT is affinity-only noise in SQLite; drop it.
    fn sized_text_type(&self, _length: u32) -> String {
        "TEXT".to_string()
    }

    // Rowid alias rules: the identity column must be exactly INTEGER
    // PRIMARY KEY, regardless of the declared integer width.
    fn identity_column_sql(&self, column: &ColumnDefinition) -> String {
        format!(
            "{} INTEGER PRIMARY KEY AUTOINCREMENT",
            self.quote_identifier(&column.name)
        )
    }
}
