//! Table and column metadata.
//!
//! A [`TableDefinition`] is the caller-built description of one mapped table:
//! an ordered list of columns plus indexes. The engine never mutates it;
//! column order is significant for DDL and positional binding.

use serde::{Deserialize, Serialize};

/// Native type tag for a mapped column. Each dialect maps a tag to a column
/// type name and a converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Bool,
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    Text,
    Bytes,
    Uuid,
    Date,
    Time,
    DateTime,
    Json,
}

/// Default value emitted into DDL. Text defaults are escaped through the
/// dialect's string-literal quoting; `Expression` is emitted verbatim
/// (for engine keywords such as CURRENT_TIMESTAMP).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Expression(String),
}

/// Foreign-key reference carried on a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
}

/// A single mapped column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub type_tag: TypeTag,
    /// Character length for sized text types (VARCHAR(n)).
    pub length: Option<u32>,
    /// Precision and scale for decimal types.
    pub precision: Option<(u32, u32)>,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub unique: bool,
    pub default: Option<DefaultValue>,
    pub references: Option<ForeignKey>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            type_tag,
            length: None,
            precision: None,
            nullable: true,
            primary_key: false,
            auto_increment: false,
            unique: false,
            default: None,
            references: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Mark the column as the engine-generated identity column.
    /// Implies primary key.
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self.primary_key()
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn length(mut self, n: u32) -> Self {
        self.length = Some(n);
        self
    }

    pub fn precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some((precision, scale));
        self
    }

    pub fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.references = Some(ForeignKey {
            table: table.into(),
            column: column.into(),
        });
        self
    }
}

/// Index or unique constraint over one or more columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

/// Ordered description of one mapped table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub indexes: Vec<IndexDefinition>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    pub fn index(mut self, name: impl Into<String>, columns: Vec<String>, unique: bool) -> Self {
        self.indexes.push(IndexDefinition {
            name: name.into(),
            columns,
            unique,
        });
        self
    }

    /// Look up a column by name.
    pub fn find_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The primary-key column, if a single one is declared.
    pub fn primary_key(&self) -> Option<&ColumnDefinition> {
        let mut keys = self.columns.iter().filter(|c| c.primary_key);
        match (keys.next(), keys.next()) {
            (Some(pk), None) => Some(pk),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builder() {
        let col = ColumnDefinition::new("id", TypeTag::BigInt).auto_increment();
        assert!(col.primary_key);
        assert!(col.auto_increment);
        assert!(!col.nullable);
    }

    #[test]
    fn test_find_column() {
        let table = TableDefinition::new("users")
            .column(ColumnDefinition::new("id", TypeTag::BigInt).auto_increment())
            .column(ColumnDefinition::new("email", TypeTag::Text).not_null());

        assert!(table.find_column("email").is_some());
        assert!(table.find_column("missing").is_none());
        assert_eq!(table.primary_key().map(|c| c.name.as_str()), Some("id"));
    }
}
