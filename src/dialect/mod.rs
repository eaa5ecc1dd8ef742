//! Dialect providers: per-engine quoting, parameter markers, type mapping,
//! feature flags, and DDL rendering.
//!
//! One [`Dialect`] implementation fully describes one database engine.
//! Providers are constructed once, never mutated, and shared read-only
//! behind an `Arc`; see [`registry`] for process-wide installation.

pub mod mysql;
pub mod postgres;
pub mod registry;
pub mod sqlite;

pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

use crate::convert::ConverterRegistry;
use crate::schema::{ColumnDefinition, DefaultValue, IndexDefinition, TableDefinition, TypeTag};

/// How a driver retrieves the identity value after an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityRetrieval {
    /// The insert itself can carry a RETURNING clause.
    Returning,
    /// A follow-up round trip is required (see [`Dialect::last_insert_id_sql`]).
    FollowUpQuery,
}

/// A complete description of one engine's SQL dialect.
///
/// Everything the translator and statement builders need goes through this
/// trait: identifiers are quoted here, parameter markers are produced here,
/// and native values reach the driver only via the converter registry.
/// There is no literal-interpolation path for caller-supplied values.
pub trait Dialect: Send + Sync {
    /// Engine identifier used as the registry key.
    fn name(&self) -> &'static str;

    /// Identifier quote characters (open, close).
    fn quote_chars(&self) -> (char, char);

    /// Parameter marker for a 1-based position. Positional-`?` engines
    /// ignore the index.
    fn placeholder(&self, index: usize) -> String;

    /// The converter table built for this engine at construction time.
    fn converters(&self) -> &ConverterRegistry;

    /// Boolean literal used in DDL default clauses.
    fn bool_literal(&self, value: bool) -> &'static str;

    /// Whether INSERT ... RETURNING is available.
    fn supports_returning(&self) -> bool;

    /// Whether one command string may carry several statements.
    fn supports_multiple_statements(&self) -> bool {
        false
    }

    /// Identity retrieval strategy for auto-increment inserts.
    fn identity_retrieval(&self) -> IdentityRetrieval;

    /// The follow-up statement that reads the last generated identity,
    /// for engines without RETURNING.
    fn last_insert_id_sql(&self) -> Option<&'static str> {
        None
    }

    /// Quote an identifier, doubling any embedded close-quote character.
    /// Injective: distinct names stay distinct after quoting.
    fn quote_identifier(&self, name: &str) -> String {
        let (open, close) = self.quote_chars();
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(open);
        for ch in name.chars() {
            quoted.push(ch);
            if ch == close {
                quoted.push(close);
            }
        }
        quoted.push(close);
        quoted
    }

    /// Quote a string literal for DDL default clauses. Parameter values
    /// never pass through here.
    fn quote_string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Map a scalar function name to this engine's spelling.
    fn function_name(&self, name: &str) -> Option<&'static str> {
        match name {
            "upper" => Some("UPPER"),
            "lower" => Some("LOWER"),
            "length" => Some("LENGTH"),
            "trim" => Some("TRIM"),
            "abs" => Some("ABS"),
            "coalesce" => Some("COALESCE"),
            _ => None,
        }
    }

    /// DDL type for a sized text column.
    fn sized_text_type(&self, length: u32) -> String {
        format!("VARCHAR({length})")
    }

    /// DDL type string for one column, before constraints.
    fn column_type_sql(&self, column: &ColumnDefinition) -> String {
        let base = self
            .converters()
            .converter_for(column.type_tag)
            .column_type()
            .to_string();
        match (column.type_tag, column.length, column.precision) {
            (TypeTag::Text, Some(n), _) => self.sized_text_type(n),
            (TypeTag::Decimal, _, Some((precision, scale))) => {
                format!("{base}({precision},{scale})")
            }
            _ => base,
        }
    }

    /// Full column definition for an auto-increment primary key.
    /// Engines disagree loudly here, so there is no default.
    fn identity_column_sql(&self, column: &ColumnDefinition) -> String;

    /// Render a DDL default value. Text goes through string-literal
    /// quoting; expressions are emitted verbatim.
    fn default_literal(&self, default: &DefaultValue) -> String {
        match default {
            DefaultValue::Text(s) => self.quote_string_literal(s),
            DefaultValue::Int(n) => n.to_string(),
            DefaultValue::Float(n) => n.to_string(),
            DefaultValue::Bool(b) => self.bool_literal(*b).to_string(),
            DefaultValue::Expression(expr) => expr.clone(),
        }
    }

    /// LIMIT/OFFSET clause, leading space included when non-empty.
    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        let mut sql = String::new();
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }
        if let Some(n) = offset {
            sql.push_str(&format!(" OFFSET {n}"));
        }
        sql
    }

    /// CREATE TABLE statement with columns in definition order.
    fn create_table_sql(&self, table: &TableDefinition) -> String {
        let key_count = table.columns.iter().filter(|c| c.primary_key).count();
        let composite_key = key_count > 1;

        let mut parts: Vec<String> = Vec::with_capacity(table.columns.len() + 1);
        for column in &table.columns {
            if column.auto_increment && column.primary_key && !composite_key {
                parts.push(self.identity_column_sql(column));
                continue;
            }

            let mut def = format!(
                "{} {}",
                self.quote_identifier(&column.name),
                self.column_type_sql(column)
            );
            if column.primary_key && !composite_key {
                def.push_str(" PRIMARY KEY");
            } else if !column.nullable {
                def.push_str(" NOT NULL");
            }
            if column.unique && !column.primary_key {
                def.push_str(" UNIQUE");
            }
            if let Some(default) = &column.default {
                def.push_str(&format!(" DEFAULT {}", self.default_literal(default)));
            }
            if let Some(fk) = &column.references {
                def.push_str(&format!(
                    " REFERENCES {} ({})",
                    self.quote_identifier(&fk.table),
                    self.quote_identifier(&fk.column)
                ));
            }
            parts.push(def);
        }

        if composite_key {
            let keys: Vec<String> = table
                .columns
                .iter()
                .filter(|c| c.primary_key)
                .map(|c| self.quote_identifier(&c.name))
                .collect();
            parts.push(format!("PRIMARY KEY ({})", keys.join(", ")));
        }

        format!(
            "CREATE TABLE {} ({})",
            self.quote_identifier(&table.name),
            parts.join(", ")
        )
    }

    fn drop_table_sql(&self, name: &str) -> String {
        format!("DROP TABLE {}", self.quote_identifier(name))
    }

    /// CREATE INDEX statement for one index definition.
    fn create_index_sql(&self, table: &str, index: &IndexDefinition) -> String {
        let columns: Vec<String> = index
            .columns
            .iter()
            .map(|c| self.quote_identifier(c))
            .collect();
        let unique = if index.unique { "UNIQUE " } else { "" };
        format!(
            "CREATE {}INDEX {} ON {} ({})",
            unique,
            self.quote_identifier(&index.name),
            self.quote_identifier(table),
            columns.join(", ")
        )
    }
}

impl std::fmt::Debug for dyn Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialect").field("name", &self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier_doubles_embedded_quote() {
        let dialect = SqliteDialect::new();
        assert_eq!(dialect.quote_identifier("plain"), "\"plain\"");
        assert_eq!(dialect.quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_quote_identifier_injective() {
        // The classic collision candidates must stay distinct.
        let dialect = SqliteDialect::new();
        let a = dialect.quote_identifier("a\"b");
        let b = dialect.quote_identifier("a\"\"b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_string_literal_escaping() {
        let dialect = PostgresDialect::new();
        assert_eq!(
            dialect.quote_string_literal("it's"),
            "'it''s'"
        );
    }
}
