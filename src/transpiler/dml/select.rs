//! SELECT statement generation.

use crate::ast::{Expr, OrderSpec, SortOrder};
use crate::dialect::Dialect;
use crate::error::{ForgeError, ForgeResult};
use crate::schema::TableDefinition;
use crate::transpiler::{ParamSql, SqlWriter};

/// Builder for one SELECT over a defined table.
///
/// With no explicit column list, all columns are emitted in definition
/// order, so positional reads stay aligned with the table definition.
pub struct SelectStatement<'a> {
    table: &'a TableDefinition,
    columns: Vec<String>,
    predicate: Option<Expr>,
    order_by: Vec<OrderSpec>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl<'a> SelectStatement<'a> {
    pub fn new(table: &'a TableDefinition) -> Self {
        Self {
            table,
            columns: Vec::new(),
            predicate: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Select a subset of columns, in the given order.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Add a predicate; successive calls are AND-combined.
    pub fn filter(mut self, predicate: Expr) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.order_by.push(OrderSpec {
            column: column.into(),
            order,
        });
        self
    }

    pub fn order_asc(self, column: impl Into<String>) -> Self {
        self.order_by(column, SortOrder::Asc)
    }

    pub fn order_desc(self, column: impl Into<String>) -> Self {
        self.order_by(column, SortOrder::Desc)
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    pub fn build(&self, dialect: &dyn Dialect) -> ForgeResult<ParamSql> {
        let mut writer = SqlWriter::new(dialect);

        let column_list = if self.columns.is_empty() {
            self.table
                .columns
                .iter()
                .map(|c| dialect.quote_identifier(&c.name))
                .collect::<Vec<_>>()
        } else {
            let mut quoted = Vec::with_capacity(self.columns.len());
            for name in &self.columns {
                if self.table.find_column(name).is_none() {
                    return Err(ForgeError::unknown_column(&self.table.name, name));
                }
                quoted.push(dialect.quote_identifier(name));
            }
            quoted
        };

        let mut sql = format!(
            "SELECT {} FROM {}",
            column_list.join(", "),
            dialect.quote_identifier(&self.table.name)
        );

        if let Some(predicate) = &self.predicate {
            let fragment = writer.render(predicate)?;
            sql.push_str(" WHERE ");
            sql.push_str(&fragment);
        }

        if !self.order_by.is_empty() {
            for term in &self.order_by {
                if self.table.find_column(&term.column).is_none() {
                    return Err(ForgeError::unknown_column(&self.table.name, &term.column));
                }
            }
            sql.push_str(" ORDER BY ");
            sql.push_str(&writer.render_order_by(&self.order_by));
        }

        sql.push_str(&dialect.limit_offset(self.limit, self.offset));

        Ok(ParamSql::new(sql, writer.into_params()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::col;
    use crate::convert::SqlValue;
    use crate::dialect::{PostgresDialect, SqliteDialect};
    use crate::schema::{ColumnDefinition, TypeTag};

    fn users() -> TableDefinition {
        TableDefinition::new("users")
            .column(ColumnDefinition::new("id", TypeTag::BigInt).auto_increment())
            .column(ColumnDefinition::new("email", TypeTag::Text).not_null())
            .column(ColumnDefinition::new("age", TypeTag::Int))
    }

    #[test]
    fn test_select_all_columns_in_order() {
        let table = users();
        let stmt = SelectStatement::new(&table)
            .build(&SqliteDialect::new())
            .unwrap();
        assert_eq!(stmt.text, "SELECT \"id\", \"email\", \"age\" FROM \"users\"");
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn test_select_with_predicate() {
        let table = users();
        let stmt = SelectStatement::new(&table)
            .filter(col("email").eq("a@example.com"))
            .build(&PostgresDialect::new())
            .unwrap();
        assert_eq!(
            stmt.text,
            "SELECT \"id\", \"email\", \"age\" FROM \"users\" WHERE \"email\" = $1"
        );
        assert_eq!(stmt.params, vec![SqlValue::Text("a@example.com".into())]);
    }

    #[test]
    fn test_select_subset_order_limit() {
        let table = users();
        let stmt = SelectStatement::new(&table)
            .columns(["email"])
            .filter(col("age").gte(18))
            .order_desc("age")
            .limit(10)
            .offset(20)
            .build(&SqliteDialect::new())
            .unwrap();
        assert_eq!(
            stmt.text,
            "SELECT \"email\" FROM \"users\" WHERE \"age\" >= ? ORDER BY \"age\" DESC LIMIT 10 OFFSET 20"
        );
        assert_eq!(stmt.params, vec![SqlValue::Integer(18)]);
    }

    #[test]
    fn test_select_unknown_column_is_rejected() {
        let table = users();
        let err = SelectStatement::new(&table)
            .columns(["nope"])
            .build(&SqliteDialect::new())
            .unwrap_err();
        assert!(matches!(err, ForgeError::UnknownColumn { .. }));
    }

    #[test]
    fn test_filters_are_and_combined() {
        let table = users();
        let stmt = SelectStatement::new(&table)
            .filter(col("age").gte(18))
            .filter(col("email").is_not_null())
            .build(&SqliteDialect::new())
            .unwrap();
        assert!(stmt.text.contains("\"age\" >= ? AND \"email\" IS NOT NULL"));
    }
}
