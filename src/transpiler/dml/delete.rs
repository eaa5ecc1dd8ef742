//! DELETE statement generation.

use crate::ast::Expr;
use crate::dialect::Dialect;
use crate::error::ForgeResult;
use crate::schema::TableDefinition;
use crate::transpiler::{ParamSql, SqlWriter};

/// Builder for one DELETE.
pub struct DeleteStatement<'a> {
    table: &'a TableDefinition,
    predicate: Option<Expr>,
}

impl<'a> DeleteStatement<'a> {
    pub fn new(table: &'a TableDefinition) -> Self {
        Self {
            table,
            predicate: None,
        }
    }

    /// Add a predicate; successive calls are AND-combined.
    pub fn filter(mut self, predicate: Expr) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn build(&self, dialect: &dyn Dialect) -> ForgeResult<ParamSql> {
        let mut writer = SqlWriter::new(dialect);
        let mut sql = format!("DELETE FROM {}", dialect.quote_identifier(&self.table.name));

        if let Some(predicate) = &self.predicate {
            let fragment = writer.render(predicate)?;
            sql.push_str(" WHERE ");
            sql.push_str(&fragment);
        }

        Ok(ParamSql::new(sql, writer.into_params()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::col;
    use crate::convert::SqlValue;
    use crate::dialect::SqliteDialect;
    use crate::schema::{ColumnDefinition, TableDefinition, TypeTag};

    #[test]
    fn test_delete_with_predicate() {
        let table = TableDefinition::new("users")
            .column(ColumnDefinition::new("id", TypeTag::BigInt).auto_increment());
        let stmt = DeleteStatement::new(&table)
            .filter(col("id").eq(1))
            .build(&SqliteDialect::new())
            .unwrap();
        assert_eq!(stmt.text, "DELETE FROM \"users\" WHERE \"id\" = ?");
        assert_eq!(stmt.params, vec![SqlValue::Integer(1)]);
    }

    #[test]
    fn test_delete_all() {
        let table = TableDefinition::new("sessions")
            .column(ColumnDefinition::new("token", TypeTag::Text));
        let stmt = DeleteStatement::new(&table)
            .build(&SqliteDialect::new())
            .unwrap();
        assert_eq!(stmt.text, "DELETE FROM \"sessions\"");
        assert!(stmt.params.is_empty());
    }
}
