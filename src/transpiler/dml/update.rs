//! UPDATE statement generation.

use crate::ast::Expr;
use crate::dialect::Dialect;
use crate::error::{ForgeError, ForgeResult};
use crate::schema::TableDefinition;
use crate::transpiler::{ParamSql, SqlWriter};
use crate::value::Value;

/// Builder for one UPDATE.
///
/// SET values bind before predicate values, so placeholder numbering stays
/// contiguous across the whole statement.
pub struct UpdateStatement<'a> {
    table: &'a TableDefinition,
    sets: Vec<(String, Value)>,
    predicate: Option<Expr>,
}

impl<'a> UpdateStatement<'a> {
    pub fn new(table: &'a TableDefinition) -> Self {
        Self {
            table,
            sets: Vec::new(),
            predicate: None,
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.sets.push((column.into(), value.into()));
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

    pub fn build(&self, dialect: &dyn Dialect) -> ForgeResult<ParamSql> {
        if self.sets.is_empty() {
            return Err(ForgeError::InvalidExpressionShape(
                "UPDATE requires at least one SET value".into(),
            ));
        }

        let mut writer = SqlWriter::new(dialect);
        let mut assignments = Vec::with_capacity(self.sets.len());
        for (name, value) in &self.sets {
            let Some(column) = self.table.find_column(name) else {
                return Err(ForgeError::unknown_column(&self.table.name, name));
            };
            let placeholder = writer.bind_as(column.type_tag, value)?;
            assignments.push(format!(
                "{} = {}",
                dialect.quote_identifier(name),
                placeholder
            ));
        }

        let mut sql = format!(
            "UPDATE {} SET {}",
            dialect.quote_identifier(&self.table.name),
            assignments.join(", ")
        );

        if let Some(predicate) = &self.predicate {
            let fragment = writer.render(predicate)?;
            sql.push_str(" WHERE ");
            sql.push_str(&fragment);
        }

        Ok(ParamSql::new(sql, writer.into_params()))
    }
}
