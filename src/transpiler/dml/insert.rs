//! INSERT statement generation.

use crate::dialect::Dialect;
use crate::error::{ForgeError, ForgeResult};
use crate::schema::TableDefinition;
use crate::transpiler::{ParamSql, SqlWriter};
use crate::value::Value;

/// Builder for one INSERT.
///
/// Auto-increment columns are excluded from the value list unless the
/// caller opts in with [`Self::include_identity`]; every bound value goes
/// through the column's registered converter.
pub struct InsertStatement<'a> {
    table: &'a TableDefinition,
    values: Vec<(String, Value)>,
    include_identity: bool,
    returning_identity: bool,
}

impl<'a> InsertStatement<'a> {
    pub fn new(table: &'a TableDefinition) -> Self {
        Self {
            table,
            values: Vec::new(),
            include_identity: false,
            returning_identity: false,
        }
    }

    pub fn value(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.push((column.into(), value.into()));
        self
    }

    pub fn values<I, S, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        self.values
            .extend(values.into_iter().map(|(c, v)| (c.into(), v.into())));
        self
    }

    /// Carry explicitly supplied identity values instead of dropping them.
    pub fn include_identity(mut self) -> Self {
        self.include_identity = true;
        self
    }

    /// Append a RETURNING clause for the primary key where the dialect
    /// supports one. Engines without RETURNING report their strategy via
    /// [`Dialect::identity_retrieval`].
    pub fn returning_identity(mut self) -> Self {
        self.returning_identity = true;
        self
    }

    pub fn build(&self, dialect: &dyn Dialect) -> ForgeResult<ParamSql> {
        let mut writer = SqlWriter::new(dialect);
        let mut columns = Vec::with_capacity(self.values.len());
        let mut placeholders = Vec::with_capacity(self.values.len());

        for (name, value) in &self.values {
            let Some(column) = self.table.find_column(name) else {
                return Err(ForgeError::unknown_column(&self.table.name, name));
            };
            if column.auto_increment && !self.include_identity {
                continue;
            }
            columns.push(dialect.quote_identifier(name));
            placeholders.push(writer.bind_as(column.type_tag, value)?);
        }

        if columns.is_empty() {
            return Err(ForgeError::InvalidExpressionShape(
                "INSERT requires at least one bindable column value".into(),
            ));
        }

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            dialect.quote_identifier(&self.table.name),
            columns.join(", "),
            placeholders.join(", ")
        );

        if self.returning_identity
            && dialect.supports_returning()
            && let Some(pk) = self.table.primary_key()
        {
            sql.push_str(&format!(
                " RETURNING {}",
                dialect.quote_identifier(&pk.name)
            ));
        }

        Ok(ParamSql::new(sql, writer.into_params()))
    }
}
