//! DDL statement generation.
//!
//! The rendering itself lives on the [`Dialect`] trait; these wrappers
//! return the same [`ParamSql`] shape as the DML builders so callers hand
//! every statement to the driver the same way. DDL binds no parameters.

use crate::dialect::Dialect;
use crate::schema::TableDefinition;
use crate::transpiler::ParamSql;

pub fn build_create_table(table: &TableDefinition, dialect: &dyn Dialect) -> ParamSql {
    ParamSql::new(dialect.create_table_sql(table), Vec::new())
}

pub fn build_drop_table(name: &str, dialect: &dyn Dialect) -> ParamSql {
    ParamSql::new(dialect.drop_table_sql(name), Vec::new())
}

/// One CREATE INDEX statement per index definition, in declaration order.
pub fn build_create_indexes(table: &TableDefinition, dialect: &dyn Dialect) -> Vec<ParamSql> {
    table
        .indexes
        .iter()
        .map(|index| ParamSql::new(dialect.create_index_sql(&table.name, index), Vec::new()))
        .collect()
}
