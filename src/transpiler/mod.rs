//! Translation from expression trees and table metadata to parameterized
//! SQL.
//!
//! Everything in this module produces a [`ParamSql`]: SQL text whose only
//! value slots are dialect placeholders, paired with the bound values in
//! placeholder order. Producers uphold the cardinality invariant:
//! placeholder count always equals parameter count.

pub mod ddl;
pub mod dml;
mod expr;

#[cfg(test)]
mod tests;

pub use ddl::{build_create_indexes, build_create_table, build_drop_table};
pub use dml::{DeleteStatement, InsertStatement, SelectStatement, UpdateStatement};
pub use expr::{SqlWriter, translate};

use serde::{Deserialize, Serialize};

use crate::convert::SqlValue;

/// SQL text plus its bound parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSql {
    pub text: String,
    pub params: Vec<SqlValue>,
}

impl ParamSql {
    pub fn new(text: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            text: text.into(),
            params,
        }
    }
}
