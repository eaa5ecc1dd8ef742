//! Multi-dialect SQL translation core.
//!
//! Describe tables as typed metadata, build predicates as expression
//! trees, and get back dialect-correct SQL with every caller value bound
//! as a parameter, never interpolated into the text.
//!
//! ```
//! use sqlforge::ast::col;
//! use sqlforge::dialect::PostgresDialect;
//! use sqlforge::schema::{ColumnDefinition, TableDefinition, TypeTag};
//! use sqlforge::transpiler::SelectStatement;
//!
//! let users = TableDefinition::new("users")
//!     .column(ColumnDefinition::new("id", TypeTag::BigInt).auto_increment())
//!     .column(ColumnDefinition::new("email", TypeTag::Text).not_null());
//!
//! let stmt = SelectStatement::new(&users)
//!     .filter(col("email").eq("a@example.com"))
//!     .build(&PostgresDialect::new())
//!     .unwrap();
//!
//! assert_eq!(
//!     stmt.text,
//!     "SELECT \"id\", \"email\" FROM \"users\" WHERE \"email\" = $1"
//! );
//! assert_eq!(stmt.params.len(), 1);
//! ```
//!
//! Adding support for another engine means implementing one
//! [`dialect::Dialect`] plus the converters it needs, then installing it
//! in the process-wide [`dialect::registry`]; nothing else changes.

pub mod ast;
pub mod convert;
pub mod dialect;
pub mod error;
pub mod schema;
pub mod transpiler;
pub mod value;

pub use error::{ForgeError, ForgeResult};
pub use value::Value;

pub mod prelude {
    pub use crate::ast::{BinaryOp, Expr, OrderSpec, SortOrder, UnaryOp, col, qualified, val};
    pub use crate::convert::{ConverterRegistry, SqlValue, TypeConverter};
    pub use crate::dialect::{
        Dialect, IdentityRetrieval, MySqlDialect, PostgresDialect, SqliteDialect, registry,
    };
    pub use crate::error::{ForgeError, ForgeResult};
    pub use crate::schema::{ColumnDefinition, DefaultValue, TableDefinition, TypeTag};
    pub use crate::transpiler::{
        DeleteStatement, InsertStatement, ParamSql, SelectStatement, UpdateStatement,
        build_create_indexes, build_create_table, build_drop_table, translate,
    };
    pub use crate::value::Value;
}
