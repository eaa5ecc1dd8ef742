//! Expression trees consumed by the translator.

mod builders;
mod expr;
mod operators;

pub use builders::{col, qualified, val};
pub use expr::{Expr, OrderSpec};
pub use operators::{BinaryOp, SortOrder, UnaryOp};
