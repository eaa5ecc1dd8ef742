use serde::{Deserialize, Serialize};

use crate::ast::{BinaryOp, SortOrder, UnaryOp};
use crate::value::Value;

/// A predicate or scalar expression tree.
///
/// Trees are built by the caller (usually through the fluent helpers
/// [`col`](crate::ast::col) and [`val`](crate::ast::val)) and consumed
/// read-only by the translator.
/// Constants always become bound parameters, never literal SQL text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A constant value, bound as a parameter.
    Constant(Value),
    /// A column reference, optionally table-qualified.
    Column {
        table: Option<String>,
        name: String,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// A scalar function call, resolved through the dialect's function table.
    Call { name: String, args: Vec<Expr> },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// True if this node is a constant NULL.
    pub fn is_null_constant(&self) -> bool {
        matches!(self, Expr::Constant(Value::Null))
    }
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub column: String,
    pub order: SortOrder,
}

impl OrderSpec {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            order: SortOrder::Desc,
        }
    }
}
