//! Fluent expression constructors.
//!
//! ```
//! use sqlforge::ast::col;
//!
//! let predicate = col("age").gte(21).and(col("email").is_not_null());
//! ```

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::value::Value;

/// An unqualified column reference.
pub fn col(name: impl Into<String>) -> Expr {
    Expr::Column {
        table: None,
        name: name.into(),
    }
}

/// A table-qualified column reference.
pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Expr {
    Expr::Column {
        table: Some(table.into()),
        name: name.into(),
    }
}

/// A constant value, bound as a parameter at translation time.
pub fn val(value: impl Into<Value>) -> Expr {
    Expr::Constant(value.into())
}

impl Expr {
    pub fn eq(self, value: impl Into<Value>) -> Expr {
        Expr::binary(BinaryOp::Eq, self, Expr::Constant(value.into()))
    }

    pub fn ne(self, value: impl Into<Value>) -> Expr {
        Expr::binary(BinaryOp::Ne, self, Expr::Constant(value.into()))
    }

    pub fn lt(self, value: impl Into<Value>) -> Expr {
        Expr::binary(BinaryOp::Lt, self, Expr::Constant(value.into()))
    }

    pub fn lte(self, value: impl Into<Value>) -> Expr {
        Expr::binary(BinaryOp::Lte, self, Expr::Constant(value.into()))
    }

    pub fn gt(self, value: impl Into<Value>) -> Expr {
        Expr::binary(BinaryOp::Gt, self, Expr::Constant(value.into()))
    }

    pub fn gte(self, value: impl Into<Value>) -> Expr {
        Expr::binary(BinaryOp::Gte, self, Expr::Constant(value.into()))
    }

    pub fn like(self, pattern: impl Into<String>) -> Expr {
        Expr::binary(BinaryOp::Like, self, Expr::Constant(Value::Text(pattern.into())))
    }

    pub fn not_like(self, pattern: impl Into<String>) -> Expr {
        Expr::binary(
            BinaryOp::NotLike,
            self,
            Expr::Constant(Value::Text(pattern.into())),
        )
    }

    pub fn in_list<I, V>(self, values: I) -> Expr
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Expr::binary(BinaryOp::In, self, Expr::Constant(Value::array(values)))
    }

    pub fn not_in_list<I, V>(self, values: I) -> Expr
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Expr::binary(BinaryOp::NotIn, self, Expr::Constant(Value::array(values)))
    }

    pub fn is_null(self) -> Expr {
        Expr::unary(UnaryOp::IsNull, self)
    }

    pub fn is_not_null(self) -> Expr {
        Expr::unary(UnaryOp::IsNotNull, self)
    }

    pub fn and(self, other: Expr) -> Expr {
        Expr::binary(BinaryOp::And, self, other)
    }

    pub fn or(self, other: Expr) -> Expr {
        Expr::binary(BinaryOp::Or, self, other)
    }

    pub fn not(self) -> Expr {
        Expr::unary(UnaryOp::Not, self)
    }

    /// Compare against another expression rather than a constant.
    pub fn compare(self, op: BinaryOp, other: Expr) -> Expr {
        Expr::binary(op, self, other)
    }

    /// Wrap this expression in a scalar function call.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call {
            name: name.into(),
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluent_chain() {
        let expr = col("age").gt(21).and(col("name").like("A%"));
        match expr {
            Expr::Binary { op: BinaryOp::And, left, right } => {
                assert!(matches!(*left, Expr::Binary { op: BinaryOp::Gt, .. }));
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Like, .. }));
            }
            other => panic!("unexpected tree: {other:?}"),
        }
    }

    #[test]
    fn test_in_list_collects_values() {
        let expr = col("id").in_list([1, 2, 3]);
        let Expr::Binary { right, .. } = expr else {
            panic!("expected binary");
        };
        assert_eq!(
            *right,
            Expr::Constant(Value::Array(vec![
                Value::Int(1),
                Value::Int(2),
                Value::Int(3)
            ]))
        );
    }
}
