//! Expression-tree translation.
//!
//! Recursive descent over [`Expr`], accumulating the ordered parameter
//! list as constants are encountered. Parenthesization is decided here,
//! structurally, so the emitted text parses with the tree's own
//! associativity on every engine; see [`needs_parens`].

use crate::ast::{BinaryOp, Expr, OrderSpec, UnaryOp};
use crate::convert::SqlValue;
use crate::dialect::Dialect;
use crate::error::{ForgeError, ForgeResult};
use crate::schema::TypeTag;
use crate::transpiler::ParamSql;
use crate::value::Value;

/// Accumulates one statement's SQL fragments and bound parameters.
///
/// Statement builders share a single writer across SET lists and WHERE
/// fragments so placeholder numbering stays contiguous.
pub struct SqlWriter<'a> {
    dialect: &'a dyn Dialect,
    params: Vec<SqlValue>,
}

impl<'a> SqlWriter<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            params: Vec::new(),
        }
    }

    pub fn into_params(self) -> Vec<SqlValue> {
        self.params
    }

    /// Bind a value routed by its own type tag; returns the placeholder.
    pub fn bind(&mut self, value: &Value) -> ForgeResult<String> {
        let converted = self.dialect.converters().bind(value)?;
        self.params.push(converted);
        Ok(self.dialect.placeholder(self.params.len()))
    }

    /// Bind a value destined for a column of a known type tag.
    pub fn bind_as(&mut self, tag: TypeTag, value: &Value) -> ForgeResult<String> {
        let converted = self.dialect.converters().bind_as(tag, value)?;
        self.params.push(converted);
        Ok(self.dialect.placeholder(self.params.len()))
    }

    /// Render an expression into a SQL fragment, pushing parameters as
    /// constants are reached.
    pub fn render(&mut self, expr: &Expr) -> ForgeResult<String> {
        match expr {
            Expr::Constant(Value::Array(_)) => Err(ForgeError::InvalidExpressionShape(
                "multi-valued constant is only valid as the right side of IN".into(),
            )),
            Expr::Constant(value) => self.bind(value),
            Expr::Column { table, name } => Ok(self.render_column(table.as_deref(), name)),
            Expr::Binary { op, left, right } => self.render_binary(*op, left, right),
            Expr::Unary { op, operand } => self.render_unary(*op, operand),
            Expr::Call { name, args } => self.render_call(name, args),
        }
    }

    fn render_column(&self, table: Option<&str>, name: &str) -> String {
        match table {
            Some(table) => format!(
                "{}.{}",
                self.dialect.quote_identifier(table),
                self.dialect.quote_identifier(name)
            ),
            None => self.dialect.quote_identifier(name),
        }
    }

    fn render_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> ForgeResult<String> {
        if matches!(op, BinaryOp::In | BinaryOp::NotIn) {
            return self.render_in(op, left, right);
        }

        // NULL never matches through `=`; rewrite to IS [NOT] NULL with
        // zero parameters for the null side.
        if matches!(op, BinaryOp::Eq | BinaryOp::Ne) {
            let keyword = if op == BinaryOp::Eq {
                "IS NULL"
            } else {
                "IS NOT NULL"
            };
            if right.is_null_constant() {
                let operand = self.render_operand(op, left, false)?;
                return Ok(format!("{operand} {keyword}"));
            }
            if left.is_null_constant() {
                let operand = self.render_operand(op, right, false)?;
                return Ok(format!("{operand} {keyword}"));
            }
        }

        let left_sql = self.render_operand(op, left, false)?;
        let right_sql = self.render_operand(op, right, true)?;
        Ok(format!("{left_sql} {} {right_sql}", op.sql_symbol()))
    }

    fn render_in(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> ForgeResult<String> {
        let Expr::Constant(Value::Array(values)) = right else {
            return Err(ForgeError::InvalidExpressionShape(format!(
                "{} requires a list of values on the right",
                op.sql_symbol()
            )));
        };

        // An empty set can never match; emit a portable constant truth
        // value instead of invalid `IN ()` syntax.
        if values.is_empty() {
            return Ok(if op == BinaryOp::In { "1 = 0" } else { "1 = 1" }.to_string());
        }

        let operand = self.render_operand(op, left, false)?;
        let mut placeholders = Vec::with_capacity(values.len());
        for value in values {
            placeholders.push(self.bind(value)?);
        }
        Ok(format!(
            "{operand} {} ({})",
            op.sql_symbol(),
            placeholders.join(", ")
        ))
    }

    fn render_unary(&mut self, op: UnaryOp, operand: &Expr) -> ForgeResult<String> {
        let inner = self.render_grouped(operand)?;
        Ok(match op {
            UnaryOp::Not => format!("NOT {inner}"),
            UnaryOp::Neg => format!("-{inner}"),
            UnaryOp::IsNull => format!("{inner} IS NULL"),
            UnaryOp::IsNotNull => format!("{inner} IS NOT NULL"),
        })
    }

    fn render_call(&mut self, name: &str, args: &[Expr]) -> ForgeResult<String> {
        let lower = name.to_ascii_lowercase();
        let (min_args, max_args) = call_arity(&lower).ok_or_else(|| {
            ForgeError::UnsupportedExpression(format!("unknown function '{name}'"))
        })?;
        if args.len() < min_args || max_args.is_some_and(|max| args.len() > max) {
            return Err(ForgeError::InvalidExpressionShape(format!(
                "function '{name}' called with {} argument(s)",
                args.len()
            )));
        }
        let sql_name = self.dialect.function_name(&lower).ok_or_else(|| {
            ForgeError::UnsupportedExpression(format!(
                "function '{name}' is not available on dialect '{}'",
                self.dialect.name()
            ))
        })?;

        let mut rendered = Vec::with_capacity(args.len());
        for arg in args {
            rendered.push(self.render(arg)?);
        }
        Ok(format!("{sql_name}({})", rendered.join(", ")))
    }

    /// Render a binary operand, adding parentheses whenever the child
    /// could reassociate under the parent operator.
    fn render_operand(
        &mut self,
        parent: BinaryOp,
        operand: &Expr,
        is_right: bool,
    ) -> ForgeResult<String> {
        let rendered = self.render(operand)?;
        match operand {
            Expr::Binary { op: child, .. } if needs_parens(parent, *child, is_right) => {
                Ok(format!("({rendered})"))
            }
            _ => Ok(rendered),
        }
    }

    /// Render an operand of a unary operator; binary children always get
    /// parentheses.
    fn render_grouped(&mut self, operand: &Expr) -> ForgeResult<String> {
        let rendered = self.render(operand)?;
        match operand {
            Expr::Binary { .. } => Ok(format!("({rendered})")),
            _ => Ok(rendered),
        }
    }

    /// Render an ORDER BY clause body.
    pub fn render_order_by(&self, terms: &[OrderSpec]) -> String {
        terms
            .iter()
            .map(|term| {
                format!(
                    "{} {}",
                    self.dialect.quote_identifier(&term.column),
                    term.order.sql_keyword()
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Structural parenthesization: a child is wrapped when it binds looser
/// than its parent, when AND and OR mix (always grouped, never left to the
/// target parser), when equal-precedence operators differ, and on the right
/// side of a non-associative operator.
fn needs_parens(parent: BinaryOp, child: BinaryOp, is_right: bool) -> bool {
    let parent_prec = parent.precedence();
    let child_prec = child.precedence();
    if child_prec < parent_prec {
        return true;
    }
    if parent.is_logical() && child.is_logical() && parent != child {
        return true;
    }
    if child_prec == parent_prec && child != parent {
        return true;
    }
    child_prec == parent_prec && is_right && !parent.is_associative()
}

/// Fixed arity table for the supported scalar functions.
fn call_arity(name: &str) -> Option<(usize, Option<usize>)> {
    match name {
        "upper" | "lower" | "length" | "trim" | "abs" => Some((1, Some(1))),
        "coalesce" => Some((2, None)),
        _ => None,
    }
}

/// Translate a standalone predicate into a parameterized fragment.
pub fn translate(dialect: &dyn Dialect, expr: &Expr) -> ForgeResult<ParamSql> {
    let mut writer = SqlWriter::new(dialect);
    let text = writer.render(expr)?;
    Ok(ParamSql::new(text, writer.into_params()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{col, val};
    use crate::dialect::{PostgresDialect, SqliteDialect};

    #[test]
    fn test_constant_becomes_placeholder() {
        let dialect = PostgresDialect::new();
        let fragment = translate(&dialect, &col("email").eq("a@example.com")).unwrap();
        assert_eq!(fragment.text, "\"email\" = $1");
        assert_eq!(fragment.params, vec![SqlValue::Text("a@example.com".into())]);
    }

    #[test]
    fn test_qualified_column() {
        let dialect = PostgresDialect::new();
        let expr = crate::ast::qualified("users", "id").eq(1);
        let fragment = translate(&dialect, &expr).unwrap();
        assert_eq!(fragment.text, "\"users\".\"id\" = $1");
    }

    #[test]
    fn test_null_equality_rewrites_to_is_null() {
        let dialect = PostgresDialect::new();
        let fragment = translate(&dialect, &col("deleted_at").eq(Value::Null)).unwrap();
        assert_eq!(fragment.text, "\"deleted_at\" IS NULL");
        assert!(fragment.params.is_empty());

        let fragment = translate(&dialect, &col("deleted_at").ne(Value::Null)).unwrap();
        assert_eq!(fragment.text, "\"deleted_at\" IS NOT NULL");
        assert!(fragment.params.is_empty());
    }

    #[test]
    fn test_in_expands_one_placeholder_per_element() {
        let dialect = PostgresDialect::new();
        let fragment = translate(&dialect, &col("age").in_list([1, 2, 3])).unwrap();
        assert_eq!(fragment.text, "\"age\" IN ($1, $2, $3)");
        assert_eq!(
            fragment.params,
            vec![
                SqlValue::Integer(1),
                SqlValue::Integer(2),
                SqlValue::Integer(3)
            ]
        );
    }

    #[test]
    fn test_empty_in_is_statically_false() {
        let dialect = SqliteDialect::new();
        let fragment = translate(&dialect, &col("id").in_list(Vec::<i64>::new())).unwrap();
        assert_eq!(fragment.text, "1 = 0");
        assert!(fragment.params.is_empty());

        let fragment = translate(&dialect, &col("id").not_in_list(Vec::<i64>::new())).unwrap();
        assert_eq!(fragment.text, "1 = 1");
        assert!(fragment.params.is_empty());
    }

    #[test]
    fn test_mixed_and_or_parenthesization() {
        let dialect = SqliteDialect::new();

        let grouped_and = col("a").eq(1).and(col("b").eq(2)).or(col("c").eq(3));
        let fragment = translate(&dialect, &grouped_and).unwrap();
        assert_eq!(
            fragment.text,
            "(\"a\" = ? AND \"b\" = ?) OR \"c\" = ?"
        );

        let grouped_or = col("a").eq(1).and(col("b").eq(2).or(col("c").eq(3)));
        let fragment = translate(&dialect, &grouped_or).unwrap();
        assert_eq!(
            fragment.text,
            "\"a\" = ? AND (\"b\" = ? OR \"c\" = ?)"
        );
    }

    #[test]
    fn test_same_operator_chain_stays_flat() {
        let dialect = SqliteDialect::new();
        let chain = col("a").eq(1).and(col("b").eq(2)).and(col("c").eq(3));
        let fragment = translate(&dialect, &chain).unwrap();
        assert_eq!(
            fragment.text,
            "\"a\" = ? AND \"b\" = ? AND \"c\" = ?"
        );
    }

    #[test]
    fn test_known_function_renders_and_binds() {
        let dialect = PostgresDialect::new();
        let expr = Expr::call("upper", vec![col("name")]).eq("ALICE");
        let fragment = translate(&dialect, &expr).unwrap();
        assert_eq!(fragment.text, "UPPER(\"name\") = $1");
        assert_eq!(fragment.params.len(), 1);
    }

    #[test]
    fn test_coalesce_variadic() {
        let dialect = PostgresDialect::new();
        let expr = Expr::call("coalesce", vec![col("nick"), col("name"), val("anon")]);
        let fragment = translate(&dialect, &expr).unwrap();
        assert_eq!(fragment.text, "COALESCE(\"nick\", \"name\", $1)");
        assert_eq!(fragment.params, vec![SqlValue::Text("anon".into())]);
    }

    #[test]
    fn test_unknown_function_is_unsupported() {
        let dialect = PostgresDialect::new();
        let expr = Expr::call("soundex", vec![col("name")]);
        let err = translate(&dialect, &expr).unwrap_err();
        assert!(matches!(err, ForgeError::UnsupportedExpression(_)));
    }

    #[test]
    fn test_wrong_arity_is_invalid_shape() {
        let dialect = PostgresDialect::new();
        let expr = Expr::call("upper", vec![col("a"), col("b")]);
        let err = translate(&dialect, &expr).unwrap_err();
        assert!(matches!(err, ForgeError::InvalidExpressionShape(_)));

        let expr = Expr::call("coalesce", vec![col("a")]);
        let err = translate(&dialect, &expr).unwrap_err();
        assert!(matches!(err, ForgeError::InvalidExpressionShape(_)));
    }

    #[test]
    fn test_in_without_list_is_invalid_shape() {
        let dialect = PostgresDialect::new();
        let expr = Expr::binary(BinaryOp::In, col("id"), val(1));
        let err = translate(&dialect, &expr).unwrap_err();
        assert!(matches!(err, ForgeError::InvalidExpressionShape(_)));
    }

    #[test]
    fn test_not_wraps_binary_operand() {
        let dialect = SqliteDialect::new();
        let fragment = translate(&dialect, &col("a").eq(1).not()).unwrap();
        assert_eq!(fragment.text, "NOT (\"a\" = ?)");
    }

    #[test]
    fn test_arithmetic_operand_grouping() {
        let dialect = PostgresDialect::new();

        // Addition binds tighter than comparison, no grouping needed.
        let sum = col("price").compare(BinaryOp::Add, col("tax"));
        let fragment = translate(&dialect, &sum.compare(BinaryOp::Gt, val(100))).unwrap();
        assert_eq!(fragment.text, "\"price\" + \"tax\" > $1");

        // Addition under multiplication must keep its group.
        let sum = col("price").compare(BinaryOp::Add, col("tax"));
        let fragment = translate(&dialect, &sum.compare(BinaryOp::Mul, val(2))).unwrap();
        assert_eq!(fragment.text, "(\"price\" + \"tax\") * $1");
    }

    #[test]
    fn test_subtraction_keeps_right_group() {
        let dialect = PostgresDialect::new();
        let right = col("b").compare(BinaryOp::Sub, col("c"));
        let expr = col("a").compare(BinaryOp::Sub, right);
        let fragment = translate(&dialect, &expr).unwrap();
        assert_eq!(fragment.text, "\"a\" - (\"b\" - \"c\")");
    }

    #[test]
    fn test_placeholder_numbering_is_sequential() {
        let dialect = PostgresDialect::new();
        let expr = col("a").eq(1).and(col("b").in_list([2, 3])).and(col("c").ne(4));
        let fragment = translate(&dialect, &expr).unwrap();
        assert_eq!(
            fragment.text,
            "\"a\" = $1 AND \"b\" IN ($2, $3) AND \"c\" != $4"
        );
        assert_eq!(fragment.params.len(), 4);
    }
}
