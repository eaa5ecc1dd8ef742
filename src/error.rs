//! Error types for sqlforge.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForgeError {
    /// A value has no converter and the fallback cannot represent it.
    #[error("unsupported type: {value} value cannot be represented as {column_type}")]
    UnsupportedType {
        value: &'static str,
        column_type: String,
    },

    /// Unknown function name or an operator the active dialect cannot emit.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    /// Malformed expression tree (wrong arity, wrong operand kind).
    #[error("invalid expression shape: {0}")]
    InvalidExpressionShape(String),

    /// No provider installed under this engine identifier.
    #[error("unknown dialect: '{0}'")]
    UnknownDialect(String),

    /// A statement referenced a column the table definition does not have.
    #[error("unknown column '{column}' on table '{table}'")]
    UnknownColumn { table: String, column: String },
}

impl ForgeError {
    /// Create an unsupported-type error from a value kind and target column type.
    pub fn unsupported_type(value: &'static str, column_type: impl Into<String>) -> Self {
        Self::UnsupportedType {
            value,
            column_type: column_type.into(),
        }
    }

    /// Create an unknown-column error.
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// Result type alias for sqlforge operations.
pub type ForgeResult<T> = Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ForgeError::unsupported_type("bytes", "TEXT");
        assert_eq!(
            err.to_string(),
            "unsupported type: bytes value cannot be represented as TEXT"
        );

        let err = ForgeError::UnknownDialect("oracle".into());
        assert_eq!(err.to_string(), "unknown dialect: 'oracle'");
    }
}
