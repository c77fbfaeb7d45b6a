//! Filter error types
//!
//! Every way a filter expression can be rejected maps to one code here.
//! A filter error aborts the one query that carried the expression; the
//! trie and later queries are unaffected.
//!
//! Error codes:
//! - FILTER_LEX
//! - FILTER_COLUMN_RANGE
//! - FILTER_TYPE_MISMATCH
//! - FILTER_OP_NOT_APPLICABLE
//! - FILTER_UNBALANCED_PAREN
//! - FILTER_UNEXPECTED_TOKEN

use std::fmt;

/// Filter-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterErrorCode {
    /// Malformed filter text (unterminated bracket/quote, bad character,
    /// lone `|`, trailing `<`)
    Lex,
    /// Column index outside the mapped set
    ColumnRange,
    /// Literal not parseable for the slot's numeric type
    TypeMismatch,
    /// Ordering operator applied to a string slot
    OperatorNotApplicable,
    /// Asymmetric bracket count, or input ended where an operand belongs
    UnbalancedParen,
    /// Token that fits no grammar rule at its position
    UnexpectedToken,
}

impl FilterErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            FilterErrorCode::Lex => "FILTER_LEX",
            FilterErrorCode::ColumnRange => "FILTER_COLUMN_RANGE",
            FilterErrorCode::TypeMismatch => "FILTER_TYPE_MISMATCH",
            FilterErrorCode::OperatorNotApplicable => "FILTER_OP_NOT_APPLICABLE",
            FilterErrorCode::UnbalancedParen => "FILTER_UNBALANCED_PAREN",
            FilterErrorCode::UnexpectedToken => "FILTER_UNEXPECTED_TOKEN",
        }
    }
}

impl fmt::Display for FilterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Filter error with diagnostic context.
///
/// `position` is the token cursor position for parser/evaluator errors and
/// the byte offset for lexer errors, when one is available.
#[derive(Debug, Clone)]
pub struct FilterError {
    /// Error code
    code: FilterErrorCode,
    /// Human-readable message
    message: String,
    /// Cursor or byte position, if known
    position: Option<usize>,
}

impl FilterError {
    /// Create a lex error at a byte offset
    pub fn lex(message: impl Into<String>, position: usize) -> Self {
        Self {
            code: FilterErrorCode::Lex,
            message: message.into(),
            position: Some(position),
        }
    }

    /// Create a column range error
    pub fn column_range(column: &str) -> Self {
        Self {
            code: FilterErrorCode::ColumnRange,
            message: format!("no such column index: [{}]", column),
            position: None,
        }
    }

    /// Create a column range error for a slot beyond the tuple's arity
    pub fn slot_out_of_bounds(slot: usize, arity: usize) -> Self {
        Self {
            code: FilterErrorCode::ColumnRange,
            message: format!("column slot {} exceeds record arity {}", slot, arity),
            position: None,
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(literal: &str, expected: &'static str) -> Self {
        Self {
            code: FilterErrorCode::TypeMismatch,
            message: format!("literal '{}' is not a valid {}", literal, expected),
            position: None,
        }
    }

    /// Create an operator-not-applicable error
    pub fn op_not_applicable(op: &str) -> Self {
        Self {
            code: FilterErrorCode::OperatorNotApplicable,
            message: format!("operator '{}' does not apply to string columns", op),
            position: None,
        }
    }

    /// Create an unbalanced parenthesis error at a cursor position
    pub fn unbalanced_paren(message: impl Into<String>, position: usize) -> Self {
        Self {
            code: FilterErrorCode::UnbalancedParen,
            message: message.into(),
            position: Some(position),
        }
    }

    /// Create an unexpected token error at a cursor position
    pub fn unexpected_token(token: impl fmt::Display, position: usize) -> Self {
        Self {
            code: FilterErrorCode::UnexpectedToken,
            message: format!("unexpected token {}", token),
            position: Some(position),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> FilterErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the cursor or byte position, if known
    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(pos) = self.position {
            write!(f, " (at position {})", pos)?;
        }
        Ok(())
    }
}

impl std::error::Error for FilterError {}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
