//! Filter expression tree
//!
//! The parser builds one of these per filter text; the evaluator then runs
//! it against every candidate tuple. Column references are already
//! resolved to tuple slots by the time a tree exists.

use std::fmt;

/// Comparison operator in a filter expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
}

impl CmpOp {
    /// Returns true for the ordering operators `>` and `<`
    pub fn is_ordering(&self) -> bool {
        matches!(self, CmpOp::Gt | CmpOp::Lt)
    }

    /// Surface spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "<>",
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed boolean filter expression.
///
/// `And`/`Or` are strict: the evaluator computes both sides regardless of
/// the left side's value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// One comparison of a tuple slot against a literal lexeme
    Compare {
        /// Resolved tuple slot index
        slot: usize,
        /// Comparison operator
        op: CmpOp,
        /// Raw literal text from the VALUE token
        value: String,
    },
    /// Strict conjunction
    And(Box<Expr>, Box<Expr>),
    /// Strict disjunction
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Create a comparison node
    pub fn compare(slot: usize, op: CmpOp, value: impl Into<String>) -> Self {
        Expr::Compare {
            slot,
            op,
            value: value.into(),
        }
    }

    /// Create a conjunction node
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    /// Create a disjunction node
    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }
}
