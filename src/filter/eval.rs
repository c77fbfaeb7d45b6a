//! Filter expression evaluator
//!
//! Runs a parsed expression tree against one field tuple. `And`/`Or` are
//! strict: both subtrees are evaluated and the results combined with
//! non-lazy `&`/`|`, so an evaluation error in the right operand surfaces
//! even when the left operand already decides the outcome. This matches
//! the surface language, where `&`/`||` are not conditional operators.

use crate::record::{FieldTuple, FieldValue};

use super::ast::{CmpOp, Expr};
use super::errors::{FilterError, FilterResult};

/// Evaluate `expr` against one tuple.
pub fn evaluate(expr: &Expr, tuple: &FieldTuple) -> FilterResult<bool> {
    match expr {
        Expr::And(left, right) => {
            let l = evaluate(left, tuple)?;
            let r = evaluate(right, tuple)?;
            Ok(l & r)
        }
        Expr::Or(left, right) => {
            let l = evaluate(left, tuple)?;
            let r = evaluate(right, tuple)?;
            Ok(l | r)
        }
        Expr::Compare { slot, op, value } => {
            let field = tuple
                .get(*slot)
                .ok_or_else(|| FilterError::slot_out_of_bounds(*slot, tuple.arity()))?;
            compare(field, *op, value)
        }
    }
}

/// Compare one field against a literal lexeme, dispatching on field type.
fn compare(field: &FieldValue, op: CmpOp, literal: &str) -> FilterResult<bool> {
    match field {
        FieldValue::Int(actual) => {
            let bound: i64 = literal
                .parse()
                .map_err(|_| FilterError::type_mismatch(literal, "integer"))?;
            Ok(match op {
                CmpOp::Eq => *actual == bound,
                CmpOp::Ne => *actual != bound,
                CmpOp::Gt => *actual > bound,
                CmpOp::Lt => *actual < bound,
            })
        }
        FieldValue::Float(actual) => {
            let bound: f64 = literal
                .parse()
                .map_err(|_| FilterError::type_mismatch(literal, "double"))?;
            // exact floating comparison, no epsilon
            Ok(match op {
                CmpOp::Eq => *actual == bound,
                CmpOp::Ne => *actual != bound,
                CmpOp::Gt => *actual > bound,
                CmpOp::Lt => *actual < bound,
            })
        }
        FieldValue::Str(actual) => {
            if op.is_ordering() {
                return Err(FilterError::op_not_applicable(op.as_str()));
            }
            // raw lexeme, case-insensitive, numeric-looking or not
            let equal = actual.to_lowercase() == literal.to_lowercase();
            Ok(match op {
                CmpOp::Eq => equal,
                CmpOp::Ne => !equal,
                CmpOp::Gt | CmpOp::Lt => unreachable!("ordering rejected above"),
            })
        }
    }
}
