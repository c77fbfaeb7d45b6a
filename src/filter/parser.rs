//! Recursive-descent parser for filter expressions
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr   := or
//! or     := and ( '||' and )*
//! and    := factor ( '&' factor )*
//! factor := COLUMN cmp_op VALUE
//!         | '(' expr ')'
//! ```
//!
//! The parser runs once per filter text and produces an [`Expr`] tree.
//! Column references resolve to tuple slots here, at parse time: the
//! source layout puts the record name in logical column 2, so `[1]` maps
//! to slot 0, `[3]`..`[14]` map to slots 1..12, and everything else
//! (including exactly 2) is out of range. The gap is part of the contract.

use super::ast::{CmpOp, Expr};
use super::errors::{FilterError, FilterResult};
use super::token::Token;

static END: Token = Token::End;

/// Read position over a token sequence.
///
/// One cursor belongs to one parse; it only ever moves forward, one token
/// of lookahead at a time. The sequence always ends with [`Token::End`],
/// so `peek`/`advance` saturate there instead of running off the end.
struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Current position, for diagnostics
    fn pos(&self) -> usize {
        self.pos
    }

    /// Token at the current position without consuming it
    fn peek(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&END)
    }

    /// Consume and return the token at the current position
    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }
}

/// Parse a tokenized filter expression into an expression tree.
///
/// The token sequence must carry the end marker `tokenize` appends. After
/// the top-level expression the cursor must sit on that marker; leftover
/// tokens are rejected rather than silently ignored.
pub fn parse(tokens: &[Token]) -> FilterResult<Expr> {
    let mut parser = Parser {
        cursor: TokenCursor::new(tokens),
    };
    let expr = parser.expr()?;

    let pos = parser.cursor.pos();
    match parser.cursor.peek() {
        Token::End => Ok(expr),
        Token::RParen => Err(FilterError::unbalanced_paren(
            "')' without a matching '('",
            pos,
        )),
        token => Err(FilterError::unexpected_token(token, pos)),
    }
}

/// Map a raw column reference onto a tuple slot.
fn resolve_column(raw: &str) -> FilterResult<usize> {
    let n: i64 = raw.parse().map_err(|_| FilterError::column_range(raw))?;
    if n == 1 {
        Ok(0)
    } else if n > 2 && n < 15 {
        Ok((n - 2) as usize)
    } else {
        Err(FilterError::column_range(raw))
    }
}

struct Parser<'a> {
    cursor: TokenCursor<'a>,
}

impl<'a> Parser<'a> {
    fn expr(&mut self) -> FilterResult<Expr> {
        self.or()
    }

    fn or(&mut self) -> FilterResult<Expr> {
        let mut expr = self.and()?;
        while matches!(self.cursor.peek(), Token::Or) {
            self.cursor.advance();
            let rhs = self.and()?;
            expr = Expr::or(expr, rhs);
        }
        Ok(expr)
    }

    fn and(&mut self) -> FilterResult<Expr> {
        let mut expr = self.factor()?;
        while matches!(self.cursor.peek(), Token::And) {
            self.cursor.advance();
            let rhs = self.factor()?;
            expr = Expr::and(expr, rhs);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> FilterResult<Expr> {
        let pos = self.cursor.pos();
        match self.cursor.advance() {
            Token::Column(raw) => {
                let slot = resolve_column(raw)?;
                let op = self.comparison_op()?;
                let value = self.comparison_value()?;
                Ok(Expr::compare(slot, op, value))
            }
            Token::LParen => {
                let expr = self.expr()?;
                let close_pos = self.cursor.pos();
                match self.cursor.advance() {
                    Token::RParen => Ok(expr),
                    token => Err(FilterError::unbalanced_paren(
                        format!("expected ')' but found {}", token),
                        close_pos,
                    )),
                }
            }
            Token::End => Err(FilterError::unbalanced_paren(
                "expression ended where an operand was expected",
                pos,
            )),
            token => Err(FilterError::unexpected_token(token, pos)),
        }
    }

    /// The token after a column reference must be a comparison operator.
    fn comparison_op(&mut self) -> FilterResult<CmpOp> {
        let pos = self.cursor.pos();
        match self.cursor.advance() {
            Token::Eq => Ok(CmpOp::Eq),
            Token::Ne => Ok(CmpOp::Ne),
            Token::Gt => Ok(CmpOp::Gt),
            Token::Lt => Ok(CmpOp::Lt),
            token => Err(FilterError::unexpected_token(token, pos)),
        }
    }

    /// The token after a comparison operator must be a literal.
    ///
    /// A `(` or the end marker here means a bracket group was opened (or
    /// the input cut off) where a literal belongs; both read as asymmetric
    /// bracket structure rather than a stray token.
    fn comparison_value(&mut self) -> FilterResult<String> {
        let pos = self.cursor.pos();
        match self.cursor.advance() {
            Token::Value(raw) => Ok(raw.clone()),
            Token::End => Err(FilterError::unbalanced_paren(
                "expression ended where a value was expected",
                pos,
            )),
            Token::LParen => Err(FilterError::unbalanced_paren(
                "'(' where a value was expected",
                pos,
            )),
            token => Err(FilterError::unexpected_token(token, pos)),
        }
    }
}
