//! Filter expression lexer
//!
//! Scans a filter string into tokens. Before scanning, a single regex
//! pre-pass rewrites the long-hand column syntax `column[N]` into the
//! compact `[N]`; the scanner itself only ever sees the compact form.
//!
//! The `|`/`<` asymmetry is part of the surface contract: a lone `|` is an
//! error while `<` followed by anything but `>` is a valid less-than. Both
//! require a lookahead character, so either one ending the input is an
//! error.

use std::iter::Peekable;
use std::str::CharIndices;
use std::sync::OnceLock;

use regex::Regex;

use super::errors::{FilterError, FilterResult};
use super::token::Token;

static COLUMN_FORM: OnceLock<Regex> = OnceLock::new();

/// Rewrite `column[N]` to `[N]`, leaving everything else untouched.
fn normalize(text: &str) -> String {
    let re = COLUMN_FORM.get_or_init(|| {
        Regex::new(r"column\[(-?\d+)\]").expect("column form pattern is valid")
    });
    re.replace_all(text, "[$1]").into_owned()
}

/// Tokenize a filter expression.
///
/// Returns the token sequence with an end marker appended, or a lex error
/// carrying the byte offset where scanning stopped.
pub fn tokenize(text: &str) -> FilterResult<Vec<Token>> {
    let normalized = normalize(text);
    let mut tokens = Vec::new();
    let mut chars = normalized.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            '&' => tokens.push(Token::And),
            '=' => tokens.push(Token::Eq),
            '>' => tokens.push(Token::Gt),
            '[' => tokens.push(Token::Column(scan_until(&mut chars, ']', pos)?)),
            '"' => tokens.push(Token::Value(scan_until(&mut chars, '"', pos)?)),
            '|' => match chars.peek() {
                Some((_, '|')) => {
                    chars.next();
                    tokens.push(Token::Or);
                }
                Some((next_pos, _)) => {
                    return Err(FilterError::lex("expected '|' after '|'", *next_pos));
                }
                None => return Err(FilterError::lex("input ends after '|'", pos)),
            },
            '<' => match chars.peek() {
                Some((_, '>')) => {
                    chars.next();
                    tokens.push(Token::Ne);
                }
                Some(_) => tokens.push(Token::Lt),
                None => return Err(FilterError::lex("input ends after '<'", pos)),
            },
            '0'..='9' => {
                let mut lexeme = String::new();
                lexeme.push(c);
                while let Some((_, d)) = chars.peek() {
                    if d.is_ascii_digit() {
                        lexeme.push(*d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Value(lexeme));
            }
            c if c.is_whitespace() => {}
            _ => {
                return Err(FilterError::lex(
                    format!("unrecognized character '{}'", c),
                    pos,
                ));
            }
        }
    }

    tokens.push(Token::End);
    Ok(tokens)
}

/// Collect characters up to (not including) `close`, consuming it.
///
/// `open_pos` is the byte offset of the opening character, reported when
/// the input ends before `close` appears.
fn scan_until(
    chars: &mut Peekable<CharIndices<'_>>,
    close: char,
    open_pos: usize,
) -> FilterResult<String> {
    let mut content = String::new();
    for (_, c) in chars.by_ref() {
        if c == close {
            return Ok(content);
        }
        content.push(c);
    }
    Err(FilterError::lex(
        format!("unterminated '{}'", if close == ']' { '[' } else { close }),
        open_pos,
    ))
}
