//! Tokenizer for condition text.

use crate::ast::{ArithOp, RelOp};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use relq_core::{Error, Result, Value};

/// Token kinds produced by the lexer.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Attribute name, alias, or connective word.
    Ident(String),
    /// Integer or decimal literal.
    Number(Value),
    /// Single-quoted string literal, contents verbatim.
    Str(String),
    RelOp(RelOp),
    ArithOp(ArithOp),
    LParen,
    RParen,
    Dot,
}

/// A token with the byte offset it starts at.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if pred(c) {
                self.advance();
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_whitespace();
        let position = self.pos;
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(None),
        };

        let kind = match c {
            '(' => {
                self.advance();
                TokenKind::LParen
            }
            ')' => {
                self.advance();
                TokenKind::RParen
            }
            '.' => {
                self.advance();
                TokenKind::Dot
            }
            '+' | '-' | '*' | '/' => {
                self.advance();
                TokenKind::ArithOp(match c {
                    '+' => ArithOp::Add,
                    '-' => ArithOp::Sub,
                    '*' => ArithOp::Mul,
                    _ => ArithOp::Div,
                })
            }
            '=' => {
                self.advance();
                TokenKind::RelOp(RelOp::Eq)
            }
            '!' => {
                self.advance();
                if self.peek() != Some('=') {
                    return Err(Error::malformed_expression("expected '=' after '!'", position));
                }
                self.advance();
                TokenKind::RelOp(RelOp::Ne)
            }
            '>' | '<' => {
                self.advance();
                let or_equal = self.peek() == Some('=');
                if or_equal {
                    self.advance();
                }
                TokenKind::RelOp(match (c, or_equal) {
                    ('>', false) => RelOp::Gt,
                    ('>', true) => RelOp::Ge,
                    ('<', false) => RelOp::Lt,
                    _ => RelOp::Le,
                })
            }
            '\'' => {
                self.advance();
                let body = self.take_while(|c| c != '\'');
                if self.peek() != Some('\'') {
                    return Err(Error::malformed_expression("unterminated string literal", position));
                }
                self.advance();
                TokenKind::Str(body.to_string())
            }
            c if c.is_ascii_digit() => self.number(position)?,
            c if c.is_alphanumeric() || c == '_' => {
                let word = self.take_while(|c| c.is_alphanumeric() || c == '_');
                TokenKind::Ident(word.to_string())
            }
            other => {
                return Err(Error::malformed_expression(
                    alloc::format!("unexpected character '{}'", other),
                    position,
                ))
            }
        };

        Ok(Some(Token { kind, position }))
    }

    /// Digits, optionally followed by `.` and more digits.
    fn number(&mut self, position: usize) -> Result<TokenKind> {
        let start = self.pos;
        self.take_while(|c| c.is_ascii_digit());
        let is_decimal = self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit());
        if is_decimal {
            self.advance();
            self.take_while(|c| c.is_ascii_digit());
        }
        if self.peek().is_some_and(|c| c.is_alphabetic() || c == '_') {
            return Err(Error::malformed_expression("malformed number", position));
        }

        let text = &self.input[start..self.pos];
        let value = if is_decimal {
            text.parse::<f64>().map(Value::Float).ok()
        } else {
            text.parse::<i64>().map(Value::Int).ok()
        };
        value
            .map(TokenKind::Number)
            .ok_or_else(|| Error::malformed_expression("number out of range", position))
    }
}

/// Splits condition text into tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
