//! Condition parser.
//!
//! Grammar:
//!
//! ```text
//! condition  := comparison | group (connective group)*
//! group      := '(' comparison ')'
//! connective := 'and' | 'or'                      (case-insensitive)
//! comparison := operand relop operand
//! operand    := literal | attribute | attribute arithop number
//! attribute  := ident | ident '.' ident
//! literal    := number | '\'' chars '\''
//! ```
//!
//! A compound condition uses one connective throughout. When the connectives differ
//! the first one governs every pairing.

mod lexer;

pub use lexer::{tokenize, Token, TokenKind};

use crate::ast::{ArithOp, AttributeRef, Comparison, Condition, Connective, Operand};
use alloc::string::String;
use alloc::vec::Vec;
use relq_core::{Error, Result, Value};
use tracing::warn;

/// Parses condition text into a `Condition`.
pub fn parse_condition(input: &str) -> Result<Condition> {
    let tokens = tokenize(input)?;
    Parser::new(tokens, input.len()).parse()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>, end: usize) -> Self {
        Self { tokens, pos: 0, end }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map(|t| t.position).unwrap_or(self.end)
    }

    fn next(&mut self) -> Option<TokenKind> {
        let token = self.tokens.get(self.pos).map(|t| t.kind.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error<T>(&self, message: impl Into<String>) -> Result<T> {
        Err(Error::malformed_expression(message, self.position()))
    }

    fn expect(&mut self, expected: TokenKind, what: &str) -> Result<()> {
        if self.peek() == Some(&expected) {
            self.pos += 1;
            Ok(())
        } else {
            self.error(alloc::format!("expected {}", what))
        }
    }

    fn parse(&mut self) -> Result<Condition> {
        let condition = match self.peek() {
            None => return self.error("empty condition"),
            Some(TokenKind::LParen) => self.parse_compound()?,
            Some(_) => Condition::Simple(self.parse_comparison()?),
        };
        if self.peek().is_some() {
            return self.error("unexpected trailing input");
        }
        Ok(condition)
    }

    fn parse_compound(&mut self) -> Result<Condition> {
        let mut clauses = Vec::new();
        let mut connectives = Vec::new();
        loop {
            self.expect(TokenKind::LParen, "'('")?;
            clauses.push(self.parse_comparison()?);
            self.expect(TokenKind::RParen, "')'")?;
            if self.peek().is_none() {
                break;
            }
            connectives.push(self.parse_connective()?);
        }

        let connective = match connectives.first() {
            None => return Ok(Condition::Simple(clauses.remove(0))),
            Some(first) => *first,
        };
        if connectives.iter().any(|c| *c != connective) {
            warn!(?connective, "mixed connectives in condition; the first one governs");
        }
        Ok(Condition::Compound {
            connective,
            clauses,
        })
    }

    fn parse_connective(&mut self) -> Result<Connective> {
        match self.peek() {
            Some(TokenKind::Ident(word)) if word.eq_ignore_ascii_case("and") => {
                self.pos += 1;
                Ok(Connective::And)
            }
            Some(TokenKind::Ident(word)) if word.eq_ignore_ascii_case("or") => {
                self.pos += 1;
                Ok(Connective::Or)
            }
            _ => self.error("expected 'and' or 'or'"),
        }
    }

    fn parse_comparison(&mut self) -> Result<Comparison> {
        let left = self.parse_operand()?;
        let op = match self.peek() {
            Some(TokenKind::RelOp(op)) => *op,
            _ => return self.error("expected relational operator"),
        };
        self.pos += 1;
        let right = self.parse_operand()?;
        Ok(Comparison::new(left, op, right))
    }

    fn parse_operand(&mut self) -> Result<Operand> {
        let position = self.position();
        match self.next() {
            Some(TokenKind::Str(s)) => Ok(Operand::Literal(Value::Str(s))),
            Some(TokenKind::Number(v)) => {
                if let Some(TokenKind::ArithOp(_)) = self.peek() {
                    return self.error("arithmetic must start with an attribute");
                }
                Ok(Operand::Literal(v))
            }
            Some(TokenKind::Ident(first)) => {
                let attribute = if self.peek() == Some(&TokenKind::Dot) {
                    self.pos += 1;
                    match self.next() {
                        Some(TokenKind::Ident(name)) => AttributeRef::qualified(first, name),
                        _ => {
                            self.pos -= 1;
                            return self.error("expected attribute name after '.'");
                        }
                    }
                } else {
                    AttributeRef::new(first)
                };
                match self.peek() {
                    Some(TokenKind::ArithOp(op)) => {
                        let op = *op;
                        self.pos += 1;
                        let literal = self.parse_arith_literal(op)?;
                        Ok(Operand::Arithmetic {
                            attribute,
                            op,
                            literal,
                        })
                    }
                    _ => Ok(Operand::Attribute(attribute)),
                }
            }
            _ => Err(Error::malformed_expression("expected operand", position)),
        }
    }

    fn parse_arith_literal(&mut self, op: ArithOp) -> Result<f64> {
        let literal = match self.peek() {
            Some(TokenKind::Number(v)) => v.to_f64(),
            _ => None,
        };
        match literal {
            Some(l) if op == ArithOp::Div && l == 0.0 => self.error("division by zero"),
            Some(l) => {
                self.pos += 1;
                Ok(l)
            }
            None => self.error("expected numeric literal after arithmetic operator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::RelOp;
    use alloc::vec;

    fn attr(name: &str) -> Operand {
        Operand::Attribute(AttributeRef::new(name))
    }

    #[test]
    fn test_parse_simple() {
        let cond = parse_condition("qty > 30").unwrap();
        assert_eq!(
            cond,
            Condition::Simple(Comparison::new(
                attr("qty"),
                RelOp::Gt,
                Operand::Literal(Value::Int(30))
            ))
        );
    }

    #[test]
    fn test_parse_literal_first_with_arithmetic() {
        let cond = parse_condition("30 = qty / 2").unwrap();
        assert_eq!(
            cond.clauses()[0],
            Comparison::new(
                Operand::Literal(Value::Int(30)),
                RelOp::Eq,
                Operand::Arithmetic {
                    attribute: AttributeRef::new("qty"),
                    op: ArithOp::Div,
                    literal: 2.0,
                }
            )
        );
    }

    #[test]
    fn test_parse_join_condition() {
        let cond = parse_condition("R.customerid = S.C").unwrap();
        let clause = &cond.clauses()[0];
        assert_eq!(clause.left, Operand::Attribute(AttributeRef::qualified("R", "customerid")));
        assert_eq!(clause.right, Operand::Attribute(AttributeRef::qualified("S", "C")));
    }

    #[test]
    fn test_parse_compound() {
        let cond = parse_condition("(time > 50) or (qty < 30) OR (itemid = 'x')").unwrap();
        match cond {
            Condition::Compound {
                connective,
                clauses,
            } => {
                assert_eq!(connective, Connective::Or);
                assert_eq!(clauses.len(), 3);
                assert_eq!(clauses[2].right, Operand::Literal(Value::from("x")));
            }
            other => panic!("expected compound, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_connectives_first_governs() {
        let cond = parse_condition("(a = 1) and (b = 2) or (c = 3)").unwrap();
        assert_eq!(cond.connective(), Connective::And);
        assert_eq!(cond.clauses().len(), 3);
    }

    #[test]
    fn test_single_group_is_simple() {
        let cond = parse_condition("(a = 1)").unwrap();
        assert!(matches!(cond, Condition::Simple(_)));
    }

    #[test]
    fn test_parse_errors() {
        let cases = vec![
            ("", 0),
            ("qty", 3),
            ("qty >", 5),
            ("(a = 1) xor (b = 2)", 8),
            ("(a = 1", 6),
            ("a = 1 b", 6),
            ("2 * qty = 4", 2),
            ("qty / 0 = 1", 6),
            ("qty + 'x' = 1", 6),
            ("R. = 1", 3),
        ];
        for (input, position) in cases {
            match parse_condition(input) {
                Err(Error::MalformedExpression { position: p, .. }) => {
                    assert_eq!(p, position, "input: {}", input)
                }
                other => panic!("input {:?} gave {:?}", input, other),
            }
        }
    }
}
