//! Condition AST definitions.

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use relq_core::Value;

/// Reference to an attribute, optionally qualified by a table alias.
///
/// The alias is cosmetic: only `name` is resolved against a header.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttributeRef {
    /// Table alias as written (`R` in `R.qty`).
    pub qualifier: Option<String>,
    /// Attribute name.
    pub name: String,
}

impl AttributeRef {
    /// Creates an unqualified attribute reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
        }
    }

    /// Creates a qualified attribute reference.
    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(q) => write!(f, "{}.{}", q, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Relational operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl RelOp {
    /// Returns the operator as written in a condition.
    pub fn symbol(&self) -> &'static str {
        match self {
            RelOp::Eq => "=",
            RelOp::Ne => "!=",
            RelOp::Gt => ">",
            RelOp::Ge => ">=",
            RelOp::Lt => "<",
            RelOp::Le => "<=",
        }
    }

    /// Returns true if `ordering` satisfies this operator.
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            RelOp::Eq => ordering == Ordering::Equal,
            RelOp::Ne => ordering != Ordering::Equal,
            RelOp::Gt => ordering == Ordering::Greater,
            RelOp::Ge => ordering != Ordering::Less,
            RelOp::Lt => ordering == Ordering::Less,
            RelOp::Le => ordering != Ordering::Greater,
        }
    }
}

/// Arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    /// Returns the operator as written in a condition.
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }

    /// Applies the operator.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            ArithOp::Add => left + right,
            ArithOp::Sub => left - right,
            ArithOp::Mul => left * right,
            ArithOp::Div => left / right,
        }
    }

    /// Returns the operator that undoes this one (`-` and `+`, `*` and `/`).
    pub fn inverse(&self) -> ArithOp {
        match self {
            ArithOp::Add => ArithOp::Sub,
            ArithOp::Sub => ArithOp::Add,
            ArithOp::Mul => ArithOp::Div,
            ArithOp::Div => ArithOp::Mul,
        }
    }
}

/// Logical connective between parenthesized clauses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

/// One side of a comparison.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// Literal value.
    Literal(Value),
    /// Bare attribute reference.
    Attribute(AttributeRef),
    /// `attribute op literal`, evaluated in floating point.
    Arithmetic {
        attribute: AttributeRef,
        op: ArithOp,
        literal: f64,
    },
}

impl Operand {
    /// Returns the referenced attribute, whether bare or inside arithmetic.
    pub fn attribute(&self) -> Option<&AttributeRef> {
        match self {
            Operand::Literal(_) => None,
            Operand::Attribute(attr) => Some(attr),
            Operand::Arithmetic { attribute, .. } => Some(attribute),
        }
    }

    /// Returns the attribute if this operand is a bare attribute reference.
    pub fn bare_attribute(&self) -> Option<&AttributeRef> {
        match self {
            Operand::Attribute(attr) => Some(attr),
            _ => None,
        }
    }

    /// Returns the literal if this operand is one.
    pub fn literal(&self) -> Option<&Value> {
        match self {
            Operand::Literal(v) => Some(v),
            _ => None,
        }
    }
}

/// A simple condition: `operand relop operand`.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub left: Operand,
    pub op: RelOp,
    pub right: Operand,
}

impl Comparison {
    /// Creates a new comparison.
    pub fn new(left: Operand, op: RelOp, right: Operand) -> Self {
        Self { left, op, right }
    }
}

/// A parsed condition.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// A single comparison.
    Simple(Comparison),
    /// Parenthesized comparisons joined by one connective.
    Compound {
        connective: Connective,
        clauses: Vec<Comparison>,
    },
}

impl Condition {
    /// Returns the connective governing the clauses; a simple condition reads as AND.
    pub fn connective(&self) -> Connective {
        match self {
            Condition::Simple(_) => Connective::And,
            Condition::Compound { connective, .. } => *connective,
        }
    }

    /// Returns the comparisons in source order.
    pub fn clauses(&self) -> &[Comparison] {
        match self {
            Condition::Simple(c) => core::slice::from_ref(c),
            Condition::Compound { clauses, .. } => clauses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_relop_holds() {
        assert!(RelOp::Ge.holds(Ordering::Equal));
        assert!(RelOp::Ge.holds(Ordering::Greater));
        assert!(!RelOp::Gt.holds(Ordering::Equal));
        assert!(RelOp::Ne.holds(Ordering::Less));
        assert!(RelOp::Le.holds(Ordering::Less));
        assert!(!RelOp::Eq.holds(Ordering::Less));
    }

    #[test]
    fn test_arith_inverse() {
        for op in [ArithOp::Add, ArithOp::Sub, ArithOp::Mul, ArithOp::Div] {
            assert_eq!(op.inverse().inverse(), op);
            assert_eq!(op.inverse().apply(op.apply(60.0, 2.0), 2.0), 60.0);
        }
    }

    #[test]
    fn test_attribute_display() {
        assert_eq!(AttributeRef::qualified("R", "qty").to_string(), "R.qty");
        assert_eq!(AttributeRef::new("qty").to_string(), "qty");
    }

    #[test]
    fn test_condition_clauses() {
        let c = Comparison::new(
            Operand::Attribute(AttributeRef::new("a")),
            RelOp::Eq,
            Operand::Literal(Value::Int(1)),
        );
        let simple = Condition::Simple(c.clone());
        assert_eq!(simple.clauses().len(), 1);
        assert_eq!(simple.connective(), Connective::And);

        let compound = Condition::Compound {
            connective: Connective::Or,
            clauses: vec![c.clone(), c],
        };
        assert_eq!(compound.clauses().len(), 2);
        assert_eq!(compound.connective(), Connective::Or);
    }
}
