//! Condition binding and evaluation.
//!
//! Binding resolves every attribute in a parsed `Condition` to a position in one of
//! the input headers, producing a `CompiledCondition` that evaluates against a slice
//! of records: one record for selection, two (table1's, table2's) for joins.

use crate::ast::{ArithOp, Comparison, Condition, Connective, Operand, RelOp};
use alloc::vec::Vec;
use relq_core::{DataType, Error, Header, Record, Result, Value};

/// An operand with its attribute resolved to a record position.
#[derive(Clone, Debug, PartialEq)]
pub enum BoundOperand {
    /// Literal value.
    Literal(Value),
    /// Value at `position` of input record `input`.
    Column { input: usize, position: usize },
    /// Column value coerced to float, then combined with a literal.
    Arithmetic {
        input: usize,
        position: usize,
        op: ArithOp,
        literal: f64,
    },
}

impl BoundOperand {
    fn bind(operand: &Operand, input: usize, header: &Header) -> Result<Self> {
        Ok(match operand {
            Operand::Literal(v) => BoundOperand::Literal(v.clone()),
            Operand::Attribute(attr) => BoundOperand::Column {
                input,
                position: header.position(&attr.name)?,
            },
            Operand::Arithmetic {
                attribute,
                op,
                literal,
            } => BoundOperand::Arithmetic {
                input,
                position: header.position(&attribute.name)?,
                op: *op,
                literal: *literal,
            },
        })
    }

    /// Produces this operand's value for the given records.
    pub fn value<'a>(&'a self, records: &[&'a Record]) -> Result<OperandValue<'a>> {
        match self {
            BoundOperand::Literal(v) => Ok(OperandValue::Borrowed(v)),
            BoundOperand::Column { input, position } => {
                Ok(OperandValue::Borrowed(&records[*input].values()[*position]))
            }
            BoundOperand::Arithmetic {
                input,
                position,
                op,
                literal,
            } => {
                let stored = &records[*input].values()[*position];
                let x = stored.to_f64().ok_or_else(|| {
                    Error::type_mismatch(op.symbol(), stored.data_type(), DataType::Float)
                })?;
                Ok(OperandValue::Computed(Value::Float(op.apply(x, *literal))))
            }
        }
    }
}

/// A value produced by an operand, borrowed from a record or literal when possible.
#[derive(Debug)]
pub enum OperandValue<'a> {
    Borrowed(&'a Value),
    Computed(Value),
}

impl OperandValue<'_> {
    fn get(&self) -> &Value {
        match self {
            OperandValue::Borrowed(v) => v,
            OperandValue::Computed(v) => v,
        }
    }
}

/// A comparison with both operands bound.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundComparison {
    pub left: BoundOperand,
    pub op: RelOp,
    pub right: BoundOperand,
}

impl BoundComparison {
    /// Evaluates the comparison.
    ///
    /// Numbers compare with numbers and text with text; any other pairing fails with
    /// `TypeMismatch`.
    pub fn eval(&self, records: &[&Record]) -> Result<bool> {
        let left = self.left.value(records)?;
        let right = self.right.value(records)?;
        let (left, right) = (left.get(), right.get());
        match left.compare(right) {
            Some(ordering) => Ok(self.op.holds(ordering)),
            None => Err(Error::type_mismatch(
                self.op.symbol(),
                left.data_type(),
                right.data_type(),
            )),
        }
    }
}

/// A condition ready to evaluate against records.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledCondition {
    connective: Connective,
    clauses: Vec<BoundComparison>,
}

impl CompiledCondition {
    /// Returns the governing connective.
    pub fn connective(&self) -> Connective {
        self.connective
    }

    /// Returns the bound clauses in source order.
    pub fn clauses(&self) -> &[BoundComparison] {
        &self.clauses
    }

    /// Evaluates the condition, short-circuiting on the first deciding clause.
    pub fn eval(&self, records: &[&Record]) -> Result<bool> {
        match self.connective {
            Connective::And => eval_all(&self.clauses, records),
            Connective::Or => eval_any(&self.clauses, records),
        }
    }
}

/// Returns true if every clause holds.
pub fn eval_all(clauses: &[BoundComparison], records: &[&Record]) -> Result<bool> {
    for clause in clauses {
        if !clause.eval(records)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Returns true if at least one clause holds.
pub fn eval_any(clauses: &[BoundComparison], records: &[&Record]) -> Result<bool> {
    for clause in clauses {
        if clause.eval(records)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Binds a single-table condition against `header`.
pub fn compile_select(condition: &Condition, header: &Header) -> Result<CompiledCondition> {
    compile(condition, |c| {
        Ok(BoundComparison {
            left: BoundOperand::bind(&c.left, 0, header)?,
            op: c.op,
            right: BoundOperand::bind(&c.right, 0, header)?,
        })
    })
}

/// Binds a join condition: the left operand of every comparison resolves against
/// `left` (table1) and the right operand against `right` (table2).
pub fn compile_join(
    condition: &Condition,
    left: &Header,
    right: &Header,
) -> Result<CompiledCondition> {
    compile(condition, |c| {
        Ok(BoundComparison {
            left: BoundOperand::bind(&c.left, 0, left)?,
            op: c.op,
            right: BoundOperand::bind(&c.right, 1, right)?,
        })
    })
}

fn compile(
    condition: &Condition,
    bind: impl Fn(&Comparison) -> Result<BoundComparison>,
) -> Result<CompiledCondition> {
    let clauses = condition
        .clauses()
        .iter()
        .map(bind)
        .collect::<Result<Vec<_>>>()?;
    Ok(CompiledCondition {
        connective: condition.connective(),
        clauses,
    })
}
