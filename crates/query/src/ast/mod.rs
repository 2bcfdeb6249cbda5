//! AST module for query conditions.

mod expr;

pub use expr::{ArithOp, AttributeRef, Comparison, Condition, Connective, Operand, RelOp};
