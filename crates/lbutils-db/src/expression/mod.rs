mod compile;
mod eval;

pub(crate) use compile::compile;
pub(crate) use eval::{get_path, matches};

use bson::Bson;

/// Right-hand side of a comparison: a literal or another field of the record.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    Value(Bson),
    Field(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompareOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextOp {
    Exact,
    Contains,
    StartsWith,
    EndsWith,
}

/// A filter resolved against a collection schema.
///
/// Owns resolved document paths and values already coerced to the field
/// type, so evaluation cannot fail. `And(vec![])` matches everything,
/// `Or(vec![])` nothing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expression {
    // Logical
    And(Vec<Expression>),
    Or(Vec<Expression>),
    // Comparison against a typed value or another field
    Compare {
        path: Vec<String>,
        op: CompareOp,
        operand: Operand,
    },
    // Text match on the string form of the stored value
    Text {
        path: Vec<String>,
        op: TextOp,
        operand: Operand,
        case_insensitive: bool,
    },
    In {
        path: Vec<String>,
        values: Vec<Bson>,
    },
    Range {
        path: Vec<String>,
        low: Bson,
        high: Bson,
    },
    IsNull {
        path: Vec<String>,
        expected: bool,
    },
}
