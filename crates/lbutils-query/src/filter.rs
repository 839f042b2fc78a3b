use serde::{Deserialize, Serialize};

use crate::lookup::Lookup;
use crate::value::ConstraintValue;

/// A single `field__lookup = value` constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub lookup: Lookup,
    pub value: ConstraintValue,
}

impl Condition {
    pub fn new(field: impl Into<String>, lookup: Lookup, value: ConstraintValue) -> Self {
        Self {
            field: field.into(),
            lookup,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateNode {
    Condition(Condition),
    Group(Predicate),
}

/// Boolean combination of conditions.
///
/// A predicate without children matches everything, and is the identity for
/// both [`Predicate::and`] and [`Predicate::or`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub logical: LogicalOp,
    pub children: Vec<PredicateNode>,
}

impl Default for Predicate {
    fn default() -> Self {
        Self::all()
    }
}

impl Predicate {
    /// The identity predicate.
    pub fn all() -> Self {
        Self {
            logical: LogicalOp::And,
            children: Vec::new(),
        }
    }

    pub fn condition(condition: Condition) -> Self {
        Self {
            logical: LogicalOp::And,
            children: vec![PredicateNode::Condition(condition)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn and(self, other: Predicate) -> Predicate {
        self.combine(other, LogicalOp::And)
    }

    #[must_use]
    pub fn or(self, other: Predicate) -> Predicate {
        self.combine(other, LogicalOp::Or)
    }

    fn combine(self, other: Predicate, logical: LogicalOp) -> Predicate {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        let mut children = Vec::with_capacity(self.children.len() + other.children.len());
        absorb(&mut children, self, logical);
        absorb(&mut children, other, logical);
        Predicate { logical, children }
    }

    /// All conditions in the tree, depth first.
    pub fn conditions(&self) -> Vec<&Condition> {
        let mut out = Vec::new();
        collect_conditions(self, &mut out);
        out
    }
}

/// Flatten `part` into `children` when its operator agrees with `logical`
/// (or it has a single child, where the operator is irrelevant).
fn absorb(children: &mut Vec<PredicateNode>, part: Predicate, logical: LogicalOp) {
    if part.logical == logical || part.children.len() == 1 {
        children.extend(part.children);
    } else {
        children.push(PredicateNode::Group(part));
    }
}

fn collect_conditions<'a>(predicate: &'a Predicate, out: &mut Vec<&'a Condition>) {
    for child in &predicate.children {
        match child {
            PredicateNode::Condition(c) => out.push(c),
            PredicateNode::Group(g) => collect_conditions(g, out),
        }
    }
}
