use std::cmp::Ordering;

use bson::{Bson, Document};

use super::{CompareOp, Expression, Operand, TextOp};
use crate::convert::{compare, text_form};

/// Evaluate whether a record matches a compiled expression.
pub(crate) fn matches(doc: &Document, expr: &Expression) -> bool {
    match expr {
        Expression::And(children) => children.iter().all(|c| matches(doc, c)),
        Expression::Or(children) => children.iter().any(|c| matches(doc, c)),
        Expression::Compare { path, op, operand } => {
            let (Some(stored), Some(other)) = (get_path(doc, path), resolve(doc, operand)) else {
                // null never compares
                return false;
            };
            let predicate: fn(Ordering) -> bool = match op {
                CompareOp::Eq => |o| o == Ordering::Equal,
                CompareOp::Gt => |o| o == Ordering::Greater,
                CompareOp::Gte => |o| o != Ordering::Less,
                CompareOp::Lt => |o| o == Ordering::Less,
                CompareOp::Lte => |o| o != Ordering::Greater,
            };
            compare(stored, other).is_some_and(predicate)
        }
        Expression::Text {
            path,
            op,
            operand,
            case_insensitive,
        } => {
            let (Some(stored), Some(needle)) = (
                get_path(doc, path).and_then(text_form),
                resolve(doc, operand).and_then(text_form),
            ) else {
                return false;
            };
            let (stored, needle) = if *case_insensitive {
                (stored.to_lowercase(), needle.to_lowercase())
            } else {
                (stored, needle)
            };
            match op {
                TextOp::Exact => stored == needle,
                TextOp::Contains => stored.contains(&needle),
                TextOp::StartsWith => stored.starts_with(&needle),
                TextOp::EndsWith => stored.ends_with(&needle),
            }
        }
        Expression::In { path, values } => get_path(doc, path).is_some_and(|stored| {
            values
                .iter()
                .any(|v| compare(stored, v) == Some(Ordering::Equal))
        }),
        Expression::Range { path, low, high } => get_path(doc, path).is_some_and(|stored| {
            compare(stored, low).is_some_and(|o| o != Ordering::Less)
                && compare(stored, high).is_some_and(|o| o != Ordering::Greater)
        }),
        Expression::IsNull { path, expected } => get_path(doc, path).is_none() == *expected,
    }
}

fn resolve<'a>(doc: &'a Document, operand: &'a Operand) -> Option<&'a Bson> {
    match operand {
        Operand::Value(v) => Some(v),
        Operand::Field(path) => get_path(doc, path),
    }
}

/// Follow `path` through embedded documents. Missing keys, null values and
/// a null related record all read as `None`.
pub(crate) fn get_path<'a>(doc: &'a Document, path: &[String]) -> Option<&'a Bson> {
    let (last, parents) = path.split_last()?;
    let mut current = doc;
    for key in parents {
        match current.get(key)? {
            Bson::Document(sub) => current = sub,
            _ => return None,
        }
    }
    match current.get(last)? {
        Bson::Null => None,
        value => Some(value),
    }
}
