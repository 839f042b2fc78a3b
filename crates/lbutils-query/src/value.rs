use std::borrow::Cow;

use bson::Bson;
use serde::{Deserialize, Serialize};

use crate::key::{
    FALSE_TOKEN, FIELD_REFERENCE_MARKER, FULLWIDTH_COMMA, FilterKey, TRUE_TOKEN,
};
use crate::lookup::Lookup;

/// Right-hand side of a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintValue {
    Literal(Bson),
    /// Compare against another field of the same record.
    FieldReference(String),
    MembershipList(Vec<Bson>),
}

impl ConstraintValue {
    pub fn string(s: impl Into<String>) -> Self {
        ConstraintValue::Literal(Bson::String(s.into()))
    }
}

/// Outcome of classifying one structured key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedValue {
    Literal(Bson),
    FieldReference(String),
    MembershipList(Vec<Bson>),
    /// Comma separated tokens OR-ed as equality on the key's own path.
    OrGroup(Vec<String>),
}

/// Classify a structured value. `None` means the key carries no constraint.
///
/// Precedence: typed value, empty string, `F__` reference, `__in` list,
/// comma list, literal with boolean tokens.
pub fn classify_value(key: &FilterKey<'_>, value: &Bson) -> Option<ClassifiedValue> {
    let raw = match value {
        Bson::Null => return None,
        Bson::String(s) => s.as_str(),
        other => return Some(ClassifiedValue::Literal(other.clone())),
    };
    if raw.is_empty() {
        return None;
    }

    let normalized = normalize_commas(raw);
    let v = normalized.as_ref();

    if let Some(field) = v.strip_prefix(FIELD_REFERENCE_MARKER) {
        return Some(ClassifiedValue::FieldReference(field.to_string()));
    }
    if key.lookup == Some(Lookup::In) {
        let items = split_tokens(v).into_iter().map(Bson::String).collect();
        return Some(ClassifiedValue::MembershipList(items));
    }
    if v.contains(',') {
        return Some(ClassifiedValue::OrGroup(split_tokens(v)));
    }
    Some(ClassifiedValue::Literal(coerce_bool_token(v)))
}

pub fn normalize_commas(value: &str) -> Cow<'_, str> {
    if value.contains(FULLWIDTH_COMMA) {
        Cow::Owned(value.replace(FULLWIDTH_COMMA, ","))
    } else {
        Cow::Borrowed(value)
    }
}

/// Split on `,`, dropping empty tokens.
pub fn split_tokens(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn coerce_bool_token(value: &str) -> Bson {
    match value {
        TRUE_TOKEN => Bson::Boolean(true),
        FALSE_TOKEN => Bson::Boolean(false),
        other => Bson::String(other.to_string()),
    }
}
