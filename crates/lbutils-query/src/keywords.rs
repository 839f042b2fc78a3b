use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

use crate::filter::{Condition, Predicate};
use crate::key::split_lookup;
use crate::lookup::Lookup;
use crate::value::ConstraintValue;

/// Exact-match (or lookup-suffixed) constraints keyed by path, e.g.
/// `name__icontains`. All entries are conjoined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordConstraints {
    entries: BTreeMap<String, ConstraintValue>,
}

impl KeywordConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, value: ConstraintValue) {
        self.entries.insert(path.into(), value);
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<String>, value: ConstraintValue) -> Self {
        self.insert(path, value);
        self
    }

    pub fn get(&self, path: &str) -> Option<&ConstraintValue> {
        self.entries.get(path)
    }

    pub fn contains_key(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ConstraintValue> {
        self.entries.iter()
    }

    /// The entries as an AND of conditions, splitting each path into field
    /// and lookup.
    pub fn to_predicate(&self) -> Predicate {
        self.entries
            .iter()
            .map(|(path, value)| {
                let (field, lookup) = split_lookup(path);
                Predicate::condition(Condition::new(
                    field,
                    lookup.unwrap_or(Lookup::Exact),
                    value.clone(),
                ))
            })
            .fold(Predicate::all(), Predicate::and)
    }
}

impl<'a> IntoIterator for &'a KeywordConstraints {
    type Item = (&'a String, &'a ConstraintValue);
    type IntoIter = btree_map::Iter<'a, String, ConstraintValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{LogicalOp, PredicateNode};
    use bson::Bson;

    #[test]
    fn empty_set_is_identity_predicate() {
        assert!(KeywordConstraints::new().to_predicate().is_empty());
    }

    #[test]
    fn entries_become_conjoined_conditions() {
        let mut kw = KeywordConstraints::new();
        kw.insert("is_active", ConstraintValue::Literal(Bson::Boolean(false)));
        kw.insert("name__icontains", ConstraintValue::string("book"));

        let p = kw.to_predicate();
        assert_eq!(p.logical, LogicalOp::And);
        assert_eq!(p.children.len(), 2);
        // BTreeMap order: is_active, name__icontains
        match &p.children[1] {
            PredicateNode::Condition(c) => {
                assert_eq!(c.field, "name");
                assert_eq!(c.lookup, Lookup::IContains);
            }
            _ => panic!("expected condition"),
        }
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut kw = KeywordConstraints::new();
        kw.insert("is_active", ConstraintValue::Literal(Bson::Boolean(false)));
        let json = serde_json::to_value(&kw).unwrap();
        assert_eq!(json["is_active"]["literal"], false);
    }
}
