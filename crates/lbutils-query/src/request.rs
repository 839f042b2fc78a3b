use bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::key::QUICK_SEARCH_KEY;

/// Query parameters a listing is filtered by.
///
/// Values are either raw strings (query string, form post) or already typed
/// values supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterRequest {
    params: Document,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from string pairs. A repeated key keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Document::new();
        for (k, v) in pairs {
            params.insert(k.into(), Bson::String(v.into()));
        }
        Self { params }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Bson>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Bson> {
        self.params.get(key)
    }

    pub fn iter(&self) -> bson::document::Iter<'_> {
        self.params.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn as_document(&self) -> &Document {
        &self.params
    }

    /// The quick search text, if any. Integers are accepted in their
    /// decimal form; other typed values carry no search text.
    pub fn quick_search_text(&self) -> Option<String> {
        match self.params.get(QUICK_SEARCH_KEY)? {
            Bson::String(s) => Some(s.clone()),
            Bson::Int32(n) => Some(n.to_string()),
            Bson::Int64(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<Document> for FilterRequest {
    fn from(params: Document) -> Self {
        Self { params }
    }
}
