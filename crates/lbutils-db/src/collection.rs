use std::sync::Arc;

use bson::{Bson, Document};
use lbutils_query::{Filterable, KeywordConstraints, Predicate};
use tracing::debug;

use crate::error::DbError;
use crate::expression::{compile, matches};
use crate::schema::CollectionConfig;

/// An immutable set of records sharing one schema.
///
/// Filtering never mutates; it returns a new collection holding the
/// matching records in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    config: Arc<CollectionConfig>,
    records: Vec<Document>,
}

impl Collection {
    pub fn new(config: CollectionConfig, records: Vec<Document>) -> Self {
        Self {
            config: Arc::new(config),
            records,
        }
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn records(&self) -> &[Document] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn into_records(self) -> Vec<Document> {
        self.records
    }

    /// Records matching `predicate` AND all `keywords`.
    pub fn filter(
        &self,
        predicate: &Predicate,
        keywords: &KeywordConstraints,
    ) -> Result<Collection, DbError> {
        let combined = predicate.clone().and(keywords.to_predicate());
        let expr = compile(&self.config, &combined)?;
        let records: Vec<Document> = self
            .records
            .iter()
            .filter(|doc| matches(doc, &expr))
            .cloned()
            .collect();
        debug!(
            collection = %self.config.name,
            before = self.records.len(),
            after = records.len(),
            "filtered"
        );
        Ok(Collection {
            config: Arc::clone(&self.config),
            records,
        })
    }

    /// The single record matching `keywords`.
    pub fn get(&self, keywords: &KeywordConstraints) -> Result<&Document, DbError> {
        let expr = compile(&self.config, &keywords.to_predicate())?;
        let mut found = self.records.iter().filter(|doc| matches(doc, &expr));
        let first = found.next().ok_or_else(|| DbError::NotFound {
            model: self.config.name.clone(),
        })?;
        let extra = found.count();
        if extra > 0 {
            return Err(DbError::MultipleObjectsReturned {
                model: self.config.name.clone(),
                count: extra + 1,
            });
        }
        Ok(first)
    }

    /// [`Collection::get`], with any failure read as "no record".
    pub fn get_or_none(&self, keywords: &KeywordConstraints) -> Option<&Document> {
        self.get(keywords).ok()
    }

    /// Primary key of [`Collection::get_or_none`]'s record.
    pub fn get_pk_or_none(&self, keywords: &KeywordConstraints) -> Option<&Bson> {
        self.get_or_none(keywords)?
            .get(&self.config.primary_key)
            .filter(|pk| !matches!(pk, Bson::Null))
    }
}

impl Filterable for Collection {
    type Error = DbError;

    fn filter(
        &self,
        predicate: &Predicate,
        keywords: &KeywordConstraints,
    ) -> Result<Self, Self::Error> {
        Collection::filter(self, predicate, keywords)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
