use std::fmt::Display;

use tracing::error;

use crate::build::{build_quick_predicate, build_structured_filter};
use crate::filter::Predicate;
use crate::keywords::KeywordConstraints;
use crate::request::FilterRequest;

/// A collection that can be narrowed by a predicate plus keyword constraints.
///
/// Implementations validate field paths and value types themselves; the
/// builder never does.
pub trait Filterable: Sized {
    type Error: Display;

    /// Return the subset matching `predicate` AND every keyword constraint.
    fn filter(
        &self,
        predicate: &Predicate,
        keywords: &KeywordConstraints,
    ) -> Result<Self, Self::Error>;
}

/// Filter `collection` by the request.
///
/// Fails open: when the filter cannot be applied the error is logged and a
/// clone of the unfiltered collection is returned.
pub fn apply<C, S>(
    collection: &C,
    request: &FilterRequest,
    text_fields: &[S],
    numeric_fields: &[S],
) -> C
where
    C: Filterable + Clone,
    S: AsRef<str>,
{
    match try_apply(collection, request, text_fields, numeric_fields) {
        Ok(filtered) => filtered,
        Err(e) => {
            error!(error = %e, "filter request could not be applied, returning unfiltered collection");
            collection.clone()
        }
    }
}

/// Like [`apply`] but hands the collaborator's error back to the caller.
pub fn try_apply<C, S>(
    collection: &C,
    request: &FilterRequest,
    text_fields: &[S],
    numeric_fields: &[S],
) -> Result<C, C::Error>
where
    C: Filterable,
    S: AsRef<str>,
{
    let text = request.quick_search_text();
    let quick = build_quick_predicate(text.as_deref(), text_fields, numeric_fields);
    let (structured, keywords) = build_structured_filter(request);
    collection.filter(&quick.and(structured), &keywords)
}
