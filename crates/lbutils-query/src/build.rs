use tracing::debug;

use crate::filter::{Condition, Predicate};
use crate::key::{KeyMarker, parse_key};
use crate::keywords::KeywordConstraints;
use crate::lookup::Lookup;
use crate::request::FilterRequest;
use crate::value::{ClassifiedValue, ConstraintValue, classify_value};

/// Fan free text out over `text_fields` (case-insensitive containment) and,
/// when the text is all digits, over `numeric_fields` (equality). The parts
/// are OR-ed; empty text yields the identity predicate.
pub fn build_quick_predicate<S: AsRef<str>>(
    text: Option<&str>,
    text_fields: &[S],
    numeric_fields: &[S],
) -> Predicate {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return Predicate::all(),
    };

    let mut predicate = Predicate::all();
    for field in text_fields {
        predicate = predicate.or(Predicate::condition(Condition::new(
            field.as_ref(),
            Lookup::IContains,
            ConstraintValue::string(text),
        )));
    }
    if text.chars().all(|c| c.is_ascii_digit()) {
        for field in numeric_fields {
            predicate = predicate.or(Predicate::condition(Condition::new(
                field.as_ref(),
                Lookup::Exact,
                ConstraintValue::string(text),
            )));
        }
    }
    predicate
}

/// Translate the `q__` keys of a request into a predicate (comma list OR
/// groups) and a keyword constraint set (everything else).
pub fn build_structured_filter(request: &FilterRequest) -> (Predicate, KeywordConstraints) {
    let mut predicate = Predicate::all();
    let mut keywords = KeywordConstraints::new();

    for (k, v) in request.iter() {
        let key = match parse_key(k) {
            Some(key) if key.marker == KeyMarker::Query => key,
            _ => continue,
        };
        let Some(classified) = classify_value(&key, v) else {
            debug!(key = k.as_str(), "no constraint");
            continue;
        };

        let value = match classified {
            ClassifiedValue::OrGroup(tokens) => {
                let group = tokens
                    .into_iter()
                    .map(|token| {
                        Predicate::condition(Condition::new(
                            key.field_path,
                            key.lookup_or_exact(),
                            ConstraintValue::string(token),
                        ))
                    })
                    .fold(Predicate::all(), Predicate::or);
                predicate = predicate.and(group);
                continue;
            }
            ClassifiedValue::Literal(v) => ConstraintValue::Literal(v),
            ClassifiedValue::FieldReference(f) => ConstraintValue::FieldReference(f),
            ClassifiedValue::MembershipList(items) => ConstraintValue::MembershipList(items),
        };
        keywords.insert(key.path(), value);
    }

    (predicate, keywords)
}
