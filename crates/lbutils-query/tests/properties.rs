use lbutils_query::{FilterRequest, build_quick_predicate, build_structured_filter};
use proptest::prelude::*;

proptest! {
    #[test]
    fn missing_quick_search_is_identity(fields in prop::collection::vec("[a-z_]{1,12}", 0..4)) {
        let req = FilterRequest::from_pairs([("q__name", "x")]);
        let text = req.quick_search_text();
        prop_assert!(build_quick_predicate(text.as_deref(), &fields, &fields).is_empty());
    }

    #[test]
    fn keys_outside_the_query_namespace_are_ignored(
        pairs in prop::collection::vec(("[a-pr-z][a-z_]{0,10}", ".{0,12}"), 0..8)
    ) {
        let req = FilterRequest::from_pairs(pairs);
        let (predicate, keywords) = build_structured_filter(&req);
        prop_assert!(predicate.is_empty());
        prop_assert!(keywords.is_empty());
    }

    #[test]
    fn every_keyword_comes_from_a_non_empty_query_value(
        pairs in prop::collection::vec(("q__[a-z]{1,8}(__in|__gt)?", "[a-z0-9,，]{0,10}"), 0..8)
    ) {
        let req = FilterRequest::from_pairs(pairs);
        let (_, keywords) = build_structured_filter(&req);
        for (path, _) in &keywords {
            let key = format!("q__{path}");
            let value = req.get(&key).and_then(|v| v.as_str());
            prop_assert!(matches!(value, Some(v) if !v.is_empty()));
        }
    }

    #[test]
    fn comma_values_never_reach_keywords_without_in(
        field in "[a-z]{1,8}",
        tokens in prop::collection::vec("[a-z0-9]{0,5}", 2..5)
    ) {
        let req = FilterRequest::from_pairs([(format!("q__{field}"), tokens.join(","))]);
        let (_, keywords) = build_structured_filter(&req);
        prop_assert!(!keywords.contains_key(&field));
    }
}
