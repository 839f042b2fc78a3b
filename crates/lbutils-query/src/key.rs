use crate::lookup::Lookup;

/// Prefix marking a structured filter key (`q__price__gte`).
pub const QUERY_MARKER: &str = "q__";
/// Reserved key holding the free-text quick search.
pub const QUICK_SEARCH_KEY: &str = "q_quick_search_kw";
/// Value prefix turning a value into a reference to another field.
pub const FIELD_REFERENCE_MARKER: &str = "F__";
/// Separator between relation hops and the trailing lookup.
pub const LOOKUP_SEPARATOR: &str = "__";
pub const TRUE_TOKEN: &str = "__True";
pub const FALSE_TOKEN: &str = "__False";
/// Full-width comma, accepted in pasted input as a list separator.
pub const FULLWIDTH_COMMA: char = '\u{ff0c}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMarker {
    Query,
    QuickSearch,
}

/// A request key split into its marker, field path and optional lookup.
///
/// Borrows from the key it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterKey<'a> {
    pub marker: KeyMarker,
    /// The key with the marker stripped, lookup suffix included.
    pub raw_path: &'a str,
    /// Field path with relation hops (`category__name`), lookup suffix removed.
    pub field_path: &'a str,
    pub lookup: Option<Lookup>,
}

impl<'a> FilterKey<'a> {
    /// Path recorded in the keyword constraint set, e.g. `name__icontains`.
    pub fn path(&self) -> &'a str {
        self.raw_path
    }

    /// The lookup to apply, `exact` when the key names none.
    pub fn lookup_or_exact(&self) -> Lookup {
        self.lookup.unwrap_or(Lookup::Exact)
    }
}

/// Parse a request key. Keys outside both namespaces yield `None`.
pub fn parse_key(key: &str) -> Option<FilterKey<'_>> {
    if key == QUICK_SEARCH_KEY {
        return Some(FilterKey {
            marker: KeyMarker::QuickSearch,
            raw_path: "",
            field_path: "",
            lookup: None,
        });
    }

    let raw_path = key.strip_prefix(QUERY_MARKER)?;
    let (field_path, lookup) = split_lookup(raw_path);
    Some(FilterKey {
        marker: KeyMarker::Query,
        raw_path,
        field_path,
        lookup,
    })
}

/// Split a trailing lookup segment off a path.
///
/// `name__icontains` → (`name`, `icontains`); `category__name` has no lookup
/// and is returned whole.
pub fn split_lookup(path: &str) -> (&str, Option<Lookup>) {
    match path.rsplit_once(LOOKUP_SEPARATOR) {
        Some((head, tail)) => match Lookup::from_suffix(tail) {
            Some(lookup) => (head, Some(lookup)),
            None => (path, None),
        },
        None => (path, None),
    }
}
