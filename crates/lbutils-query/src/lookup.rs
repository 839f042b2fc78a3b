use std::fmt;

use serde::{Deserialize, Serialize};

/// Field lookup named by the trailing `__<lookup>` segment of a filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookup {
    Exact,
    IExact,
    Contains,
    IContains,
    In,
    Gt,
    Gte,
    Lt,
    Lte,
    StartsWith,
    IStartsWith,
    EndsWith,
    IEndsWith,
    IsNull,
    Range,
}

impl Lookup {
    pub const ALL: [Lookup; 15] = [
        Lookup::Exact,
        Lookup::IExact,
        Lookup::Contains,
        Lookup::IContains,
        Lookup::In,
        Lookup::Gt,
        Lookup::Gte,
        Lookup::Lt,
        Lookup::Lte,
        Lookup::StartsWith,
        Lookup::IStartsWith,
        Lookup::EndsWith,
        Lookup::IEndsWith,
        Lookup::IsNull,
        Lookup::Range,
    ];

    /// The key suffix this lookup is spelled as, without the `__` separator.
    pub fn as_str(self) -> &'static str {
        match self {
            Lookup::Exact => "exact",
            Lookup::IExact => "iexact",
            Lookup::Contains => "contains",
            Lookup::IContains => "icontains",
            Lookup::In => "in",
            Lookup::Gt => "gt",
            Lookup::Gte => "gte",
            Lookup::Lt => "lt",
            Lookup::Lte => "lte",
            Lookup::StartsWith => "startswith",
            Lookup::IStartsWith => "istartswith",
            Lookup::EndsWith => "endswith",
            Lookup::IEndsWith => "iendswith",
            Lookup::IsNull => "isnull",
            Lookup::Range => "range",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Lookup> {
        Lookup::ALL.into_iter().find(|l| l.as_str() == suffix)
    }

    /// Lookups that match against the string form of the stored value.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Lookup::IExact
                | Lookup::Contains
                | Lookup::IContains
                | Lookup::StartsWith
                | Lookup::IStartsWith
                | Lookup::EndsWith
                | Lookup::IEndsWith
        )
    }

    pub fn is_case_insensitive(self) -> bool {
        matches!(
            self,
            Lookup::IExact | Lookup::IContains | Lookup::IStartsWith | Lookup::IEndsWith
        )
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_round_trips_for_every_lookup() {
        for lookup in Lookup::ALL {
            assert_eq!(Lookup::from_suffix(lookup.as_str()), Some(lookup));
        }
    }

    #[test]
    fn unknown_suffix_is_none() {
        assert_eq!(Lookup::from_suffix("name"), None);
        assert_eq!(Lookup::from_suffix("IN"), None);
        assert_eq!(Lookup::from_suffix(""), None);
    }

    #[test]
    fn serde_uses_suffix_spelling() {
        let json = serde_json::to_string(&Lookup::IStartsWith).unwrap();
        assert_eq!(json, "\"istartswith\"");
        let back: Lookup = serde_json::from_str("\"isnull\"").unwrap();
        assert_eq!(back, Lookup::IsNull);
    }
}
