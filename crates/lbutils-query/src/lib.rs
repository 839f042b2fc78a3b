mod apply;
mod build;
mod filter;
pub mod key;
mod keywords;
mod lookup;
mod request;
mod value;

pub use apply::{Filterable, apply, try_apply};
pub use build::{build_quick_predicate, build_structured_filter};
pub use filter::{Condition, LogicalOp, Predicate, PredicateNode};
pub use key::{FilterKey, KeyMarker, parse_key, split_lookup};
pub use keywords::KeywordConstraints;
pub use lookup::Lookup;
pub use request::FilterRequest;
pub use value::{ClassifiedValue, ConstraintValue, classify_value};
