#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DbError {
    #[error("cannot resolve keyword '{field}' into field of '{model}'")]
    UnknownField { field: String, model: String },

    #[error("unsupported lookup '{lookup}' for field '{field}'")]
    UnsupportedLookup { lookup: String, field: String },

    #[error("field '{field}' expected {expected} but got {got}")]
    InvalidValue {
        field: String,
        expected: &'static str,
        got: String,
    },

    #[error("{model} matching query does not exist")]
    NotFound { model: String },

    #[error("get() returned {count} {model} records, expected one")]
    MultipleObjectsReturned { model: String, count: usize },

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
