use std::fmt;

use bson::Bson;
use lbutils_query::Lookup;

use crate::collection::Collection;
use crate::error::DbError;
use crate::expression::get_path;
use crate::resolve::target;
use crate::schema::FieldKind;

/// Result of a numeric aggregate. Integer fields aggregate to `Int`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    fn is_zero(self) -> bool {
        self.as_f64() == 0.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

impl Collection {
    /// Sum of `field` over all records, `0` when there is nothing to add.
    pub fn sum(&self, field: &str) -> Result<Number, DbError> {
        let values = self.numeric_values(field)?;
        let total = values.into_iter().reduce(|acc, n| match (acc, n) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a.saturating_add(b)),
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        });
        Ok(or_zero(total))
    }

    /// Largest value of `field`, `0` when the collection has none.
    pub fn max(&self, field: &str) -> Result<Number, DbError> {
        let values = self.numeric_values(field)?;
        let largest = values.into_iter().reduce(|acc, n| match (acc, n) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a.max(b)),
            (a, b) => {
                if b.as_f64() > a.as_f64() {
                    b
                } else {
                    a
                }
            }
        });
        Ok(or_zero(largest))
    }

    fn numeric_values(&self, field: &str) -> Result<Vec<Number>, DbError> {
        let target = target(self.config(), field, Lookup::Exact)?;
        if !target.kind.is_numeric() {
            return Err(DbError::InvalidQuery(format!(
                "cannot aggregate non-numeric field '{}'",
                target.label()
            )));
        }
        let as_float = matches!(target.kind, FieldKind::Float);
        Ok(self
            .iter()
            .filter_map(|doc| match get_path(doc, &target.path)? {
                Bson::Int32(n) if !as_float => Some(Number::Int(i64::from(*n))),
                Bson::Int64(n) if !as_float => Some(Number::Int(*n)),
                Bson::Int32(n) => Some(Number::Float(f64::from(*n))),
                Bson::Int64(n) => Some(Number::Float(*n as f64)),
                Bson::Double(f) => Some(Number::Float(*f)),
                _ => None,
            })
            .collect())
    }
}

fn or_zero(value: Option<Number>) -> Number {
    match value {
        Some(n) if !n.is_zero() => n,
        _ => Number::Int(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CollectionConfig, FieldConfig};
    use bson::doc;

    fn items() -> Collection {
        Collection::new(
            CollectionConfig::new(
                "item",
                vec![
                    FieldConfig::new("qty", FieldKind::Int),
                    FieldConfig::new("price", FieldKind::Float),
                    FieldConfig::new("name", FieldKind::String),
                ],
            ),
            vec![
                doc! { "qty": 2_i32, "price": 1.5, "name": "a" },
                doc! { "qty": 5_i64, "price": Bson::Null, "name": "b" },
                doc! { "name": "c" },
            ],
        )
    }

    #[test]
    fn int_sum_stays_int() {
        assert_eq!(items().sum("qty").unwrap(), Number::Int(7));
        assert_eq!(items().max("qty").unwrap(), Number::Int(5));
    }

    #[test]
    fn float_sum_skips_nulls() {
        assert_eq!(items().sum("price").unwrap(), Number::Float(1.5));
    }

    #[test]
    fn empty_is_zero() {
        let empty = Collection::new(items().config().clone(), vec![]);
        assert_eq!(empty.sum("price").unwrap(), Number::Int(0));
        assert_eq!(empty.max("qty").unwrap(), Number::Int(0));
    }

    #[test]
    fn non_numeric_field_errors() {
        assert!(matches!(items().sum("name"), Err(DbError::InvalidQuery(_))));
        assert!(matches!(items().max("nope"), Err(DbError::UnknownField { .. })));
    }
}
