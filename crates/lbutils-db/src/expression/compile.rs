use bson::Bson;
use lbutils_query::{Condition, ConstraintValue, LogicalOp, Lookup, Predicate, PredicateNode};

use super::{CompareOp, Expression, Operand, TextOp};
use crate::convert::{coerce, parse_bool, text_form};
use crate::error::DbError;
use crate::resolve::target;
use crate::schema::CollectionConfig;

/// Resolve every condition of `predicate` against the schema.
///
/// This is where bad field paths, unsupported lookups and values of the
/// wrong type are reported.
pub(crate) fn compile(
    config: &CollectionConfig,
    predicate: &Predicate,
) -> Result<Expression, DbError> {
    let children = predicate
        .children
        .iter()
        .map(|node| match node {
            PredicateNode::Condition(c) => compile_condition(config, c),
            PredicateNode::Group(g) => compile(config, g),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if children.is_empty() {
        return Ok(Expression::And(children));
    }
    Ok(match predicate.logical {
        LogicalOp::And => Expression::And(children),
        LogicalOp::Or => Expression::Or(children),
    })
}

fn compile_condition(
    config: &CollectionConfig,
    condition: &Condition,
) -> Result<Expression, DbError> {
    let lookup = condition.lookup;
    let target = target(config, &condition.field, lookup)?;
    let label = target.label();
    let invalid = |expected: &'static str| DbError::InvalidValue {
        field: label.clone(),
        expected,
        got: describe(&condition.value),
    };

    if let Some(op) = text_op(lookup) {
        let operand = match &condition.value {
            ConstraintValue::Literal(v) => {
                Operand::Value(Bson::String(text_form(v).ok_or_else(|| invalid("text"))?))
            }
            ConstraintValue::FieldReference(f) => Operand::Field(reference(config, f)?),
            ConstraintValue::MembershipList(_) => return Err(invalid("text")),
        };
        return Ok(Expression::Text {
            path: target.path,
            op,
            operand,
            case_insensitive: lookup.is_case_insensitive(),
        });
    }

    match lookup {
        Lookup::IsNull => {
            let expected = match &condition.value {
                ConstraintValue::Literal(v) => parse_bool(v),
                _ => None,
            }
            .ok_or_else(|| invalid("a boolean"))?;
            Ok(Expression::IsNull {
                path: target.path,
                expected,
            })
        }
        Lookup::In => {
            let items = list_items(&condition.value).ok_or_else(|| invalid("a list"))?;
            let values = items
                .iter()
                .filter(|v| !matches!(v, Bson::Null))
                .map(|v| coerce(target.kind, v, &label))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expression::In {
                path: target.path,
                values,
            })
        }
        Lookup::Range => {
            let items = list_items(&condition.value).ok_or_else(|| invalid("a list"))?;
            let [low, high] = items else {
                return Err(invalid("a pair of bounds"));
            };
            Ok(Expression::Range {
                low: coerce(target.kind, low, &label)?,
                high: coerce(target.kind, high, &label)?,
                path: target.path,
            })
        }
        _ => {
            let op = compare_op(lookup);
            let operand = match &condition.value {
                ConstraintValue::Literal(Bson::Null) if op == CompareOp::Eq => {
                    return Ok(Expression::IsNull {
                        path: target.path,
                        expected: true,
                    });
                }
                ConstraintValue::Literal(Bson::Null) => return Err(invalid("a non-null value")),
                ConstraintValue::Literal(v) => Operand::Value(coerce(target.kind, v, &label)?),
                ConstraintValue::FieldReference(f) => Operand::Field(reference(config, f)?),
                ConstraintValue::MembershipList(_) => return Err(invalid(target.kind.describe())),
            };
            Ok(Expression::Compare {
                path: target.path,
                op,
                operand,
            })
        }
    }
}

fn text_op(lookup: Lookup) -> Option<TextOp> {
    match lookup {
        Lookup::IExact => Some(TextOp::Exact),
        Lookup::Contains | Lookup::IContains => Some(TextOp::Contains),
        Lookup::StartsWith | Lookup::IStartsWith => Some(TextOp::StartsWith),
        Lookup::EndsWith | Lookup::IEndsWith => Some(TextOp::EndsWith),
        _ => None,
    }
}

fn compare_op(lookup: Lookup) -> CompareOp {
    match lookup {
        Lookup::Gt => CompareOp::Gt,
        Lookup::Gte => CompareOp::Gte,
        Lookup::Lt => CompareOp::Lt,
        Lookup::Lte => CompareOp::Lte,
        _ => CompareOp::Eq,
    }
}

/// Path of a field named by an `F__` reference.
fn reference(config: &CollectionConfig, field: &str) -> Result<Vec<String>, DbError> {
    Ok(target(config, field, Lookup::Exact)?.path)
}

fn list_items(value: &ConstraintValue) -> Option<&[Bson]> {
    match value {
        ConstraintValue::MembershipList(items) => Some(items),
        ConstraintValue::Literal(Bson::Array(items)) => Some(items),
        _ => None,
    }
}

fn describe(value: &ConstraintValue) -> String {
    match value {
        ConstraintValue::Literal(v) => text_form(v).unwrap_or_else(|| format!("{v}")),
        ConstraintValue::FieldReference(f) => format!("F({f})"),
        ConstraintValue::MembershipList(items) => format!("a list of {}", items.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldConfig, FieldKind};

    fn config() -> CollectionConfig {
        CollectionConfig::new(
            "book",
            vec![
                FieldConfig::new("id", FieldKind::Int),
                FieldConfig::new("name", FieldKind::String),
                FieldConfig::new("price", FieldKind::Float),
                FieldConfig::new("is_active", FieldKind::Bool),
            ],
        )
    }

    fn one(field: &str, lookup: Lookup, value: ConstraintValue) -> Result<Expression, DbError> {
        compile(&config(), &Predicate::condition(Condition::new(field, lookup, value)))
    }

    #[test]
    fn identity_compiles_to_empty_and() {
        assert_eq!(compile(&config(), &Predicate::all()).unwrap(), Expression::And(vec![]));
    }

    #[test]
    fn exact_coerces_to_field_type() {
        let expr = one("price", Lookup::Exact, ConstraintValue::string("100")).unwrap();
        assert_eq!(
            expr,
            Expression::And(vec![Expression::Compare {
                path: vec!["price".into()],
                op: CompareOp::Eq,
                operand: Operand::Value(Bson::Double(100.0)),
            }])
        );
    }

    #[test]
    fn exact_null_is_isnull() {
        let expr = one("name", Lookup::Exact, ConstraintValue::Literal(Bson::Null)).unwrap();
        assert_eq!(
            expr,
            Expression::And(vec![Expression::IsNull {
                path: vec!["name".into()],
                expected: true
            }])
        );
        assert!(one("name", Lookup::Gt, ConstraintValue::Literal(Bson::Null)).is_err());
    }

    #[test]
    fn in_requires_a_list() {
        assert!(one("name", Lookup::In, ConstraintValue::string("a")).is_err());
        let expr = one(
            "id",
            Lookup::In,
            ConstraintValue::Literal(Bson::Array(vec![Bson::Int32(1), Bson::Null])),
        )
        .unwrap();
        assert_eq!(
            expr,
            Expression::And(vec![Expression::In {
                path: vec!["id".into()],
                values: vec![Bson::Int64(1)],
            }])
        );
    }

    #[test]
    fn range_requires_two_bounds() {
        let three = ConstraintValue::MembershipList(vec![Bson::Int32(1), Bson::Int32(2), Bson::Int32(3)]);
        assert!(matches!(
            one("price", Lookup::Range, three),
            Err(DbError::InvalidValue { expected: "a pair of bounds", .. })
        ));
    }

    #[test]
    fn bad_reference_is_unknown_field() {
        let err = one("name", Lookup::Gt, ConstraintValue::FieldReference("nope".into())).unwrap_err();
        assert!(matches!(err, DbError::UnknownField { ref field, .. } if field == "nope"));
    }

    #[test]
    fn isnull_needs_a_boolean() {
        assert!(one("name", Lookup::IsNull, ConstraintValue::Literal(Bson::Boolean(true))).is_ok());
        assert!(one("name", Lookup::IsNull, ConstraintValue::string("maybe")).is_err());
    }

    #[test]
    fn text_lookup_never_coerces() {
        let expr = one("price", Lookup::IContains, ConstraintValue::string("abc")).unwrap();
        assert!(matches!(
            expr,
            Expression::And(ref c) if matches!(&c[0], Expression::Text { case_insensitive: true, op: TextOp::Contains, .. })
        ));
    }
}
