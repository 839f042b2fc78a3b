use std::cmp::Ordering;

use bson::{Bson, DateTime};

use crate::error::DbError;
use crate::schema::FieldKind;

/// Coerce a query value to the type of the field it is compared against.
///
/// Strings from a query string are parsed; a value that cannot represent
/// the field type is an error. `null` passes through.
pub(crate) fn coerce(kind: &FieldKind, value: &Bson, field: &str) -> Result<Bson, DbError> {
    if matches!(value, Bson::Null) {
        return Ok(Bson::Null);
    }
    let invalid = || DbError::InvalidValue {
        field: field.to_string(),
        expected: kind.describe(),
        got: describe_value(value),
    };

    let coerced = match kind {
        FieldKind::String => text_form(value).map(Bson::String),
        FieldKind::Int => match value {
            Bson::Int32(n) => Some(Bson::Int64(i64::from(*n))),
            Bson::Int64(n) => Some(Bson::Int64(*n)),
            // 2^63 itself is out of range
            Bson::Double(f) if f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f) => {
                Some(Bson::Int64(*f as i64))
            }
            Bson::Boolean(b) => Some(Bson::Int64(i64::from(*b))),
            Bson::String(s) => s.trim().parse::<i64>().ok().map(Bson::Int64),
            _ => None,
        },
        FieldKind::Float => match value {
            Bson::Int32(n) => Some(Bson::Double(f64::from(*n))),
            Bson::Int64(n) => Some(Bson::Double(*n as f64)),
            Bson::Double(f) => Some(Bson::Double(*f)),
            Bson::Boolean(b) => Some(Bson::Double(if *b { 1.0 } else { 0.0 })),
            Bson::String(s) => s.trim().parse::<f64>().ok().map(Bson::Double),
            _ => None,
        },
        FieldKind::Bool => parse_bool(value).map(Bson::Boolean),
        FieldKind::DateTime => match value {
            Bson::DateTime(dt) => Some(Bson::DateTime(*dt)),
            // epoch seconds
            Bson::Int32(n) => Some(Bson::DateTime(DateTime::from_millis(i64::from(*n) * 1000))),
            Bson::Int64(n) => n.checked_mul(1000).map(|ms| Bson::DateTime(DateTime::from_millis(ms))),
            Bson::String(s) => parse_datetime(s.trim()).map(Bson::DateTime),
            _ => None,
        },
        FieldKind::Relation { .. } => None,
    };
    coerced.ok_or_else(invalid)
}

pub(crate) fn parse_bool(value: &Bson) -> Option<bool> {
    match value {
        Bson::Boolean(b) => Some(*b),
        Bson::Int32(1) | Bson::Int64(1) => Some(true),
        Bson::Int32(0) | Bson::Int64(0) => Some(false),
        Bson::String(s) => match s.as_str() {
            "true" | "True" | "t" | "1" => Some(true),
            "false" | "False" | "f" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// RFC 3339, or a bare `YYYY-MM-DD` taken as midnight UTC.
fn parse_datetime(s: &str) -> Option<DateTime> {
    DateTime::parse_rfc3339_str(s)
        .or_else(|_| DateTime::parse_rfc3339_str(format!("{s}T00:00:00Z")))
        .ok()
}

/// String form used by text lookups. `None` for null, documents and arrays.
pub(crate) fn text_form(value: &Bson) -> Option<String> {
    match value {
        Bson::String(s) => Some(s.clone()),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{f:.1}")),
        Bson::Double(f) => Some(f.to_string()),
        Bson::Boolean(true) => Some("True".to_string()),
        Bson::Boolean(false) => Some("False".to_string()),
        Bson::DateTime(dt) => dt.try_to_rfc3339_string().ok(),
        _ => None,
    }
}

/// Order two stored/coerced values. Numbers compare across int and float;
/// other types only compare with themselves.
pub(crate) fn compare(a: &Bson, b: &Bson) -> Option<Ordering> {
    match (a, b) {
        (Bson::String(x), Bson::String(y)) => Some(x.cmp(y)),
        (Bson::Boolean(x), Bson::Boolean(y)) => Some(x.cmp(y)),
        (Bson::DateTime(x), Bson::DateTime(y)) => {
            Some(x.timestamp_millis().cmp(&y.timestamp_millis()))
        }
        _ => match (as_f64(a), as_f64(b)) {
            (Some(x), Some(y)) => match (a, b) {
                (Bson::Double(_), _) | (_, Bson::Double(_)) => x.partial_cmp(&y),
                _ => Some(as_i64(a)?.cmp(&as_i64(b)?)),
            },
            _ => None,
        },
    }
}

fn as_f64(v: &Bson) -> Option<f64> {
    match v {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(f) => Some(*f),
        _ => None,
    }
}

fn as_i64(v: &Bson) -> Option<i64> {
    match v {
        Bson::Int32(n) => Some(i64::from(*n)),
        Bson::Int64(n) => Some(*n),
        _ => None,
    }
}

fn describe_value(value: &Bson) -> String {
    match value {
        Bson::String(s) => format!("'{s}'"),
        other => text_form(other).unwrap_or_else(|| format!("{:?}", other.element_type())),
    }
}
