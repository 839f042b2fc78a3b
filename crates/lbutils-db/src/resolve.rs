use lbutils_query::Lookup;
use lbutils_query::key::LOOKUP_SEPARATOR;

use crate::error::DbError;
use crate::schema::{CollectionConfig, FieldConfig, FieldKind};

/// Field a condition reads, as a path of document keys.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Target<'s> {
    pub path: Vec<String>,
    pub kind: &'s FieldKind,
}

impl Target<'_> {
    pub fn label(&self) -> String {
        self.path.join(LOOKUP_SEPARATOR)
    }
}

struct Resolved<'s> {
    path: Vec<String>,
    field: &'s FieldConfig,
    /// Segments left over after a scalar field.
    rest: Option<String>,
}

/// Walk `field_path` (`category__name`, `pk`) through the schema.
fn resolve<'s>(config: &'s CollectionConfig, field_path: &str) -> Result<Resolved<'s>, DbError> {
    let segments: Vec<&str> = field_path.split(LOOKUP_SEPARATOR).collect();
    let mut model = config.name.as_str();
    let mut fields = config.fields.as_slice();
    let mut primary_key = config.primary_key.as_str();
    let mut path = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        let name = if *segment == "pk" { primary_key } else { *segment };
        let field = fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| DbError::UnknownField {
                field: segment.to_string(),
                model: model.to_string(),
            })?;
        path.push(field.name.clone());

        let remaining = &segments[i + 1..];
        if remaining.is_empty() {
            return Ok(Resolved {
                path,
                field,
                rest: None,
            });
        }
        match &field.kind {
            FieldKind::Relation {
                primary_key: pk,
                fields: sub,
            } => {
                model = field.name.as_str();
                fields = sub.as_slice();
                primary_key = pk.as_str();
            }
            _ => {
                return Ok(Resolved {
                    path,
                    field,
                    rest: Some(remaining.join(LOOKUP_SEPARATOR)),
                });
            }
        }
    }

    // split() always yields at least one segment
    Err(DbError::InvalidQuery(format!("empty field path '{field_path}'")))
}

/// Resolve the field a `field_path` + `lookup` condition reads.
///
/// A path ending on a relation reads the related primary key, except for
/// `isnull` which tests the related record itself.
pub(crate) fn target<'s>(
    config: &'s CollectionConfig,
    field_path: &str,
    lookup: Lookup,
) -> Result<Target<'s>, DbError> {
    let Resolved {
        mut path,
        field,
        rest,
    } = resolve(config, field_path)?;

    if let Some(rest) = rest {
        return Err(DbError::UnsupportedLookup {
            lookup: rest,
            field: path.join(LOOKUP_SEPARATOR),
        });
    }

    match &field.kind {
        FieldKind::Relation { .. } if lookup == Lookup::IsNull => Ok(Target {
            path,
            kind: &field.kind,
        }),
        FieldKind::Relation { .. } if lookup.is_text() => Err(DbError::UnsupportedLookup {
            lookup: lookup.to_string(),
            field: path.join(LOOKUP_SEPARATOR),
        }),
        FieldKind::Relation {
            primary_key,
            fields,
        } => {
            let pk = fields
                .iter()
                .find(|f| f.name == *primary_key)
                .ok_or_else(|| DbError::UnknownField {
                    field: primary_key.clone(),
                    model: field.name.clone(),
                })?;
            path.push(pk.name.clone());
            Ok(Target {
                path,
                kind: &pk.kind,
            })
        }
        kind => Ok(Target { path, kind }),
    }
}
