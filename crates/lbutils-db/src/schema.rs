use serde::{Deserialize, Serialize};

fn default_primary_key() -> String {
    "id".to_string()
}

/// Shape of the records held by a [`Collection`](crate::Collection).
///
/// Field paths in filters are resolved against this schema; a path naming
/// an undeclared field is an error rather than a silent non-match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub name: String,
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            primary_key: default_primary_key(),
            fields: Vec::new(),
        }
    }
}

impl CollectionConfig {
    pub fn new(name: impl Into<String>, fields: Vec<FieldConfig>) -> Self {
        Self {
            name: name.into(),
            fields,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldConfig {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Int,
    Float,
    Bool,
    #[serde(rename = "datetime")]
    DateTime,
    /// An embedded related record, `null` when absent.
    Relation {
        #[serde(default = "default_primary_key")]
        primary_key: String,
        #[serde(default)]
        fields: Vec<FieldConfig>,
    },
}

impl FieldKind {
    pub fn relation(fields: Vec<FieldConfig>) -> Self {
        FieldKind::Relation {
            primary_key: default_primary_key(),
            fields,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Int | FieldKind::Float)
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Int => "an integer",
            FieldKind::Float => "a number",
            FieldKind::Bool => "a boolean",
            FieldKind::DateTime => "a datetime",
            FieldKind::Relation { .. } => "a related record",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_nested_relation() {
        let json = r#"{
            "name": "book",
            "fields": [
                { "name": "id", "type": "int" },
                { "name": "name", "type": "string" },
                { "name": "category", "type": "relation",
                  "fields": [{ "name": "id", "type": "int" }, { "name": "name", "type": "string" }] }
            ]
        }"#;
        let config: CollectionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.primary_key, "id");
        assert_eq!(config.fields.len(), 3);
        match &config.fields[2].kind {
            FieldKind::Relation {
                primary_key,
                fields,
            } => {
                assert_eq!(primary_key, "id");
                assert_eq!(fields[1].kind, FieldKind::String);
            }
            other => panic!("expected relation, got {other:?}"),
        }
    }

    #[test]
    fn kind_tags_are_snake_case() {
        let field = FieldConfig::new("created", FieldKind::DateTime);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "datetime");
        assert_eq!(json["name"], "created");
    }
}
