use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use bson::Document;
use lbutils_db::CollectionConfig;
use serde::{Deserialize, Serialize};

/// A listing page: the collection schema plus the fields quick search
/// looks at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    pub collection: CollectionConfig,
    #[serde(default)]
    pub quick_search: QuickSearchFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickSearchFields {
    #[serde(default)]
    pub text_fields: Vec<String>,
    #[serde(default)]
    pub numeric_fields: Vec<String>,
}

impl ListingConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading listing config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing listing config {}", path.display()))
    }
}

/// Records are a JSON array of objects. Extended JSON such as
/// `{"$date": "..."}` is understood.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<Document>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading records {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing records {}", path.display()))
}

/// Split a `key=value` request parameter. The value may itself contain `=`.
pub fn parse_param(raw: &str) -> anyhow::Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("parameter '{raw}' is not key=value");
    };
    if key.is_empty() {
        bail!("parameter '{raw}' has an empty key");
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbutils_db::FieldKind;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_listing_config() {
        let file = write_temp(
            r#"{
                "collection": {
                    "name": "book",
                    "fields": [
                        {"name": "id", "type": "int"},
                        {"name": "name", "type": "string"},
                        {"name": "category", "type": "relation", "fields": [
                            {"name": "id", "type": "int"},
                            {"name": "name", "type": "string"}
                        ]}
                    ]
                },
                "quick_search": {"text_fields": ["name", "category__name"]}
            }"#,
        );
        let config = ListingConfig::load(file.path()).unwrap();
        assert_eq!(config.collection.name, "book");
        assert_eq!(config.collection.primary_key, "id");
        assert!(matches!(config.collection.fields[2].kind, FieldKind::Relation { .. }));
        assert_eq!(config.quick_search.text_fields, ["name", "category__name"]);
        assert!(config.quick_search.numeric_fields.is_empty());
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = ListingConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }

    #[test]
    fn loads_records_with_extended_json() {
        let file = write_temp(
            r#"[
                {"id": 1, "name": "book-01", "published": {"$date": "2020-01-01T00:00:00Z"}},
                {"id": 2, "name": "book-02", "published": null}
            ]"#,
        );
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].get_datetime("published").is_ok());
        assert_eq!(records[1].get_str("name").unwrap(), "book-02");
    }

    #[test]
    fn records_must_be_an_array() {
        let file = write_temp(r#"{"id": 1}"#);
        assert!(load_records(file.path()).is_err());
    }

    #[test]
    fn params() {
        assert_eq!(
            parse_param("q__name__in=a,b").unwrap(),
            ("q__name__in".to_string(), "a,b".to_string())
        );
        assert_eq!(parse_param("q__x=a=b").unwrap().1, "a=b");
        assert_eq!(parse_param("q__x=").unwrap().1, "");
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=v").is_err());
    }
}
