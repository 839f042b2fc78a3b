#![allow(dead_code)]

use bson::{Bson, doc};
use lbutils_db::{Collection, CollectionConfig, FieldConfig, FieldKind};

pub const NO_FIELDS: &[&str] = &[];
pub const QUICK_FIELDS: &[&str] = &["name", "category__name"];

pub fn book_config() -> CollectionConfig {
    CollectionConfig::new(
        "book",
        vec![
            FieldConfig::new("id", FieldKind::Int),
            FieldConfig::new("name", FieldKind::String),
            FieldConfig::new("descn", FieldKind::String),
            FieldConfig::new("price", FieldKind::Float),
            FieldConfig::new("is_active", FieldKind::Bool),
            FieldConfig::new("published", FieldKind::DateTime),
            FieldConfig::new(
                "category",
                FieldKind::relation(vec![
                    FieldConfig::new("id", FieldKind::Int),
                    FieldConfig::new("name", FieldKind::String),
                ]),
            ),
        ],
    )
}

/// book-01 and book-02 belong to "category"; book-03 has no category,
/// no price and is inactive.
pub fn seed_books() -> Collection {
    let category = doc! { "id": 1_i64, "name": "category" };
    Collection::new(
        book_config(),
        vec![
            doc! {
                "id": 1_i64, "name": "book-01", "descn": "descn", "price": 100.0,
                "is_active": true, "published": bson::DateTime::from_millis(1_577_836_800_000),
                "category": category.clone(),
            },
            doc! {
                "id": 2_i64, "name": "book-02", "descn": "descn", "price": 200.0,
                "is_active": true, "published": bson::DateTime::from_millis(1_609_459_200_000),
                "category": category,
            },
            doc! {
                "id": 3_i64, "name": "book-03", "descn": "descn", "price": Bson::Null,
                "is_active": false, "published": Bson::Null,
                "category": Bson::Null,
            },
        ],
    )
}

pub fn names(collection: &Collection) -> Vec<String> {
    collection
        .iter()
        .map(|d| d.get_str("name").unwrap().to_string())
        .collect()
}
