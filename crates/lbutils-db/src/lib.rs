mod aggregate;
mod collection;
mod convert;
mod error;
mod expression;
mod resolve;
mod schema;

pub use aggregate::Number;
pub use bson::{Bson, Document};
pub use collection::Collection;
pub use error::DbError;
pub use schema::{CollectionConfig, FieldConfig, FieldKind};
