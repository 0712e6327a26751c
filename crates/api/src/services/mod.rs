//! Business logic services.
//!
//! - [`collection_products`] - Aggregates a collection and its products into
//!   the simplified document served by the API

pub mod collection_products;

pub use collection_products::{CollectionError, collection_products, collection_products_json};
