//! Shopify GraphQL client for the collection and product queries.
//!
//! # Architecture
//!
//! - Two fixed query documents (collection by handle, product by handle),
//!   each with a single `$handle` variable
//! - Request/response envelopes from `graphql_client`, decoded into the typed
//!   records in [`types`] instead of generic JSON maps
//! - Shopify is the source of truth: no caching, every call goes upstream
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_collections_api::shopify::{CatalogSource, ShopifyClient};
//!
//! let client = ShopifyClient::new(&config.shopify)?;
//! let collection = client.collection_by_handle(&handle).await?;
//! ```

mod client;
pub mod conversions;
pub mod queries;
pub mod types;

use std::future::Future;

use shopify_collections_core::{CollectionHandle, ProductHandle};
use thiserror::Error;

pub use client::ShopifyClient;
pub use types::{RawCollection, RawProduct};

/// Errors that can occur when talking to the Shopify API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// Response did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

/// Source of collection and product data.
///
/// [`ShopifyClient`] is the production implementation; the aggregator only
/// depends on this trait so it can run against in-memory catalogs.
pub trait CatalogSource: Send + Sync {
    /// Fetch a collection and its product handles.
    ///
    /// Resolves to `Ok(None)` when the upstream has no collection with this handle.
    fn collection_by_handle(
        &self,
        handle: &CollectionHandle,
    ) -> impl Future<Output = Result<Option<RawCollection>, ShopifyError>> + Send;

    /// Fetch full product detail, with the description already sanitized.
    ///
    /// Resolves to `Ok(None)` when the upstream has no product with this handle.
    fn product_by_handle(
        &self,
        handle: &ProductHandle,
    ) -> impl Future<Output = Result<Option<RawProduct>, ShopifyError>> + Send;
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
