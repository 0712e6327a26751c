//! Collection aggregation: one collection query, then one product query per
//! product handle, reshaped into a [`CollectionProducts`] document.
//!
//! Product fetches run with bounded concurrency but results are consumed in
//! collection order, so the output order never depends on completion order.
//! A product that fails to fetch (transport error, shape error, or `null`
//! upstream) is logged and left out; the document as a whole still succeeds.

use std::num::NonZeroUsize;

use futures::stream::{self, StreamExt};
use shopify_collections_core::{CollectionHandle, CollectionProducts, ProductHandle};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::shopify::conversions::simplify_product;
use crate::shopify::{CatalogSource, ShopifyError};

/// Errors that fail a whole collection request.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The collection query itself failed.
    #[error("error fetching collection: {0}")]
    Fetch(#[source] ShopifyError),

    /// The upstream has no collection with this handle.
    #[error("collection not found: {0}")]
    NotFound(CollectionHandle),

    /// The finished document could not be rendered.
    #[error("error marshalling to JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Build the simplified document for a collection.
///
/// # Errors
///
/// Returns [`CollectionError::Fetch`] if the collection query fails and
/// [`CollectionError::NotFound`] if the upstream returns no collection.
/// Per-product failures are never returned.
#[instrument(skip(source, handle), fields(collection = %handle))]
pub async fn collection_products<S: CatalogSource>(
    source: &S,
    handle: &CollectionHandle,
    concurrency: NonZeroUsize,
) -> Result<CollectionProducts, CollectionError> {
    let collection = source
        .collection_by_handle(handle)
        .await
        .map_err(CollectionError::Fetch)?
        .ok_or_else(|| CollectionError::NotFound(handle.clone()))?;

    let product_handles: Vec<ProductHandle> = collection
        .products
        .into_nodes()
        .filter_map(|node| match ProductHandle::parse(node.handle.unwrap_or_default()) {
            Ok(product_handle) => Some(product_handle),
            Err(_) => {
                warn!(
                    product_id = ?node.id,
                    product_title = ?node.title,
                    "Collection product has no handle, skipping"
                );
                None
            }
        })
        .collect();

    let requested = product_handles.len();
    let mut document = CollectionProducts::new(collection.id, collection.title);

    // `buffered` yields in input order regardless of which fetch finishes first
    let fetched: Vec<_> = stream::iter(product_handles)
        .map(|product_handle| async move {
            let result = source.product_by_handle(&product_handle).await;
            (product_handle, result)
        })
        .buffered(concurrency.get())
        .collect()
        .await;

    for (product_handle, result) in fetched {
        match result {
            Ok(Some(product)) => document
                .products
                .push(simplify_product(&product_handle, product)),
            Ok(None) => {
                warn!(product = %product_handle, "Product not found upstream, skipping");
            }
            Err(e) => {
                warn!(product = %product_handle, error = %e, "Error fetching product details, skipping");
            }
        }
    }

    info!(
        requested,
        returned = document.products.len(),
        "Collection products aggregated"
    );

    Ok(document)
}

/// Build the document and render it as 2-space indented JSON.
///
/// # Errors
///
/// Same as [`collection_products`], plus [`CollectionError::Serialize`].
pub async fn collection_products_json<S: CatalogSource>(
    source: &S,
    handle: &CollectionHandle,
    concurrency: NonZeroUsize,
) -> Result<String, CollectionError> {
    let document = collection_products(source, handle, concurrency).await?;
    Ok(document.to_pretty_json()?)
}
