//! Collection route handlers.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use shopify_collections_core::CollectionHandle;
use tracing::instrument;

use crate::error::Result;
use crate::services::collection_products_json;
use crate::state::AppState;

/// Serve the simplified document for a collection.
///
/// `handle` arrives percent-decoded and is passed upstream verbatim. A
/// segment that does not decode to UTF-8 fails like any other request.
#[instrument(skip(state, path))]
pub async fn show(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Response> {
    let Path(handle) = path?;
    let handle = CollectionHandle::parse(handle)?;

    let json = collection_products_json(
        state.shopify(),
        &handle,
        state.config().product_fetch_concurrency,
    )
    .await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json,
    )
        .into_response())
}
