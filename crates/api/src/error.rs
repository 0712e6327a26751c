//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Every failure becomes a
//! `500` with a plain-text message; the access token never appears in it
//! because no error variant carries request headers.

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shopify_collections_core::HandleError;
use thiserror::Error;

use crate::services::CollectionError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Aggregating the collection failed.
    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// The path did not contain a usable handle.
    #[error("invalid collection handle: {0}")]
    InvalidHandle(#[from] HandleError),

    /// The path segment could not be extracted (e.g. not UTF-8 once decoded).
    #[error("invalid collection path: {0}")]
    InvalidPath(#[from] PathRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Unknown collections and unusable paths are caller mistakes, not incidents
        if matches!(
            self,
            Self::Collection(CollectionError::NotFound(_)) | Self::InvalidPath(_)
        ) {
            tracing::warn!(error = %self, "Request error");
        } else {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let message = format!("error fetching collection products: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
