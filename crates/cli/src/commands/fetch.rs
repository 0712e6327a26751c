//! Collection fetch command.
//!
//! # Usage
//!
//! ```bash
//! shopify-collections fetch frontpage
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPIFY_URL` - Shopify GraphQL endpoint
//! - `SHOPIFY_ADMIN_TOKEN` - Admin API access token
//! - `SHOPIFY_TIMEOUT_SECS` - Per-call upstream timeout (optional)

use std::io::Write;
use std::num::NonZeroUsize;

use shopify_collections_api::config::{ConfigError, ShopifyConfig};
use shopify_collections_api::services::{CollectionError, collection_products_json};
use shopify_collections_api::shopify::{CatalogSource, ShopifyClient, ShopifyError};
use shopify_collections_core::{CollectionHandle, HandleError};
use thiserror::Error;

/// Errors from the fetch command.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid handle: {0}")]
    Handle(#[from] HandleError),
    #[error("client error: {0}")]
    Client(#[from] ShopifyError),
    #[error("error fetching collection products: {0}")]
    Collection(#[from] CollectionError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Aggregate a collection and write the JSON document to stdout.
///
/// # Errors
///
/// Returns an error if configuration is missing, the collection cannot be
/// fetched, or stdout is closed.
pub async fn collection(handle: &str, concurrency: NonZeroUsize) -> Result<(), FetchError> {
    let handle = CollectionHandle::parse(handle)?;
    let config = ShopifyConfig::from_env()?;
    let client = ShopifyClient::new(&config)?;

    write_collection(&client, &handle, concurrency, &mut std::io::stdout()).await
}

/// Aggregate a collection from `source` and write the JSON document to `out`.
///
/// Nothing is written unless the whole document was built.
///
/// # Errors
///
/// Returns an error if the collection cannot be fetched or `out` fails.
pub async fn write_collection<S, W>(
    source: &S,
    handle: &CollectionHandle,
    concurrency: NonZeroUsize,
    out: &mut W,
) -> Result<(), FetchError>
where
    S: CatalogSource,
    W: Write,
{
    tracing::info!(collection = %handle, "Fetching collection products...");
    let json = collection_products_json(source, handle, concurrency).await?;

    writeln!(out, "{json}")?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;
    use serde_json::{Value, json};
    use url::Url;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(upstream: &MockServer) -> ShopifyClient {
        let config = ShopifyConfig {
            url: Url::parse(&format!("{}/graphql.json", upstream.uri())).unwrap(),
            admin_token: SecretString::from("shpat_cli_7Tk2Pq9Xm4Rv1Zc8"),
            timeout: Duration::from_secs(5),
        };
        ShopifyClient::new(&config).unwrap()
    }

    async fn mock(upstream: &MockServer, operation: &str, data: Value) {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"operationName": operation})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": data})))
            .mount(upstream)
            .await;
    }

    #[tokio::test]
    async fn test_write_collection_prints_document() {
        let upstream = MockServer::start().await;
        mock(
            &upstream,
            "getCollection",
            json!({"collectionByHandle": {
                "id": "gid://1",
                "title": "Front Page",
                "products": {"edges": [{"node": {"handle": "mug"}}]}
            }}),
        )
        .await;
        mock(
            &upstream,
            "getProductByHandle",
            json!({"productByHandle": {
                "id": "gid://p1",
                "title": "Mug",
                "description": "A mug\n",
                "images": {"edges": []},
                "variants": {"edges": [{"node": {"id": "v1", "title": "Default", "price": "9.99"}}]}
            }}),
        )
        .await;

        let client = client_for(&upstream);
        let handle = CollectionHandle::parse("frontpage").unwrap();
        let mut out = Vec::new();

        write_collection(&client, &handle, NonZeroUsize::MIN, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("{\n  \"id\": \"gid://1\""), "got: {text}");
        assert!(text.ends_with("}\n"));

        let document: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(document["products"][0]["handle"], "mug");
        assert_eq!(document["products"][0]["description"], "A mug");
        assert_eq!(document["products"][0]["variants"][0]["handle"], "mug");
    }

    #[tokio::test]
    async fn test_write_collection_unknown_collection_fails_without_output() {
        let upstream = MockServer::start().await;
        mock(&upstream, "getCollection", json!({"collectionByHandle": null})).await;

        let client = client_for(&upstream);
        let handle = CollectionHandle::parse("missing").unwrap();
        let mut out = Vec::new();

        let result = write_collection(&client, &handle, NonZeroUsize::MIN, &mut out).await;

        assert!(matches!(
            result,
            Err(FetchError::Collection(CollectionError::NotFound(_)))
        ));
        assert!(out.is_empty());
    }
}
