//! Shopify GraphQL client implementation.
//!
//! Uses `graphql_client` envelopes with `reqwest` for HTTP. Every failure is
//! returned as a [`ShopifyError`]; nothing here terminates the process.

use std::sync::Arc;

use graphql_client::{PathFragment, QueryBody, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shopify_collections_core::{CollectionHandle, ProductHandle, sanitize_description};
use tracing::{debug, instrument};
use url::Url;

use super::queries::{
    COLLECTION_BY_HANDLE, COLLECTION_BY_HANDLE_OPERATION, HandleVariables, PRODUCT_BY_HANDLE,
    PRODUCT_BY_HANDLE_OPERATION,
};
use super::types::{CollectionByHandleData, ProductByHandleData, RawCollection, RawProduct};
use super::{CatalogSource, GraphQLError, GraphQLErrorLocation, ShopifyError};
use crate::config::ShopifyConfig;

/// Header carrying the static access token on every upstream call.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for the Shopify GraphQL API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ShopifyClient {
    inner: Arc<ShopifyClientInner>,
}

struct ShopifyClientInner {
    client: reqwest::Client,
    endpoint: Url,
    access_token: SecretString,
}

impl ShopifyClient {
    /// Create a new client with the configured per-call timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ShopifyConfig) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(ShopifyClientInner {
                client,
                endpoint: config.url.clone(),
                access_token: config.admin_token.clone(),
            }),
        })
    }

    /// Execute a GraphQL query and decode its `data`.
    async fn execute<V, T>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        variables: V,
    ) -> Result<T, ShopifyError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let request_body = QueryBody {
            variables,
            query,
            operation_name,
        };

        let response = self
            .inner
            .client
            .post(self.inner.endpoint.as_str())
            .header(ACCESS_TOKEN_HEADER, self.inner.access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::Status(status.as_u16()));
        }

        let response: Response<T> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(convert_graphql_error).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })
    }
}

impl CatalogSource for ShopifyClient {
    #[instrument(skip(self), fields(handle = %handle))]
    async fn collection_by_handle(
        &self,
        handle: &CollectionHandle,
    ) -> Result<Option<RawCollection>, ShopifyError> {
        let data: CollectionByHandleData = self
            .execute(
                COLLECTION_BY_HANDLE_OPERATION,
                COLLECTION_BY_HANDLE,
                HandleVariables {
                    handle: handle.as_str(),
                },
            )
            .await?;

        Ok(data.collection_by_handle)
    }

    #[instrument(skip(self), fields(handle = %handle))]
    async fn product_by_handle(
        &self,
        handle: &ProductHandle,
    ) -> Result<Option<RawProduct>, ShopifyError> {
        let data: ProductByHandleData = self
            .execute(
                PRODUCT_BY_HANDLE_OPERATION,
                PRODUCT_BY_HANDLE,
                HandleVariables {
                    handle: handle.as_str(),
                },
            )
            .await?;

        Ok(data.product_by_handle.map(|mut product| {
            product.description = product.description.as_deref().map(sanitize_description);
            product
        }))
    }
}

fn convert_graphql_error(e: graphql_client::Error) -> GraphQLError {
    GraphQLError {
        message: e.message,
        locations: e.locations.map_or_else(Vec::new, |locs| {
            locs.into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: i64::from(l.line),
                    column: i64::from(l.column),
                })
                .collect()
        }),
        path: e.path.map_or_else(Vec::new, |p| {
            p.into_iter()
                .map(|fragment| match fragment {
                    PathFragment::Key(s) => serde_json::Value::String(s),
                    PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                })
                .collect()
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const TOKEN: &str = "shpat_test_9f3Kq2LmX7vB1nR8";

    fn test_client(server: &MockServer) -> ShopifyClient {
        let config = ShopifyConfig {
            url: Url::parse(&format!("{}/graphql.json", server.uri())).unwrap(),
            admin_token: SecretString::from(TOKEN),
            timeout: Duration::from_secs(5),
        };
        ShopifyClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_collection_request_carries_token_and_handle() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/graphql.json"))
            .and(header(ACCESS_TOKEN_HEADER, TOKEN))
            .and(body_partial_json(json!({
                "operationName": "getCollection",
                "variables": {"handle": "frontpage"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"collectionByHandle": {
                    "id": "gid://1",
                    "title": "Front Page",
                    "products": {"edges": [{"node": {"id": "gid://p1", "title": "Mug", "handle": "mug"}}]}
                }}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let handle = CollectionHandle::parse("frontpage").unwrap();
        let collection = client.collection_by_handle(&handle).await.unwrap().unwrap();

        assert_eq!(collection.id, "gid://1");
        assert_eq!(collection.title, "Front Page");
    }

    #[tokio::test]
    async fn test_unknown_collection_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"collectionByHandle": null}})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let handle = CollectionHandle::parse("missing").unwrap();

        assert!(client.collection_by_handle(&handle).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_product_description_is_sanitized() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"operationName": "getProductByHandle"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"productByHandle": {
                    "id": "gid://p1",
                    "title": "Mug",
                    "description": "  A \\\"big\\\"\nmug\n",
                    "images": {"edges": []},
                    "variants": {"edges": []}
                }}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let handle = ProductHandle::parse("mug").unwrap();
        let product = client.product_by_handle(&handle).await.unwrap().unwrap();

        assert_eq!(product.description.as_deref(), Some("A big mug"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let handle = ProductHandle::parse("mug").unwrap();
        let err = client.product_by_handle(&handle).await.unwrap_err();

        assert!(matches!(err, ShopifyError::Status(401)));
        assert!(!err.to_string().contains(TOKEN));
    }

    #[tokio::test]
    async fn test_rate_limited_reads_retry_after() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let handle = ProductHandle::parse("mug").unwrap();
        let err = client.product_by_handle(&handle).await.unwrap_err();

        assert!(matches!(err, ShopifyError::RateLimited(7)));
    }

    #[tokio::test]
    async fn test_graphql_errors_are_surfaced() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{"message": "Throttled", "locations": [{"line": 2, "column": 5}]}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let handle = CollectionHandle::parse("frontpage").unwrap();
        let err = client.collection_by_handle(&handle).await.unwrap_err();

        assert_eq!(err.to_string(), "GraphQL errors: Throttled at line 2:5");
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"collectionByHandle": {"title": 42}}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let handle = CollectionHandle::parse("frontpage").unwrap();
        let err = client.collection_by_handle(&handle).await.unwrap_err();

        assert!(matches!(err, ShopifyError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_http_error() {
        let config = ShopifyConfig {
            // Port 9 (discard) is not listening in test environments.
            url: Url::parse("http://127.0.0.1:9/graphql.json").unwrap(),
            admin_token: SecretString::from(TOKEN),
            timeout: Duration::from_secs(2),
        };
        let client = ShopifyClient::new(&config).unwrap();
        let handle = CollectionHandle::parse("frontpage").unwrap();

        let err = client.collection_by_handle(&handle).await.unwrap_err();
        assert!(matches!(err, ShopifyError::Http(_)));
    }
}
