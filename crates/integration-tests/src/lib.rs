//! Integration tests for the Shopify collections adapter.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopify-collections-integration-tests
//! ```
//!
//! Each test gets its own [`TestContext`]: a `wiremock` server standing in
//! for the Shopify GraphQL endpoint and the real API router bound to an
//! ephemeral local port. No network access or credentials are needed.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::time::Duration;

use secrecy::SecretString;
use serde_json::{Value, json};
use shopify_collections_api::config::{ApiConfig, ShopifyConfig};
use shopify_collections_api::state::AppState;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Access token the stub upstream expects.
pub const TEST_TOKEN: &str = "shpat_it_4Hq8Zr2Nw6Lx0Vb3";

/// Path the stub upstream serves GraphQL on.
pub const GRAPHQL_PATH: &str = "/admin/api/2025-01/graphql.json";

/// A running API server wired to a stub upstream.
pub struct TestContext {
    pub upstream: MockServer,
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestContext {
    /// Start the stub upstream and the API server.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind a local port.
    pub async fn start() -> Self {
        Self::start_with_concurrency(NonZeroUsize::MIN).await
    }

    /// Start with a specific product fetch concurrency.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind a local port.
    pub async fn start_with_concurrency(concurrency: NonZeroUsize) -> Self {
        let upstream = MockServer::start().await;

        let config = ApiConfig {
            host: "127.0.0.1".parse().expect("valid loopback address"),
            port: 0,
            shopify: ShopifyConfig {
                url: Url::parse(&format!("{}{GRAPHQL_PATH}", upstream.uri()))
                    .expect("valid mock server URL"),
                admin_token: SecretString::from(TEST_TOKEN),
                timeout: Duration::from_secs(5),
            },
            product_fetch_concurrency: concurrency,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let listener = tokio::net::TcpListener::bind(config.socket_addr())
            .await
            .expect("Failed to bind test listener");
        let addr: SocketAddr = listener.local_addr().expect("listener has an address");

        let state = AppState::new(config).expect("Failed to build application state");
        let app = shopify_collections_api::app(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            upstream,
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
        }
    }

    /// GET a path on the API server.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("Failed to reach API server")
    }

    /// Stub the collection query for `handle`.
    pub async fn mock_collection(&self, handle: &str, collection: Value) {
        self.mock_query(
            "getCollection",
            handle,
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"collectionByHandle": collection}})),
        )
        .await;
    }

    /// Stub the product query for `handle`.
    pub async fn mock_product(&self, handle: &str, product: Value) {
        self.mock_query(
            "getProductByHandle",
            handle,
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"productByHandle": product}})),
        )
        .await;
    }

    /// Stub an arbitrary response for one operation and handle.
    pub async fn mock_query(&self, operation: &str, handle: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(header("X-Shopify-Access-Token", TEST_TOKEN))
            .and(body_partial_json(json!({
                "operationName": operation,
                "variables": {"handle": handle}
            })))
            .respond_with(response)
            .mount(&self.upstream)
            .await;
    }
}

/// A collection fixture referencing the given product handles in order.
#[must_use]
pub fn collection_json(id: &str, title: &str, handles: &[&str]) -> Value {
    let edges: Vec<Value> = handles
        .iter()
        .map(|h| json!({"node": {"id": format!("gid://shopify/Product/{h}"), "title": h, "handle": h}}))
        .collect();
    json!({"id": id, "title": title, "products": {"edges": edges}})
}

/// A minimal product fixture with one variant.
#[must_use]
pub fn product_json(id: &str, title: &str, price: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("The {title}"),
        "featuredImage": null,
        "images": {"edges": []},
        "variants": {"edges": [
            {"node": {"id": format!("{id}-v1"), "title": "Default", "price": price, "image": null}}
        ]}
    })
}
