//! Typed records for the two upstream query responses.
//!
//! Connections (`images`, `variants`, collection `products`) that are missing,
//! `null` or malformed all decode as an empty list. Within a well-formed
//! connection each edge is decoded on its own, and an edge that does not
//! match its record is dropped. Both malformed cases are logged so they can
//! be told apart from a genuinely empty gallery.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

// =============================================================================
// Pagination wrappers
// =============================================================================

/// A GraphQL connection: a list of edges each wrapping one node.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    /// Unwrap the edges, keeping node order.
    pub fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges.into_iter().map(|edge| edge.node)
    }
}

/// A single edge of a [`Connection`].
#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

fn lenient_connection<'de, D, T>(deserializer: D) -> Result<Connection<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(Connection::default());
    };

    let edges = match value {
        serde_json::Value::Object(mut fields) => match fields.remove("edges") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(serde_json::Value::Array(edges)) => edges,
            Some(_) => {
                tracing::warn!("Connection edges are not a list in upstream response, treating as empty");
                Vec::new()
            }
        },
        _ => {
            tracing::warn!("Connection is not an object in upstream response, treating as empty");
            Vec::new()
        }
    };

    // One bad edge must not take its siblings down with it
    let edges = edges
        .into_iter()
        .enumerate()
        .filter_map(|(index, edge)| match serde_json::from_value::<Edge<T>>(edge) {
            Ok(edge) => Some(edge),
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping malformed edge from upstream response");
                None
            }
        })
        .collect();

    Ok(Connection { edges })
}

// =============================================================================
// collectionByHandle
// =============================================================================

/// `data` of the collection-by-handle query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionByHandleData {
    pub collection_by_handle: Option<RawCollection>,
}

/// A collection as returned upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCollection {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_connection")]
    pub products: Connection<RawCollectionProduct>,
}

/// Product reference inside a collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCollectionProduct {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Empty or missing handles cannot be fetched and are skipped.
    #[serde(default)]
    pub handle: Option<String>,
}

// =============================================================================
// productByHandle
// =============================================================================

/// `data` of the product-by-handle query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductByHandleData {
    pub product_by_handle: Option<RawProduct>,
}

/// Product detail as returned upstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub featured_image: Option<RawImage>,
    #[serde(default, deserialize_with = "lenient_connection")]
    pub images: Connection<RawImage>,
    #[serde(default, deserialize_with = "lenient_connection")]
    pub variants: Connection<RawVariant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    #[serde(default)]
    pub alt_text: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVariant {
    pub id: String,
    pub title: String,
    pub price: String,
    #[serde(default)]
    pub image: Option<RawImage>,
}
