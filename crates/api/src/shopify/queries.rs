//! GraphQL query documents sent to Shopify.
//!
//! Both documents take a single `$handle: String!` variable. Page sizes are
//! fixed: 5 products per collection, 10 images and 10 variants per product.

use serde::Serialize;

/// Operation name of [`COLLECTION_BY_HANDLE`].
pub const COLLECTION_BY_HANDLE_OPERATION: &str = "getCollection";

/// Collection id, title and the handles of its first products.
pub const COLLECTION_BY_HANDLE: &str = r"
query getCollection($handle: String!) {
    collectionByHandle(handle: $handle) {
        id
        title
        products(first: 5) {
            edges {
                node {
                    id
                    title
                    handle
                }
            }
        }
    }
}";

/// Operation name of [`PRODUCT_BY_HANDLE`].
pub const PRODUCT_BY_HANDLE_OPERATION: &str = "getProductByHandle";

/// Product detail with featured image, gallery images and variants.
pub const PRODUCT_BY_HANDLE: &str = r"
query getProductByHandle($handle: String!) {
    productByHandle(handle: $handle) {
        id
        title
        description
        featuredImage {
            url
            altText
        }
        images(first: 10) {
            edges {
                node {
                    url
                    altText
                }
            }
        }
        variants(first: 10) {
            edges {
                node {
                    id
                    title
                    price
                    image {
                        altText
                        url
                    }
                }
            }
        }
    }
}";

/// Variables shared by both queries.
#[derive(Debug, Clone, Serialize)]
pub struct HandleVariables<'a> {
    pub handle: &'a str,
}
