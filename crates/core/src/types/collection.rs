//! Simplified collection document returned to API callers.
//!
//! These types are the flattened counterpart of the upstream GraphQL shapes:
//! edge/node wrappers are removed and variants carry their product's handle.

use serde::{Deserialize, Serialize};

use super::handle::ProductHandle;

/// An image reference (gallery image, featured image or variant image).
///
/// Upstream alt text is nullable; a missing alt text is rendered as `""`
/// so the field is always a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub alt_text: String,
    pub url: String,
}

/// A purchasable option of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedVariant {
    /// Handle of the enclosing product (variants have no handle upstream).
    pub handle: ProductHandle,
    pub id: String,
    pub title: String,
    /// Price exactly as the upstream formats it (e.g. `"9.99"`).
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

/// A product flattened from the upstream product-by-handle response.
///
/// `images` and `variants` are always present (possibly empty);
/// `featuredImage` only appears when the upstream had one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedProduct {
    pub handle: ProductHandle,
    pub id: String,
    pub title: String,
    pub description: String,
    pub images: Vec<ImageRef>,
    pub variants: Vec<SimplifiedVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<ImageRef>,
}

/// A collection together with the products that could be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionProducts {
    pub id: String,
    pub title: String,
    /// Products in collection order.
    pub products: Vec<SimplifiedProduct>,
}

impl CollectionProducts {
    /// Create an empty document for a collection.
    #[must_use]
    pub const fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            products: Vec::new(),
        }
    }

    /// Render the document as JSON with 2-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn mug() -> SimplifiedProduct {
        let handle = ProductHandle::parse("mug").unwrap();
        SimplifiedProduct {
            handle: handle.clone(),
            id: "gid://p1".to_string(),
            title: "Mug".to_string(),
            description: "A mug".to_string(),
            images: vec![],
            variants: vec![SimplifiedVariant {
                handle,
                id: "v1".to_string(),
                title: "Default".to_string(),
                price: "9.99".to_string(),
                image: None,
            }],
            featured_image: None,
        }
    }

    #[test]
    fn test_absent_optional_images_are_omitted() {
        let value = serde_json::to_value(mug()).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("featuredImage"));
        assert_eq!(object["images"], json!([]));
        assert!(!value["variants"][0].as_object().unwrap().contains_key("image"));
    }

    #[test]
    fn test_featured_image_uses_camel_case() {
        let mut product = mug();
        product.featured_image = Some(ImageRef {
            alt_text: "Front".to_string(),
            url: "https://cdn.example/mug.png".to_string(),
        });

        let value = serde_json::to_value(product).unwrap();
        assert_eq!(
            value["featuredImage"],
            json!({"altText": "Front", "url": "https://cdn.example/mug.png"})
        );
    }

    #[test]
    fn test_product_key_order() {
        let json = serde_json::to_string(&mug()).unwrap();
        assert!(json.starts_with(
            r#"{"handle":"mug","id":"gid://p1","title":"Mug","description":"A mug","images":[],"variants":"#
        ));
    }

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        let doc = CollectionProducts::new("gid://1".to_string(), "Front Page".to_string());
        let pretty = doc.to_pretty_json().unwrap();

        assert_eq!(
            pretty,
            "{\n  \"id\": \"gid://1\",\n  \"title\": \"Front Page\",\n  \"products\": []\n}"
        );
    }
}
