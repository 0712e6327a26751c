//! Conversions from upstream records to the simplified document types.

use shopify_collections_core::{ImageRef, ProductHandle, SimplifiedProduct, SimplifiedVariant};

use super::types::{RawImage, RawProduct, RawVariant};

/// Flatten an upstream image.
#[must_use]
pub fn simplify_image(image: RawImage) -> ImageRef {
    ImageRef {
        alt_text: image.alt_text.unwrap_or_default(),
        url: image.url,
    }
}

/// Flatten an upstream product fetched under `handle`.
///
/// Variants take the product's handle, never one of their own. Image and
/// variant order follows the upstream edges.
#[must_use]
pub fn simplify_product(handle: &ProductHandle, product: RawProduct) -> SimplifiedProduct {
    SimplifiedProduct {
        handle: handle.clone(),
        id: product.id,
        title: product.title,
        description: product.description.unwrap_or_default(),
        images: product.images.into_nodes().map(simplify_image).collect(),
        variants: product
            .variants
            .into_nodes()
            .map(|variant| simplify_variant(handle, variant))
            .collect(),
        featured_image: product.featured_image.map(simplify_image),
    }
}

fn simplify_variant(handle: &ProductHandle, variant: RawVariant) -> SimplifiedVariant {
    SimplifiedVariant {
        handle: handle.clone(),
        id: variant.id,
        title: variant.title,
        price: variant.price,
        image: variant.image.map(simplify_image),
    }
}
