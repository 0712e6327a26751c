//! Core types for the collections adapter.
//!
//! This module provides type-safe handles and the simplified output document.

pub mod collection;
pub mod handle;

pub use collection::{CollectionProducts, ImageRef, SimplifiedProduct, SimplifiedVariant};
pub use handle::{CollectionHandle, HandleError, ProductHandle};
