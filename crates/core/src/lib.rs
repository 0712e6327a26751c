//! Shopify Collections Core - Shared types library.
//!
//! This crate provides the types shared by the collections adapter components:
//! - `api` - HTTP adapter serving `/api/collections/{handle}`
//! - `cli` - One-shot command-line fetch of a collection document
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Handle newtypes and the simplified collection document
//! - [`sanitize`] - Normalization of free-text description fields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod sanitize;
pub mod types;

pub use sanitize::sanitize_description;
pub use types::*;
