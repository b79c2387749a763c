//! Vitrine Core - Shared types library.
//!
//! This crate provides the catalog and cart types used across all Vitrine
//! components:
//! - `storefront` - Catalog and cart stores, plus the JSON HTTP surface
//! - `cli` - Command-line tools for inspecting catalog data
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no async runtime.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Numeric IDs, prices, products, brands and selected options

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
