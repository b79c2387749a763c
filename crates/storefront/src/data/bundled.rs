//! Datasets compiled into the binary.

use async_trait::async_trait;
use vitrine_core::{Brand, Product};

use super::{CatalogSource, DataError, parse_list};

const BRANDS_JSON: &str = include_str!("../../data/brands.json");
const PRODUCTS_JSON: &str = include_str!("../../data/products.json");
const EXTENDED_PRODUCTS_JSON: &str = include_str!("../../data/products-level3.json");

/// Source backed by the JSON files under `crates/storefront/data/`.
///
/// Parsing happens on every call; the catalog calls each method at most a
/// handful of times.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

#[async_trait]
impl CatalogSource for BundledSource {
    async fn brands(&self) -> Result<Vec<Brand>, DataError> {
        parse_list(BRANDS_JSON)
    }

    async fn basic_products(&self) -> Result<Vec<Product>, DataError> {
        parse_list(PRODUCTS_JSON)
    }

    async fn extended_products(&self) -> Result<Vec<Product>, DataError> {
        parse_list(EXTENDED_PRODUCTS_JSON)
    }
}
