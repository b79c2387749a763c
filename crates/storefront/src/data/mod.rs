//! Catalog data sources.
//!
//! # Architecture
//!
//! - The catalog never reads files itself; it asks a [`CatalogSource`]
//! - Three datasets: brands, the basic product list, and the extended
//!   ("Level 3") product list that is loaded lazily
//! - The extended list may be missing. Sources report that as
//!   [`DataError::NotFound`] and the catalog degrades to the basic list
//!
//! # Sources
//!
//! - [`BundledSource`] - JSON compiled into the binary (default)
//! - [`DirectorySource`] - JSON files read from a directory at runtime
//! - [`MemorySource`] - in-memory lists, for tests and embedding
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vitrine_storefront::data::{BundledSource, CatalogSource};
//!
//! let source: Arc<dyn CatalogSource> = Arc::new(BundledSource);
//! let brands = source.brands().await?;
//! ```

mod bundled;
mod directory;
mod memory;

pub use bundled::BundledSource;
pub use directory::DirectorySource;
pub use memory::MemorySource;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use vitrine_core::{Brand, Product};

/// File name of the brand list.
pub const BRANDS_FILE: &str = "brands.json";

/// File name of the basic product list.
pub const PRODUCTS_FILE: &str = "products.json";

/// File name of the extended product list.
pub const EXTENDED_PRODUCTS_FILE: &str = "products-level3.json";

/// Errors that can occur when reading catalog data.
#[derive(Debug, Error)]
pub enum DataError {
    /// The dataset does not exist.
    #[error("Dataset not found: {0}")]
    NotFound(String),

    /// Reading the dataset failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid JSON of the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only access to the catalog's static datasets.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load the brand list.
    async fn brands(&self) -> Result<Vec<Brand>, DataError>;

    /// Load the basic product list.
    async fn basic_products(&self) -> Result<Vec<Product>, DataError>;

    /// Load the extended product list.
    ///
    /// May contain duplicate IDs; deduplication is the catalog's job.
    async fn extended_products(&self) -> Result<Vec<Product>, DataError>;
}

/// Parse a JSON array dataset.
fn parse_list<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, DataError> {
    Ok(serde_json::from_str(json)?)
}
