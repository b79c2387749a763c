//! Datasets read from a directory at runtime.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use vitrine_core::{Brand, Product};

use super::{
    BRANDS_FILE, CatalogSource, DataError, EXTENDED_PRODUCTS_FILE, PRODUCTS_FILE, parse_list,
};

/// Source reading `brands.json`, `products.json` and `products-level3.json`
/// from a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at `dir`. The directory is not checked until
    /// the first read.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory datasets are read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, DataError> {
        let path = self.dir.join(file);
        let json = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => DataError::NotFound(path.display().to_string()),
                _ => DataError::Io(e),
            })?;
        debug!(bytes = json.len(), "Read dataset");
        parse_list(&json)
    }
}

#[async_trait]
impl CatalogSource for DirectorySource {
    async fn brands(&self) -> Result<Vec<Brand>, DataError> {
        self.read(BRANDS_FILE).await
    }

    async fn basic_products(&self) -> Result<Vec<Product>, DataError> {
        self.read(PRODUCTS_FILE).await
    }

    async fn extended_products(&self) -> Result<Vec<Product>, DataError> {
        self.read(EXTENDED_PRODUCTS_FILE).await
    }
}
