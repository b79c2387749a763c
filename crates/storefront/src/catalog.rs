//! Product catalog store.
//!
//! The catalog starts with the basic product list and is upgraded to the
//! extended ("Level 3") list on demand. The upgrade happens at most once: after
//! it succeeds the product list never reverts and the extended dataset is
//! never fetched again. A failed or empty upgrade is logged and otherwise
//! ignored, so callers can retry later.
//!
//! [`Catalog`] is the shared dataset (cheaply cloneable via `Arc`).
//! [`CatalogStore`] is one shopper's view of it, carrying the brand filter.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};
use vitrine_core::{Brand, BrandId, Product, ProductId};

use crate::data::{CatalogSource, DataError};

/// The shared product and brand dataset.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    source: Arc<dyn CatalogSource>,
    state: RwLock<CatalogState>,
    /// Serializes extended loads so the dataset is applied at most once.
    load_lock: Mutex<()>,
}

#[derive(Default)]
struct CatalogState {
    products: Vec<Arc<Product>>,
    brands: Vec<Brand>,
    loading: bool,
    extended_loaded: bool,
}

impl Catalog {
    /// Create an empty catalog (no brands, no products).
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                source,
                state: RwLock::new(CatalogState::default()),
                load_lock: Mutex::new(()),
            }),
        }
    }

    /// Create a catalog populated with the brand list and the basic products.
    ///
    /// # Errors
    ///
    /// Returns `DataError` if either dataset cannot be read.
    #[instrument(skip_all)]
    pub async fn open(source: Arc<dyn CatalogSource>) -> Result<Self, DataError> {
        let brands = source.brands().await?;
        let products = source.basic_products().await?;
        info!(
            brands = brands.len(),
            products = products.len(),
            "Catalog opened with basic products"
        );

        let catalog = Self::new(source);
        {
            let mut state = catalog.write();
            state.brands = brands;
            state.products = products.into_iter().map(Arc::new).collect();
        }
        Ok(catalog)
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all products, in catalog order.
    #[must_use]
    pub fn products(&self) -> Vec<Arc<Product>> {
        self.read().products.clone()
    }

    /// Snapshot of all brands, in catalog order.
    #[must_use]
    pub fn brands(&self) -> Vec<Brand> {
        self.read().brands.clone()
    }

    /// Number of products currently in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().products.is_empty()
    }

    /// Products belonging to `brand`, or all products when `brand` is `None`.
    #[must_use]
    pub fn products_by_brand(&self, brand: Option<BrandId>) -> Vec<Arc<Product>> {
        let state = self.read();
        match brand {
            None => state.products.clone(),
            Some(brand) => state
                .products
                .iter()
                .filter(|p| p.is_brand(brand))
                .cloned()
                .collect(),
        }
    }

    /// Look up a brand by ID.
    #[must_use]
    pub fn brand(&self, id: BrandId) -> Option<Brand> {
        self.read().brands.iter().find(|b| b.id == id).cloned()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<Arc<Product>> {
        self.read().products.iter().find(|p| p.id == id).cloned()
    }

    /// Whether an extended load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    /// Whether the extended dataset has been applied.
    #[must_use]
    pub fn extended_loaded(&self) -> bool {
        self.read().extended_loaded
    }

    /// Upgrade to the extended product list.
    ///
    /// Returns immediately once the upgrade has succeeded. On success the
    /// extended list is deduplicated by ID (first occurrence wins) and
    /// replaces the product list wholesale. An empty or unavailable extended
    /// list leaves the catalog as it is, except that an empty catalog is
    /// filled from the basic list. Never fails.
    #[instrument(skip(self))]
    pub async fn load_extended_products(&self) {
        if self.extended_loaded() {
            return;
        }

        let _guard = self.inner.load_lock.lock().await;
        // Another caller may have finished the upgrade while we waited.
        if self.extended_loaded() {
            return;
        }

        let _loading = LoadingFlag::set(self);
        match self.inner.source.extended_products().await {
            Ok(products) if !products.is_empty() => {
                let fetched = products.len();
                let unique = dedup_by_id(products);
                info!(fetched, unique = unique.len(), "Extended products loaded");

                let mut state = self.write();
                state.products = unique.into_iter().map(Arc::new).collect();
                state.extended_loaded = true;
            }
            Ok(_) => {
                warn!("Extended products dataset is empty, using basic products");
                self.fall_back_to_basic().await;
            }
            Err(e) => {
                warn!(error = %e, "Extended products not available, using basic products");
                self.fall_back_to_basic().await;
            }
        }
    }

    /// Populate an empty catalog from the basic product list.
    async fn fall_back_to_basic(&self) {
        if !self.is_empty() {
            return;
        }

        match self.inner.source.basic_products().await {
            Ok(products) => {
                info!(products = products.len(), "Catalog filled from basic products");
                let mut state = self.write();
                if state.products.is_empty() {
                    state.products = products.into_iter().map(Arc::new).collect();
                }
            }
            Err(e) => {
                error!(error = %e, "Basic products not available, catalog stays empty");
            }
        }
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("Catalog")
            .field("products", &state.products.len())
            .field("brands", &state.brands.len())
            .field("loading", &state.loading)
            .field("extended_loaded", &state.extended_loaded)
            .finish_non_exhaustive()
    }
}

/// Holds the `loading` flag for the lifetime of an extended load, including
/// when the load future is dropped part-way.
struct LoadingFlag<'a> {
    catalog: &'a Catalog,
}

impl<'a> LoadingFlag<'a> {
    fn set(catalog: &'a Catalog) -> Self {
        catalog.write().loading = true;
        Self { catalog }
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        self.catalog.write().loading = false;
    }
}

/// Drop products whose ID was already seen, keeping first occurrences in order.
#[must_use]
pub fn dedup_by_id(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::with_capacity(products.len());
    products
        .into_iter()
        .filter(|p| seen.insert(p.id))
        .collect()
}

/// IDs that occur more than once, each reported once, in order of first repeat.
#[must_use]
pub fn duplicate_ids(products: &[Product]) -> Vec<ProductId> {
    let mut seen = HashSet::with_capacity(products.len());
    let mut reported = HashSet::new();
    products
        .iter()
        .filter(|p| !seen.insert(p.id) && reported.insert(p.id))
        .map(|p| p.id)
        .collect()
}

// =============================================================================
// CatalogStore
// =============================================================================

/// One shopper's view of the catalog: the shared dataset plus a brand filter.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    catalog: Catalog,
    selected_brand: Option<BrandId>,
}

impl CatalogStore {
    /// Create a view with no brand filter.
    #[must_use]
    pub const fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selected_brand: None,
        }
    }

    /// The shared dataset behind this view.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Toggle the brand filter.
    ///
    /// Selecting the brand that is already selected clears the filter;
    /// selecting any other brand replaces it.
    pub fn set_selected_brand(&mut self, brand: BrandId) {
        self.selected_brand = if self.selected_brand == Some(brand) {
            None
        } else {
            Some(brand)
        };
    }

    /// The current brand filter.
    #[must_use]
    pub const fn selected_brand(&self) -> Option<BrandId> {
        self.selected_brand
    }

    /// Products matching the brand filter, in catalog order.
    #[must_use]
    pub fn filtered_products(&self) -> Vec<Arc<Product>> {
        self.catalog.products_by_brand(self.selected_brand)
    }

    /// All products, ignoring the filter.
    #[must_use]
    pub fn products(&self) -> Vec<Arc<Product>> {
        self.catalog.products()
    }

    /// All brands.
    #[must_use]
    pub fn brands(&self) -> Vec<Brand> {
        self.catalog.brands()
    }

    /// Look up a brand by ID.
    #[must_use]
    pub fn get_brand_by_id(&self, id: BrandId) -> Option<Brand> {
        self.catalog.brand(id)
    }

    /// Look up a product by ID, ignoring the filter.
    #[must_use]
    pub fn get_product(&self, id: ProductId) -> Option<Arc<Product>> {
        self.catalog.product(id)
    }

    /// Whether an extended load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.catalog.is_loading()
    }

    /// Whether the extended dataset has been applied.
    #[must_use]
    pub fn extended_loaded(&self) -> bool {
        self.catalog.extended_loaded()
    }

    /// See [`Catalog::load_extended_products`].
    pub async fn load_extended_products(&self) {
        self.catalog.load_extended_products().await;
    }
}
