//! Application state shared across handlers.

use std::sync::Arc;

use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::cart::CartStore;
use crate::catalog::{Catalog, CatalogStore};
use crate::config::StorefrontConfig;

/// Upper bound on concurrently tracked shoppers.
const MAX_SHOPPERS: u64 = 10_000;

/// One browsing session's stores: a filtered view of the catalog and a cart.
#[derive(Debug)]
pub struct Shopper {
    pub catalog: CatalogStore,
    pub cart: CartStore,
}

impl Shopper {
    /// Create a shopper with no brand filter and an empty cart.
    #[must_use]
    pub const fn new(catalog: Catalog) -> Self {
        Self {
            catalog: CatalogStore::new(catalog),
            cart: CartStore::new(),
        }
    }
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// shared catalog and to each session's shopper.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    /// Shoppers are dropped after `cart_idle_timeout` without a request.
    shoppers: Cache<Uuid, Arc<Mutex<Shopper>>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - The shared catalog, already populated with basic products
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let shoppers = Cache::builder()
            .max_capacity(MAX_SHOPPERS)
            .time_to_idle(config.cart_idle_timeout)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                shoppers,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the shared catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the shopper for a session, creating it on first use.
    pub async fn shopper(&self, id: Uuid) -> Arc<Mutex<Shopper>> {
        let catalog = self.inner.catalog.clone();
        self.inner
            .shoppers
            .get_with(id, async move { Arc::new(Mutex::new(Shopper::new(catalog))) })
            .await
    }
}
