//! Catalog route handlers.

use std::sync::Arc;

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use vitrine_core::{Brand, BrandId, Product};

use crate::catalog::CatalogStore;
use crate::middleware::CurrentShopper;

/// Catalog listing data.
#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub brands: Vec<Brand>,
    pub selected_brand: Option<BrandId>,
    pub extended_loaded: bool,
    pub products: Vec<Arc<Product>>,
}

impl From<&CatalogStore> for CatalogView {
    fn from(store: &CatalogStore) -> Self {
        Self {
            brands: store.brands(),
            selected_brand: store.selected_brand(),
            extended_loaded: store.extended_loaded(),
            products: store.filtered_products(),
        }
    }
}

/// Brand filter form data.
#[derive(Debug, Deserialize)]
pub struct SelectBrandForm {
    pub brand_id: BrandId,
}

/// Display the catalog, filtered by the shopper's selected brand.
#[instrument(skip_all)]
pub async fn index(CurrentShopper(shopper): CurrentShopper) -> Json<CatalogView> {
    let shopper = shopper.lock().await;
    Json(CatalogView::from(&shopper.catalog))
}

/// Toggle the brand filter and return the updated catalog.
///
/// Unknown brands are accepted and simply match no products.
#[instrument(skip(shopper))]
pub async fn select_brand(
    CurrentShopper(shopper): CurrentShopper,
    Json(form): Json<SelectBrandForm>,
) -> Json<CatalogView> {
    let mut shopper = shopper.lock().await;
    shopper.catalog.set_selected_brand(form.brand_id);
    Json(CatalogView::from(&shopper.catalog))
}
