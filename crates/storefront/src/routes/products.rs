//! Product route handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;
use vitrine_core::{Brand, Product, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product detail data.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub product: Arc<Product>,
    pub brand: Option<Brand>,
}

/// Display product detail.
///
/// The first visit to any product page upgrades the catalog to the extended
/// product list; later visits reuse it.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let id: ProductId = id
        .parse()
        .map_err(|e| AppError::BadRequest(format!("invalid product id: {e}")))?;

    let catalog = state.catalog();
    catalog.load_extended_products().await;

    let product = catalog
        .product(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    let brand = product.brand.and_then(|brand| catalog.brand(brand));

    Ok(Json(ProductView { product, brand }))
}
