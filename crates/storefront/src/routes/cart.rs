//! Cart route handlers.
//!
//! Lines are addressed by their position in the cart, as returned in
//! [`CartView`]. A stale index (e.g., from a second browser tab) is ignored
//! rather than rejected.

use std::sync::Arc;

use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use vitrine_core::{Product, ProductId, SelectedOptions};

use crate::cart::{CartItem, CartStore};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::CurrentShopper;

/// Cart line display data.
#[derive(Debug, Serialize)]
pub struct CartItemView {
    pub index: usize,
    pub product: Arc<Product>,
    pub quantity: u32,
    pub selected_options: Option<SelectedOptions>,
    pub line_total: Decimal,
}

impl CartItemView {
    fn new(index: usize, item: &CartItem) -> Self {
        Self {
            index,
            product: Arc::clone(&item.product),
            quantity: item.quantity,
            selected_options: item.selected_options.clone(),
            line_total: item.line_total().normalize(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_items: u64,
    pub total_price: Decimal,
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| CartItemView::new(index, item))
                .collect(),
            total_items: cart.total_items(),
            total_price: cart.total_price().normalize(),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCountView {
    pub count: u64,
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    #[serde(default)]
    pub selected_options: Option<SelectedOptions>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub index: usize,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Display the cart.
#[instrument(skip_all)]
pub async fn show(CurrentShopper(shopper): CurrentShopper) -> Json<CartView> {
    let shopper = shopper.lock().await;
    Json(CartView::from(&shopper.cart))
}

/// Get the cart count badge.
#[instrument(skip_all)]
pub async fn count(CurrentShopper(shopper): CurrentShopper) -> Json<CartCountView> {
    let shopper = shopper.lock().await;
    Json(CartCountView {
        count: shopper.cart.total_items(),
    })
}

/// Add one unit of a product to the cart.
#[instrument(skip(shopper))]
pub async fn add(
    CurrentShopper(shopper): CurrentShopper,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartView>> {
    let mut shopper = shopper.lock().await;

    let product = shopper
        .catalog
        .get_product(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Added item", Some(&[("product_id", product_id.as_str())]));
    shopper.cart.add_item(product, form.selected_options);

    Ok(Json(CartView::from(&shopper.cart)))
}

/// Set a line's quantity. Zero or below removes the line.
#[instrument(skip(shopper))]
pub async fn update(
    CurrentShopper(shopper): CurrentShopper,
    Json(form): Json<UpdateCartForm>,
) -> Json<CartView> {
    let mut shopper = shopper.lock().await;
    shopper.cart.update_quantity(form.index, form.quantity);
    Json(CartView::from(&shopper.cart))
}

/// Remove a line from the cart.
#[instrument(skip(shopper))]
pub async fn remove(
    CurrentShopper(shopper): CurrentShopper,
    Json(form): Json<RemoveFromCartForm>,
) -> Json<CartView> {
    let mut shopper = shopper.lock().await;
    if !shopper.cart.remove_item(form.index) {
        tracing::debug!(index = form.index, "Ignoring removal of stale cart line");
    }
    Json(CartView::from(&shopper.cart))
}

/// Empty the cart.
#[instrument(skip_all)]
pub async fn clear(CurrentShopper(shopper): CurrentShopper) -> Json<CartView> {
    let mut shopper = shopper.lock().await;
    shopper.cart.clear_cart();
    add_breadcrumb("cart", "Cleared cart", None);
    Json(CartView::from(&shopper.cart))
}
