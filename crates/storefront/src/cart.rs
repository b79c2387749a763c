//! Shopping cart store.
//!
//! A cart is an ordered list of line items. Adding a product that matches an
//! existing line (same product ID and structurally equal selected options)
//! increments that line instead of appending a new one.
//!
//! Every operation is infallible. Indices come from the presentation layer
//! and may be stale, so an out-of-range index is a no-op rather than an error.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use vitrine_core::{Product, SelectedOptions};

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    /// The product, shared read-only with the catalog.
    pub product: Arc<Product>,
    /// Number of units, always at least 1.
    pub quantity: u32,
    /// Chosen customization, `None` for a plain product.
    pub selected_options: Option<SelectedOptions>,
}

impl CartItem {
    /// Whether this line is the same line as `product` with `options`.
    ///
    /// Both-absent options match; one-absent never does.
    #[must_use]
    pub fn matches(&self, product: &Product, options: Option<&SelectedOptions>) -> bool {
        self.product.id == product.id && self.selected_options.as_ref() == options
    }

    /// `quantity × unit price`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.regular_price.times(self.quantity)
    }
}

/// A shopper's cart.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `product` with optional customization.
    ///
    /// Merges into a matching line if there is one, otherwise appends a new
    /// line with quantity 1. Quantities saturate at `u32::MAX`.
    pub fn add_item(&mut self, product: Arc<Product>, selected_options: Option<SelectedOptions>) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.matches(&product, selected_options.as_ref()))
        {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }

        self.items.push(CartItem {
            product,
            quantity: 1,
            selected_options,
        });
    }

    /// Remove the line at `index`. Returns whether a line was removed.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.items.remove(index);
            true
        } else {
            false
        }
    }

    /// Set the quantity of the line at `index`.
    ///
    /// A quantity of zero or below removes the line. Larger quantities are
    /// set exactly (clamped to `u32::MAX`), not added.
    pub fn update_quantity(&mut self, index: usize, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(index);
            return;
        }

        if let Some(item) = self.items.get_mut(index) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Total price across all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use vitrine_core::{BrandId, ProductId};

    use super::*;

    fn product(id: i64, price: i64) -> Arc<Product> {
        Arc::new(Product::new(
            ProductId::new(id),
            Some(BrandId::new(1)),
            format!("Product {id}"),
            Decimal::new(price, 0),
        ))
    }

    fn color(value: &str) -> Option<SelectedOptions> {
        Some(SelectedOptions::new().with("color", value))
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let mut cart = CartStore::new();
        let p = product(1, 10);
        for _ in 0..5 {
            cart.add_item(p.clone(), None);
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_different_options_make_distinct_lines() {
        let mut cart = CartStore::new();
        let p = product(1, 10);
        cart.add_item(p.clone(), color("red"));
        cart.add_item(p, color("blue"));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.items()[1].quantity, 1);
    }

    #[test]
    fn test_equal_options_merge() {
        let mut cart = CartStore::new();
        let p = product(1, 10);
        cart.add_item(p.clone(), color("red"));
        cart.add_item(p, color("red"));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_options_versus_no_options_are_distinct() {
        let mut cart = CartStore::new();
        let p = product(1, 10);
        cart.add_item(p.clone(), None);
        cart.add_item(p.clone(), color("red"));
        cart.add_item(p.clone(), Some(SelectedOptions::new()));
        cart.add_item(p, None);

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_same_options_on_different_products_are_distinct() {
        let mut cart = CartStore::new();
        cart.add_item(product(1, 10), color("red"));
        cart.add_item(product(2, 10), color("red"));

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_new_lines_append_in_order() {
        let mut cart = CartStore::new();
        cart.add_item(product(3, 1), None);
        cart.add_item(product(1, 1), None);
        cart.add_item(product(3, 1), None);
        cart.add_item(product(2, 1), None);

        let ids: Vec<_> = cart.items().iter().map(|i| i.product.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        for quantity in [0, -3] {
            let mut cart = CartStore::new();
            cart.add_item(product(1, 10), None);
            cart.add_item(product(2, 10), None);

            cart.update_quantity(0, quantity);

            assert_eq!(cart.len(), 1);
            assert_eq!(cart.items()[0].product.id, ProductId::new(2));
        }
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let mut cart = CartStore::new();
        let p = product(1, 10);
        cart.add_item(p.clone(), None);
        cart.add_item(p, None);

        cart.update_quantity(0, 7);
        assert_eq!(cart.items()[0].quantity, 7);

        cart.update_quantity(0, 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_update_quantity_clamps_huge_values() {
        let mut cart = CartStore::new();
        cart.add_item(product(1, 10), None);
        cart.update_quantity(0, i64::MAX);
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_update_quantity_out_of_range_is_noop() {
        let mut cart = CartStore::new();
        cart.add_item(product(1, 10), None);

        cart.update_quantity(5, 3);
        cart.update_quantity(5, 0);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = CartStore::new();
        cart.add_item(product(1, 10), None);
        cart.add_item(product(2, 10), None);

        assert!(cart.remove_item(0));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].product.id, ProductId::new(2));
    }

    #[test]
    fn test_remove_item_out_of_range_is_noop() {
        let mut cart = CartStore::new();
        cart.add_item(product(1, 10), None);
        cart.add_item(product(2, 10), None);
        let before = cart.items().to_vec();

        assert!(!cart.remove_item(2));
        assert!(!cart.remove_item(usize::MAX));

        assert_eq!(cart.items(), before.as_slice());
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = CartStore::new();
        cart.add_item(product(1, 10), None);
        cart.add_item(product(2, 10), color("red"));

        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);

        // Clearing an empty cart is fine
        cart.clear_cart();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_price() {
        let mut cart = CartStore::new();
        cart.add_item(product(1, 10), None);
        cart.add_item(product(2, 5), None);
        cart.update_quantity(0, 2);
        cart.update_quantity(1, 3);

        assert_eq!(cart.total_price(), Decimal::new(35, 0));
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_totals_of_empty_cart() {
        let cart = CartStore::new();
        assert_eq!(cart.total_price(), Decimal::ZERO);
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_total_price_with_fractional_prices() {
        let mut cart = CartStore::new();
        let p = Arc::new(Product::new(
            ProductId::new(1),
            None,
            "Mug",
            Decimal::new(1850, 2),
        ));
        cart.add_item(p.clone(), None);
        cart.add_item(p, None);

        assert_eq!(cart.total_price(), Decimal::new(3700, 2));
    }
}
