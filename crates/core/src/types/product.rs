//! Product and brand records.
//!
//! Only the fields the catalog and cart interpret are typed. Everything else
//! (images, descriptions, variant metadata, ...) is an opaque payload that is
//! preserved on input and re-emitted unchanged on output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::{BrandId, ProductId};
use super::price::RegularPrice;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID. Numeric or numeric string on input.
    pub id: ProductId,
    /// Brand this product belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandId>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Unit price.
    pub regular_price: RegularPrice,
    /// Opaque passthrough payload.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with no extra payload.
    #[must_use]
    pub fn new(
        id: ProductId,
        brand: Option<BrandId>,
        name: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            brand,
            name: name.into(),
            regular_price: RegularPrice::new(price),
            extra: Map::new(),
        }
    }

    /// Unit price of this product.
    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.regular_price.value
    }

    /// Whether this product belongs to the given brand.
    #[must_use]
    pub fn is_brand(&self, brand: BrandId) -> bool {
        self.brand == Some(brand)
    }
}

/// A brand products can be filtered by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    /// Brand ID. Numeric or numeric string on input.
    pub id: BrandId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Opaque passthrough payload (logo, description, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Brand {
    /// Create a brand with no extra payload.
    #[must_use]
    pub fn new(id: BrandId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            extra: Map::new(),
        }
    }
}
