//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The regular (list) price of a product.
///
/// Catalog files carry the price as `{"value": 29.99, "currency": "USD"}`.
/// Only `value` is interpreted; any other field is kept as-is so the record
/// can be re-emitted unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularPrice {
    /// Unit price. Accepts a JSON number or a decimal string on input.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub value: Decimal,
    /// Unrecognized fields (currency, formatted labels, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RegularPrice {
    /// Create a price with no extra payload.
    #[must_use]
    pub fn new(value: Decimal) -> Self {
        Self {
            value,
            extra: Map::new(),
        }
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.value * Decimal::from(quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_from_number_and_string() {
        let a: RegularPrice = serde_json::from_str(r#"{"value": 29.99}"#).unwrap();
        let b: RegularPrice = serde_json::from_str(r#"{"value": "29.99"}"#).unwrap();
        assert_eq!(a.value, Decimal::new(2999, 2));
        assert_eq!(a.value, b.value);
    }

    #[test]
    fn test_price_keeps_extra_fields() {
        let price: RegularPrice =
            serde_json::from_str(r#"{"value": 10, "currency": "EUR"}"#).unwrap();
        assert_eq!(price.extra.get("currency"), Some(&Value::from("EUR")));

        let json = serde_json::to_value(&price).unwrap();
        assert_eq!(json["currency"], "EUR");
        assert_eq!(json["value"], 10.0);
    }

    #[test]
    fn test_times() {
        let price = RegularPrice::new(Decimal::new(250, 2));
        assert_eq!(price.times(4), Decimal::new(10, 0));
        assert_eq!(price.times(0), Decimal::ZERO);
    }
}
