//! Catalog listing commands.
//!
//! # Usage
//!
//! ```bash
//! vitrine-cli brands
//! vitrine-cli products --brand 2
//! vitrine-cli products --extended
//! ```

use std::sync::Arc;

use vitrine_core::{Brand, BrandId, Product};
use vitrine_storefront::catalog::{Catalog, CatalogStore};
use vitrine_storefront::data::CatalogSource;

use super::CommandError;

/// List brands, one per line.
pub async fn brands(source: Arc<dyn CatalogSource>) -> Result<Vec<String>, CommandError> {
    let catalog = Catalog::open(source).await?;
    Ok(catalog.brands().iter().map(brand_line).collect())
}

/// List products, optionally filtered by brand.
///
/// With `extended`, the catalog is upgraded first exactly as the first
/// product page visit would; an unavailable extended list falls back
/// silently to the basic one.
pub async fn products(
    source: Arc<dyn CatalogSource>,
    brand: Option<BrandId>,
    extended: bool,
) -> Result<Vec<String>, CommandError> {
    let mut store = CatalogStore::new(Catalog::open(source).await?);

    if extended {
        store.load_extended_products().await;
    }
    if let Some(brand) = brand {
        store.set_selected_brand(brand);
    }

    Ok(store
        .filtered_products()
        .iter()
        .map(|product| product_line(product, &store))
        .collect())
}

fn brand_line(brand: &Brand) -> String {
    format!("{}\t{}", brand.id, brand.name)
}

fn product_line(product: &Product, store: &CatalogStore) -> String {
    let brand = product
        .brand
        .and_then(|id| store.get_brand_by_id(id))
        .map_or_else(|| "-".to_string(), |b| b.name);

    format!(
        "{}\t{}\t{}\t{}",
        product.id,
        product.name,
        product.unit_price().normalize(),
        brand
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use vitrine_core::ProductId;
    use vitrine_storefront::data::MemorySource;

    use super::*;

    fn source() -> Arc<dyn CatalogSource> {
        let product = |id, brand, name: &str, price| {
            Product::new(
                ProductId::new(id),
                Some(BrandId::new(brand)),
                name,
                Decimal::new(price, 0),
            )
        };
        Arc::new(
            MemorySource::new(
                vec![
                    Brand::new(BrandId::new(1), "Northwind"),
                    Brand::new(BrandId::new(2), "Kestrel"),
                ],
                vec![product(1, 1, "Tee", 20), product(2, 2, "Cap", 15)],
            )
            .with_extended(vec![
                product(1, 1, "Tee", 20),
                product(2, 2, "Cap", 15),
                product(3, 2, "Kit", 60),
            ]),
        )
    }

    #[tokio::test]
    async fn test_brands() {
        let lines = brands(source()).await.unwrap();
        assert_eq!(lines, vec!["1\tNorthwind", "2\tKestrel"]);
    }

    #[tokio::test]
    async fn test_products_basic() {
        let lines = products(source(), None, false).await.unwrap();
        assert_eq!(lines, vec!["1\tTee\t20\tNorthwind", "2\tCap\t15\tKestrel"]);
    }

    #[tokio::test]
    async fn test_products_extended_by_brand() {
        let lines = products(source(), Some(BrandId::new(2)), true)
            .await
            .unwrap();
        assert_eq!(lines, vec!["2\tCap\t15\tKestrel", "3\tKit\t60\tKestrel"]);
    }

    #[tokio::test]
    async fn test_products_unknown_brand() {
        let lines = products(source(), Some(BrandId::new(9)), false)
            .await
            .unwrap();
        assert!(lines.is_empty());
    }
}
