//! Dataset validation.
//!
//! # Usage
//!
//! ```bash
//! vitrine-cli --data-dir ./data check
//! ```
//!
//! Brands and basic products must load. The extended list is optional, as it
//! is for the storefront; duplicate IDs in it are reported but tolerated since
//! the catalog keeps the first occurrence.

use std::collections::HashSet;

use vitrine_core::{BrandId, Product, ProductId};
use vitrine_storefront::catalog::{dedup_by_id, duplicate_ids};
use vitrine_storefront::data::CatalogSource;

use super::CommandError;

/// What the datasets contain.
#[derive(Debug)]
pub struct CheckReport {
    pub brands: usize,
    pub basic_products: usize,
    /// Row count and unique products, or why the list is unavailable.
    pub extended: Result<(usize, usize), String>,
    /// IDs repeated in the basic list.
    pub basic_duplicates: Vec<ProductId>,
    /// IDs repeated in the extended list.
    pub extended_duplicates: Vec<ProductId>,
    /// Products pointing at a brand that does not exist.
    pub unknown_brands: Vec<(ProductId, BrandId)>,
}

impl CheckReport {
    /// Number of problems that make the datasets unusable as-is.
    #[must_use]
    pub fn problems(&self) -> usize {
        self.basic_duplicates.len() + self.unknown_brands.len()
    }

    /// Whether the datasets passed validation.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.problems() == 0
    }

    /// Render the report for display.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("brands: {}", self.brands),
            format!("basic products: {}", self.basic_products),
        ];

        match &self.extended {
            Ok((rows, unique)) => lines.push(format!("extended products: {unique} ({rows} rows)")),
            Err(reason) => lines.push(format!("extended products: unavailable ({reason})")),
        }
        if !self.extended_duplicates.is_empty() {
            lines.push(format!(
                "warning: duplicate extended ids (first kept): {}",
                join(&self.extended_duplicates)
            ));
        }
        if !self.basic_duplicates.is_empty() {
            lines.push(format!(
                "error: duplicate basic ids: {}",
                join(&self.basic_duplicates)
            ));
        }
        for (product, brand) in &self.unknown_brands {
            lines.push(format!("error: product {product} has unknown brand {brand}"));
        }

        lines.push(if self.is_ok() { "ok" } else { "failed" }.to_string());
        lines
    }
}

/// Load every dataset from `source` and validate it.
///
/// # Errors
///
/// Returns `CommandError::Data` if brands or basic products cannot be loaded.
pub async fn check(source: &dyn CatalogSource) -> Result<CheckReport, CommandError> {
    let brands = source.brands().await?;
    let basic = source.basic_products().await?;
    let extended = source.extended_products().await;

    let known: HashSet<BrandId> = brands.iter().map(|b| b.id).collect();
    let mut unknown: Vec<_> = unknown_brands(&basic, &known).collect();

    let (extended, extended_duplicates) = match extended {
        Ok(products) => {
            let duplicates = duplicate_ids(&products);
            let rows = products.len();
            let unique = dedup_by_id(products);
            for entry in unknown_brands(&unique, &known) {
                if !unknown.contains(&entry) {
                    unknown.push(entry);
                }
            }
            (Ok((rows, unique.len())), duplicates)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Extended products not available");
            (Err(e.to_string()), Vec::new())
        }
    };

    Ok(CheckReport {
        brands: brands.len(),
        basic_products: basic.len(),
        extended,
        basic_duplicates: duplicate_ids(&basic),
        extended_duplicates,
        unknown_brands: unknown,
    })
}

fn unknown_brands<'a>(
    products: &'a [Product],
    known: &'a HashSet<BrandId>,
) -> impl Iterator<Item = (ProductId, BrandId)> + 'a {
    products.iter().filter_map(move |product| {
        product
            .brand
            .filter(|brand| !known.contains(brand))
            .map(|brand| (product.id, brand))
    })
}

fn join(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
