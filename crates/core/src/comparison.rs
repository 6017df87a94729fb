//! Product comparison: resolves 2 to 5 ids through the catalog and derives a
//! summary (cheapest, most expensive, best rated, price range, brands).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::{Catalog, ProductStore};
use crate::domain::product::{Product, ProductId};
use crate::errors::{
    CatalogError, ValidationError, MAX_COMPARISON_PRODUCTS, MIN_COMPARISON_PRODUCTS,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub message: String,
    pub products: Vec<Product>,
    pub comparison_summary: ComparisonSummary,
}

/// Derived per request, never persisted. `best_rated` is omitted when no
/// compared product carries a rating.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_products: String,
    pub cheapest_product: String,
    pub most_expensive_product: String,
    pub price_range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_rated: Option<String>,
    pub brands_compared: String,
}

impl ComparisonSummary {
    /// Builds the summary over a non-empty product list. Returns `None` for an
    /// empty list.
    pub fn from_products(products: &[Product]) -> Option<Self> {
        let first = products.first()?;

        let mut cheapest = first;
        let mut most_expensive = first;
        for product in &products[1..] {
            if product.price < cheapest.price {
                cheapest = product;
            }
            if product.price > most_expensive.price {
                most_expensive = product;
            }
        }

        let mut best_rated: Option<(&Product, f64)> = None;
        for product in products {
            let Some(rating) = product.rating else { continue };
            match best_rated {
                Some((_, best)) if rating <= best => {}
                _ => best_rated = Some((product, rating)),
            }
        }

        let mut brands: Vec<&str> = Vec::new();
        for product in products {
            if !brands.contains(&product.brand.as_str()) {
                brands.push(&product.brand);
            }
        }

        Some(Self {
            total_products: products.len().to_string(),
            cheapest_product: price_label(cheapest),
            most_expensive_product: price_label(most_expensive),
            price_range: format!(
                "{} - {}",
                dollars(cheapest.price),
                dollars(most_expensive.price)
            ),
            // Debug keeps the fractional part of whole ratings ("5.0/5").
            best_rated: best_rated
                .map(|(product, rating)| format!("{} - {rating:?}/5", product.name)),
            brands_compared: brands.join(", "),
        })
    }

    /// Flat key/value view with the fixed summary keys.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let mut map = BTreeMap::from([
            ("total_products", self.total_products.clone()),
            ("cheapest_product", self.cheapest_product.clone()),
            ("most_expensive_product", self.most_expensive_product.clone()),
            ("price_range", self.price_range.clone()),
            ("brands_compared", self.brands_compared.clone()),
        ]);
        if let Some(best_rated) = &self.best_rated {
            map.insert("best_rated", best_rated.clone());
        }
        map
    }
}

fn price_label(product: &Product) -> String {
    format!("{} - {}", product.name, dollars(product.price))
}

/// Shortest decimal form that keeps one fractional digit, the way ratings
/// render: `$999.99`, `$1000.0`.
fn dollars(price: Decimal) -> String {
    let price = price.normalize();
    if price.scale() == 0 {
        format!("${price}.0")
    } else {
        format!("${price}")
    }
}

pub struct ComparisonEngine<S: ?Sized> {
    catalog: Catalog<S>,
}

impl<S: ?Sized> Clone for ComparisonEngine<S> {
    fn clone(&self) -> Self {
        Self { catalog: self.catalog.clone() }
    }
}

impl<S: ProductStore + ?Sized> ComparisonEngine<S> {
    pub fn new(catalog: Catalog<S>) -> Self {
        Self { catalog }
    }

    /// Compares the requested products in input order.
    ///
    /// The id count is checked before any lookup. Every id is looked up so
    /// that a `NotFound` lists all unresolved ids, not just the first.
    pub async fn compare(&self, ids: &[ProductId]) -> Result<ComparisonResult, CatalogError> {
        let requested = ids.len();
        let count_error = if requested < MIN_COMPARISON_PRODUCTS {
            Some(ValidationError::TooFewProducts { requested })
        } else if requested > MAX_COMPARISON_PRODUCTS {
            Some(ValidationError::TooManyProducts { requested })
        } else {
            None
        };
        if let Some(error) = count_error {
            warn!(
                event_name = "catalog.comparison.rejected",
                requested,
                error = %error,
                "comparison request rejected"
            );
            return Err(error.into());
        }

        let mut found = Vec::with_capacity(requested);
        let mut missing = Vec::new();
        for id in ids {
            match self.catalog.fetch_by_id(id).await? {
                Some(product) => found.push(product),
                None => missing.push(id.clone()),
            }
        }

        if !missing.is_empty() {
            warn!(
                event_name = "catalog.comparison.missing_products",
                requested,
                missing = ?missing,
                "comparison references unknown products"
            );
            return Err(CatalogError::not_found(missing));
        }

        let comparison_summary = ComparisonSummary::from_products(&found)
            .ok_or(ValidationError::TooFewProducts { requested })?;

        info!(
            event_name = "catalog.comparison.completed",
            total_products = found.len(),
            "comparison completed"
        );

        Ok(ComparisonResult {
            message: format!("Comparison of {} products completed", found.len()),
            products: found,
            comparison_summary,
        })
    }
}
