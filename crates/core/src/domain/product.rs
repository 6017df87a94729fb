use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Snapshot of a catalog entry as returned by storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub specs: BTreeMap<String, String>,
}

impl Product {
    /// Checks the invariants every product handed out by the catalog must hold.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.0.trim().is_empty() {
            return Err("product id must not be empty".to_string());
        }
        for (field, value) in
            [("name", &self.name), ("brand", &self.brand), ("category", &self.category)]
        {
            if value.trim().is_empty() {
                return Err(format!("product {} has an empty {field}", self.id));
            }
        }
        if self.price <= Decimal::ZERO {
            return Err(format!("product {} has a non-positive price {}", self.id, self.price));
        }
        if let Some(rating) = self.rating {
            if !rating_in_range(rating) {
                return Err(format!("product {} has a rating {rating} outside 0..=5", self.id));
            }
        }
        Ok(())
    }

    pub fn with_id(id: ProductId, new_product: NewProduct) -> Self {
        Self {
            id,
            name: new_product.name,
            brand: new_product.brand,
            category: new_product.category,
            price: new_product.price,
            image_url: new_product.image_url,
            description: new_product.description,
            rating: new_product.rating,
            specs: new_product.specs,
        }
    }
}

/// Raw creation input. Every field is optional so that absence is reported by
/// the creation validator rather than by the deserializer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: Option<String>,
    pub brand: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub specs: Option<BTreeMap<String, String>>,
}

/// Validated creation payload handed to storage.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub specs: BTreeMap<String, String>,
}

pub fn rating_in_range(rating: f64) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}
