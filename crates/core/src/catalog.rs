//! Catalog accessor: thin pass-through over the product store.
//!
//! Storage hands back [`Product`] records; the accessor re-checks the product
//! invariants so nothing malformed leaks past this boundary. The API-facing
//! operations (`list_products`, `get_product`, `products_by_category`,
//! `create_product`) sit on top of the three storage primitives.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::product::{NewProduct, Product, ProductFields, ProductId};
use crate::errors::{CatalogError, StorageError, ValidationError};
use crate::validation::validate_new_product;

/// Storage collaborator for products.
///
/// `fetch_by_id` returns `Ok(None)` both when no record matches and when the
/// id is not well-formed for the store; `Err` is reserved for IO failures.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Product>, StorageError>;
    async fn fetch_by_id(&self, id: &ProductId) -> Result<Option<Product>, StorageError>;
    async fn create(&self, product: NewProduct) -> Result<Product, StorageError>;
}

pub struct Catalog<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for Catalog<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<S: ProductStore + ?Sized> Catalog<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All products in the store's native order.
    pub async fn list_all(&self) -> Result<Vec<Product>, StorageError> {
        let products = self.store.list_all().await?;
        for product in &products {
            ensure_valid(product)?;
        }
        Ok(products)
    }

    pub async fn fetch_by_id(&self, id: &ProductId) -> Result<Option<Product>, StorageError> {
        let product = self.store.fetch_by_id(id).await?;
        if let Some(product) = &product {
            ensure_valid(product)?;
        }
        Ok(product)
    }

    /// Persists an already validated product and returns it with its new id.
    pub async fn create(&self, new_product: NewProduct) -> Result<Product, StorageError> {
        let product = self.store.create(new_product).await?;
        ensure_valid(&product)?;
        Ok(product)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.list_all().await?)
    }

    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, CatalogError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::EmptyProductId.into());
        }
        Ok(self.fetch_by_id(&ProductId::new(id)).await?)
    }

    /// Products whose category matches case-insensitively, in store order.
    pub async fn products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        let wanted = category.trim().to_lowercase();
        let products = self.list_all().await?;
        Ok(products
            .into_iter()
            .filter(|product| product.category.to_lowercase() == wanted)
            .collect())
    }

    pub async fn create_product(&self, fields: ProductFields) -> Result<Product, CatalogError> {
        let new_product = validate_new_product(fields)?;
        let product = self.create(new_product).await?;

        info!(
            event_name = "catalog.product.created",
            product_id = %product.id,
            brand = %product.brand,
            category = %product.category,
            "product created"
        );

        Ok(product)
    }
}

fn ensure_valid(product: &Product) -> Result<(), StorageError> {
    product.validate().map_err(StorageError::Malformed)
}
