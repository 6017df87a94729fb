use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::catalog::ProductStore;
use crate::domain::product::{NewProduct, Product, ProductId};
use crate::errors::StorageError;

pub(crate) fn product(
    id: &str,
    name: &str,
    brand: &str,
    price_cents: i64,
    rating: Option<f64>,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        brand: brand.to_string(),
        category: "Smartphones".to_string(),
        price: Decimal::new(price_cents, 2),
        image_url: None,
        description: None,
        rating,
        specs: BTreeMap::new(),
    }
}

/// Store double that records every id lookup.
#[derive(Default)]
pub(crate) struct RecordingStore {
    products: Mutex<Vec<Product>>,
    lookups: Mutex<Vec<ProductId>>,
    failure: Option<StorageError>,
}

impl RecordingStore {
    pub(crate) fn with_products(products: Vec<Product>) -> Self {
        Self { products: Mutex::new(products), ..Self::default() }
    }

    pub(crate) fn failing(error: StorageError) -> Self {
        Self { failure: Some(error), ..Self::default() }
    }

    pub(crate) fn lookups(&self) -> Vec<ProductId> {
        self.lookups.lock().expect("lookups lock").clone()
    }

    pub(crate) fn list_snapshot(&self) -> Vec<Product> {
        self.products.lock().expect("products lock").clone()
    }

    fn check(&self) -> Result<(), StorageError> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductStore for RecordingStore {
    async fn list_all(&self) -> Result<Vec<Product>, StorageError> {
        self.check()?;
        Ok(self.list_snapshot())
    }

    async fn fetch_by_id(&self, id: &ProductId) -> Result<Option<Product>, StorageError> {
        self.lookups.lock().expect("lookups lock").push(id.clone());
        self.check()?;
        let products = self.products.lock().expect("products lock");
        Ok(products.iter().find(|product| &product.id == id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<Product, StorageError> {
        self.check()?;
        let mut products = self.products.lock().expect("products lock");
        let id = ProductId::new(format!("generated-{}", products.len() + 1));
        let stored = Product::with_id(id, product);
        products.push(stored.clone());
        Ok(stored)
    }
}
