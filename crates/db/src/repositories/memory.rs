use tokio::sync::RwLock;
use uuid::Uuid;

use catalog_core::catalog::ProductStore;
use catalog_core::domain::product::{NewProduct, Product, ProductId};
use catalog_core::errors::StorageError;

/// Process-local product store. Keeps insertion order and assigns UUID v4 ids.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(products) }
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ProductStore for InMemoryProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, StorageError> {
        let products = self.products.read().await;
        Ok(products.clone())
    }

    async fn fetch_by_id(&self, id: &ProductId) -> Result<Option<Product>, StorageError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|product| &product.id == id).cloned())
    }

    async fn create(&self, product: NewProduct) -> Result<Product, StorageError> {
        let product = Product::with_id(ProductId::new(Uuid::new_v4().to_string()), product);
        let mut products = self.products.write().await;
        products.push(product.clone());
        Ok(product)
    }
}
