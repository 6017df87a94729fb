use std::collections::BTreeMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::Row;
use uuid::Uuid;

use catalog_core::catalog::ProductStore;
use catalog_core::domain::product::{NewProduct, Product, ProductId};
use catalog_core::errors::StorageError;

use super::RepositoryError;
use crate::DbPool;

const PRODUCT_COLUMNS: &str =
    "id, name, brand, category, price, image_url, description, rating, specs_json";

/// Product store backed by the `product` table. Ids are UUID v4 strings.
#[derive(Clone)]
pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> =
            sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM product ORDER BY rowid"))
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(row_to_product).collect::<Result<Vec<_>, _>>()
    }

    /// Ids that are not UUIDs cannot exist in this table and resolve to `None`.
    pub async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        if Uuid::parse_str(id.as_str()).is_err() {
            return Ok(None);
        }

        let row = sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = ?"))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_product(r)?)),
            None => Ok(None),
        }
    }

    pub async fn insert(&self, new_product: NewProduct) -> Result<Product, RepositoryError> {
        let product = Product::with_id(ProductId::new(Uuid::new_v4().to_string()), new_product);
        let specs_json = serde_json::to_string(&product.specs)
            .map_err(|e| RepositoryError::Decode(e.to_string()))?;

        sqlx::query(
            "INSERT INTO product (id, name, brand, category, price, image_url, description,
                                  rating, specs_json, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(product.id.as_str())
        .bind(&product.name)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(product.price.to_string())
        .bind(&product.image_url)
        .bind(&product.description)
        .bind(product.rating)
        .bind(&specs_json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM product").fetch_one(&self.pool).await?;
        Ok(count)
    }
}

fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let name: String = row.try_get("name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let brand: String =
        row.try_get("brand").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let category: String =
        row.try_get("category").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let price_str: String =
        row.try_get("price").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let image_url: Option<String> =
        row.try_get("image_url").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let description: Option<String> =
        row.try_get("description").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let rating: Option<f64> =
        row.try_get("rating").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let specs_json: String =
        row.try_get("specs_json").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let price = Decimal::from_str(&price_str).map_err(|e| {
        RepositoryError::Decode(format!("product {id} has unreadable price `{price_str}`: {e}"))
    })?;
    let specs: BTreeMap<String, String> = serde_json::from_str(&specs_json).map_err(|e| {
        RepositoryError::Decode(format!("product {id} has unreadable specs_json: {e}"))
    })?;

    Ok(Product {
        id: ProductId(id),
        name,
        brand,
        category,
        price,
        image_url,
        description,
        rating,
        specs,
    })
}

#[async_trait]
impl ProductStore for SqlProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, StorageError> {
        Ok(self.find_all().await?)
    }

    async fn fetch_by_id(&self, id: &ProductId) -> Result<Option<Product>, StorageError> {
        Ok(self.find_by_id(id).await?)
    }

    async fn create(&self, product: NewProduct) -> Result<Product, StorageError> {
        Ok(self.insert(product).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;

    use catalog_core::catalog::ProductStore;
    use catalog_core::domain::product::{NewProduct, ProductId};
    use catalog_core::errors::StorageError;

    use super::SqlProductRepository;
    use crate::{connect_with_settings, migrations::run_pending, DbPool};

    async fn migrated_pool() -> DbPool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");
        pool
    }

    fn pixel() -> NewProduct {
        NewProduct {
            name: "Google Pixel 8".to_string(),
            brand: "Google".to_string(),
            category: "Smartphones".to_string(),
            price: Decimal::new(89_999, 2),
            image_url: None,
            description: Some("Smartphone con IA avanzada".to_string()),
            rating: Some(4.4),
            specs: BTreeMap::from([
                ("processor".to_string(), "Tensor G3".to_string()),
                ("storage".to_string(), "128GB".to_string()),
            ]),
        }
    }

    #[tokio::test]
    async fn created_product_round_trips_with_specs() {
        let repo = SqlProductRepository::new(migrated_pool().await);

        let created = repo.create(pixel()).await.expect("create product");
        let found = repo.fetch_by_id(&created.id).await.expect("fetch product");

        assert_eq!(found, Some(created.clone()));
        assert_eq!(created.price, Decimal::new(89_999, 2));
        assert_eq!(created.specs.get("processor").map(String::as_str), Some("Tensor G3"));
    }

    #[tokio::test]
    async fn malformed_and_unknown_ids_resolve_to_none() {
        let repo = SqlProductRepository::new(migrated_pool().await);

        assert_eq!(repo.fetch_by_id(&ProductId::new("not-a-uuid")).await, Ok(None));
        assert_eq!(
            repo.fetch_by_id(&ProductId::new("6f1c1f36-4c69-4e53-9d55-6a3c8f0e0b11")).await,
            Ok(None)
        );
    }

    #[tokio::test]
    async fn list_all_keeps_insertion_order() {
        let repo = SqlProductRepository::new(migrated_pool().await);
        let mut names = Vec::new();
        for name in ["Zeta", "Alpha", "Mid"] {
            let product = repo
                .create(NewProduct { name: name.to_string(), ..pixel() })
                .await
                .expect("create product");
            names.push(product.name);
        }

        let listed = repo.list_all().await.expect("list products");

        assert_eq!(listed.iter().map(|p| p.name.clone()).collect::<Vec<_>>(), names);
        assert_eq!(repo.count().await.expect("count"), 3);
    }

    #[tokio::test]
    async fn unreadable_row_is_reported_as_malformed() {
        let pool = migrated_pool().await;
        sqlx::query(
            "INSERT INTO product (id, name, brand, category, price, specs_json, created_at)
             VALUES ('1b7f0d4e-2b0a-4f6e-8d7e-3f5b9d2c1a00', 'Broken', 'Acme', 'Misc',
                     'not-a-price', '{}', '2024-01-01T00:00:00Z')",
        )
        .execute(&pool)
        .await
        .expect("insert broken row");
        let repo = SqlProductRepository::new(pool);

        let result = repo.list_all().await;

        assert!(matches!(
            result,
            Err(StorageError::Malformed(message)) if message.contains("price")
        ));
    }

    #[tokio::test]
    async fn missing_table_surfaces_as_unavailable() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        let repo = SqlProductRepository::new(pool);

        let result = repo.list_all().await;

        assert!(matches!(result, Err(StorageError::Unavailable(_))));
    }
}
