use std::sync::Arc;

use catalog_core::catalog::{Catalog, ProductStore};
use catalog_core::comparison::ComparisonEngine;
use catalog_core::domain::product::{ProductFields, ProductId};
use catalog_core::errors::{CatalogError, ValidationError};
use catalog_db::{connect_with_settings, migrations, SampleCatalog, SqlProductRepository};
use rust_decimal::Decimal;

async fn seeded_catalog() -> Catalog<dyn ProductStore> {
    let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
    migrations::run_pending(&pool).await.expect("run migrations");
    let store: Arc<dyn ProductStore> = Arc::new(SqlProductRepository::new(pool));
    let catalog = Catalog::new(store);
    SampleCatalog::seed_if_empty(&catalog).await.expect("seed sample catalog");
    catalog
}

async fn id_of(catalog: &Catalog<dyn ProductStore>, name: &str) -> ProductId {
    catalog
        .list_products()
        .await
        .expect("list products")
        .into_iter()
        .find(|product| product.name == name)
        .map(|product| product.id)
        .expect("sample product present")
}

#[tokio::test]
async fn compare_seeded_phones_against_sql_store() {
    let catalog = seeded_catalog().await;
    let galaxy = id_of(&catalog, "Samsung Galaxy S23").await;
    let iphone = id_of(&catalog, "iPhone 15").await;
    let engine = ComparisonEngine::new(catalog.clone());

    let result = engine.compare(&[galaxy.clone(), iphone.clone()]).await.expect("compare");

    assert_eq!(result.message, "Comparison of 2 products completed");
    assert_eq!(result.products[0].id, galaxy);
    assert_eq!(result.products[1].id, iphone);
    let summary = result.comparison_summary;
    assert_eq!(summary.cheapest_product, "Samsung Galaxy S23 - $999.99");
    assert_eq!(summary.most_expensive_product, "iPhone 15 - $1199.99");
    assert_eq!(summary.best_rated.as_deref(), Some("iPhone 15 - 4.7/5"));
    assert_eq!(summary.price_range, "$999.99 - $1199.99");
    assert!(summary.brands_compared.contains("Samsung"));
    assert!(summary.brands_compared.contains("Apple"));
}

#[tokio::test]
async fn compare_reports_unknown_and_malformed_ids_as_missing() {
    let catalog = seeded_catalog().await;
    let pixel = id_of(&catalog, "Google Pixel 8").await;
    let unknown = ProductId::new("0d5a1f2e-8a35-4c3b-9a0c-1f2e3d4c5b6a");
    let malformed = ProductId::new("507f1f77bcf86cd799439011");
    let engine = ComparisonEngine::new(catalog);

    let result = engine.compare(&[pixel, unknown.clone(), malformed.clone()]).await;

    assert_eq!(result, Err(CatalogError::not_found(vec![unknown, malformed])));
}

#[tokio::test]
async fn category_listing_and_creation_go_through_sql_store() {
    let catalog = seeded_catalog().await;

    let laptops = catalog.products_by_category("laptops").await.expect("filter laptops");
    let names = laptops.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["MacBook Air M2", "Dell XPS 13"]);

    let created = catalog
        .create_product(ProductFields {
            name: Some("Nuevo Producto".to_string()),
            brand: Some("MiBrand".to_string()),
            price: Some(Decimal::new(29_999, 2)),
            category: Some("Laptops".to_string()),
            ..ProductFields::default()
        })
        .await
        .expect("create product");

    let fetched = catalog.get_product(created.id.as_str()).await.expect("get product");
    assert_eq!(fetched, Some(created));
    assert_eq!(catalog.products_by_category("Laptops").await.expect("filter").len(), 3);
}

#[tokio::test]
async fn invalid_creation_leaves_store_untouched() {
    let catalog = seeded_catalog().await;

    let result = catalog
        .create_product(ProductFields {
            name: Some("Test Product".to_string()),
            brand: Some("MiBrand".to_string()),
            category: Some("Electronics".to_string()),
            ..ProductFields::default()
        })
        .await;

    assert_eq!(result, Err(CatalogError::Validation(ValidationError::InvalidPrice)));
    assert_eq!(catalog.list_products().await.expect("list").len(), 5);
}
