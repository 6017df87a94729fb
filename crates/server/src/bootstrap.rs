use std::sync::Arc;

use catalog_core::catalog::{Catalog, ProductStore};
use catalog_core::config::{AppConfig, ConfigError};
use catalog_core::errors::StorageError;
use catalog_db::{connect_with_config, migrations, DbPool, SampleCatalog, SqlProductRepository};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub catalog: Catalog<dyn ProductStore>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error("sample catalog seeding failed: {0}")]
    Seed(#[source] StorageError),
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );
    config.validate()?;

    let db_pool =
        connect_with_config(&config.database).await.map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let store: Arc<dyn ProductStore> = Arc::new(SqlProductRepository::new(db_pool.clone()));
    let catalog = Catalog::new(store);

    if config.catalog.seed_sample_data {
        let seeded = SampleCatalog::seed_if_empty(&catalog).await.map_err(BootstrapError::Seed)?;
        info!(
            event_name = "system.bootstrap.sample_catalog",
            correlation_id = "bootstrap",
            inserted = seeded.inserted.len(),
            existing_products = seeded.existing_products,
            "sample catalog seeding evaluated"
        );
    }

    Ok(Application { config, db_pool, catalog })
}
