use std::sync::Arc;

use catalog_core::catalog::Catalog;
use catalog_db::{connect_with_config, migrations, SampleCatalog, SqlProductRepository};

use crate::commands::{
    load_config, runtime, CommandResult, StepFailure, EXIT_DB_CONNECTIVITY, EXIT_MIGRATION,
    EXIT_SEED,
};

pub fn run() -> CommandResult {
    let config = match load_config("seed") {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match runtime("seed") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let result = runtime.block_on(async {
        let pool = connect_with_config(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), EXIT_DB_CONNECTIVITY))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), EXIT_MIGRATION))?;

        let catalog = Catalog::new(Arc::new(SqlProductRepository::new(pool.clone())));
        let seeded = SampleCatalog::seed_if_empty(&catalog)
            .await
            .map_err(|error| ("seed", error.to_string(), EXIT_SEED))?;
        if !seeded.seeded() {
            pool.close().await;
            return Ok(format!(
                "catalog already holds {} products; sample data not seeded",
                seeded.existing_products
            ));
        }

        let verification = SampleCatalog::verify(&catalog)
            .await
            .map_err(|error| ("seed_verification", error.to_string(), EXIT_SEED))?;
        pool.close().await;

        if !verification.all_present {
            let missing = verification
                .checks
                .iter()
                .filter(|(_, present)| !present)
                .map(|(name, _)| *name)
                .collect::<Vec<_>>();
            return Err((
                "seed_verification",
                format!("sample products missing after seed: {}", missing.join(", ")),
                EXIT_SEED,
            ));
        }

        let names =
            seeded.inserted.iter().map(|product| product.name.as_str()).collect::<Vec<_>>();
        let message = format!("seeded {} sample products: {}", names.len(), names.join(", "));
        Ok::<String, StepFailure>(message)
    });

    match result {
        Ok(message) => CommandResult::success("seed", message),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("seed", error_class, message, exit_code)
        }
    }
}
