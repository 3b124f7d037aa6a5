//! Reset the breed tables and load the sample data set.

use breed_service::config::BreedConfig;
use breed_service::seed::sample_breeds;
use breed_service::services::{register_breed, Database};
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BreedConfig::from_env()?;
    init_tracing("breed-seed", &config.log_level, None);

    let db = Database::new(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    db.run_migrations().await?;
    db.reset().await?;

    let store = db.begin().await?;
    let breeds = sample_breeds();
    let count = breeds.len();
    for breed in breeds {
        register_breed(&store, breed).await?;
    }
    store.commit().await?;

    tracing::info!(breeds = count, "Sample data loaded");
    Ok(())
}
