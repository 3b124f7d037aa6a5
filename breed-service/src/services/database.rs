//! Database service for breed-service.

use crate::models::{Breed, BreedDisease, Disease, Species};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::store::BreedStore;
use crate::services::ServiceError;
use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "breed-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;

        timer.observe_duration();
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Remove every breed, disease and link.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), AppError> {
        sqlx::query("TRUNCATE breed_disease_links, breeds, diseases")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Reset failed: {}", e)))?;
        info!("Breed tables truncated");
        Ok(())
    }

    /// Open a request scope. Everything done through the returned store runs in
    /// one transaction; it is committed by [`PgStore::commit`] and rolled back
    /// when dropped without committing.
    pub async fn begin(&self) -> Result<PgStore, ServiceError> {
        let tx = self.pool.begin().await?;
        Ok(PgStore { tx: Mutex::new(tx) })
    }
}

/// Transaction-scoped implementation of [`BreedStore`].
pub struct PgStore {
    tx: Mutex<Transaction<'static, Postgres>>,
}

impl PgStore {
    pub async fn commit(self) -> Result<(), ServiceError> {
        self.tx.into_inner().commit().await?;
        Ok(())
    }
}

#[async_trait]
impl BreedStore for PgStore {
    #[instrument(skip(self))]
    async fn find_breed(&self, name: &str) -> Result<Option<Breed>, ServiceError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_breed"])
            .start_timer();
        let mut tx = self.tx.lock().await;

        let breed = sqlx::query_as::<_, Breed>(
            r#"
            SELECT breed_id, name, species, created_utc
            FROM breeds
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;

        timer.observe_duration();
        Ok(breed)
    }

    #[instrument(skip(self))]
    async fn breed_names(&self) -> Result<Vec<String>, ServiceError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["breed_names"])
            .start_timer();
        let mut tx = self.tx.lock().await;

        let names = sqlx::query_scalar::<_, String>("SELECT name FROM breeds ORDER BY name")
            .fetch_all(&mut **tx)
            .await?;

        timer.observe_duration();
        Ok(names)
    }

    #[instrument(skip(self), fields(breed_id = %breed_id))]
    async fn other_breeds(&self, breed_id: Uuid) -> Result<Vec<Breed>, ServiceError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["other_breeds"])
            .start_timer();
        let mut tx = self.tx.lock().await;

        let breeds = sqlx::query_as::<_, Breed>(
            r#"
            SELECT breed_id, name, species, created_utc
            FROM breeds
            WHERE breed_id <> $1
            ORDER BY name
            "#,
        )
        .bind(breed_id)
        .fetch_all(&mut **tx)
        .await?;

        timer.observe_duration();
        Ok(breeds)
    }

    #[instrument(skip(self), fields(breed_id = %breed_id))]
    async fn breed_diseases(&self, breed_id: Uuid) -> Result<Vec<BreedDisease>, ServiceError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["breed_diseases"])
            .start_timer();
        let mut tx = self.tx.lock().await;

        let diseases = sqlx::query_as::<_, BreedDisease>(
            r#"
            SELECT d.disease_id, d.name, l.prevalence
            FROM breed_disease_links l
            JOIN diseases d ON d.disease_id = l.disease_id
            WHERE l.breed_id = $1
            ORDER BY l.position
            "#,
        )
        .bind(breed_id)
        .fetch_all(&mut **tx)
        .await?;

        timer.observe_duration();
        Ok(diseases)
    }

    #[instrument(skip(self), fields(breed_id = %breed_id))]
    async fn disease_ids(&self, breed_id: Uuid) -> Result<HashSet<Uuid>, ServiceError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["disease_ids"])
            .start_timer();
        let mut tx = self.tx.lock().await;

        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT disease_id FROM breed_disease_links WHERE breed_id = $1",
        )
        .bind(breed_id)
        .fetch_all(&mut **tx)
        .await?;

        timer.observe_duration();
        Ok(ids.into_iter().collect())
    }

    #[instrument(skip(self, disease_ids), fields(count = disease_ids.len()))]
    async fn disease_names(&self, disease_ids: &[Uuid]) -> Result<Vec<String>, ServiceError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["disease_names"])
            .start_timer();
        let mut tx = self.tx.lock().await;

        let names = sqlx::query_scalar::<_, String>(
            "SELECT name FROM diseases WHERE disease_id = ANY($1)",
        )
        .bind(disease_ids)
        .fetch_all(&mut **tx)
        .await?;

        timer.observe_duration();
        Ok(names)
    }

    #[instrument(skip(self))]
    async fn insert_breed(
        &self,
        name: &str,
        species: Species,
    ) -> Result<Option<Breed>, ServiceError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert_breed"])
            .start_timer();
        let mut tx = self.tx.lock().await;

        let breed = sqlx::query_as::<_, Breed>(
            r#"
            INSERT INTO breeds (breed_id, name, species)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            RETURNING breed_id, name, species, created_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(species.as_str())
        .fetch_optional(&mut **tx)
        .await?;

        timer.observe_duration();

        if let Some(breed) = &breed {
            info!(breed_id = %breed.breed_id, species = %breed.species, "Breed created");
        }
        Ok(breed)
    }

    #[instrument(skip(self))]
    async fn find_disease(&self, name: &str) -> Result<Option<Disease>, ServiceError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_disease"])
            .start_timer();
        let mut tx = self.tx.lock().await;

        let disease = sqlx::query_as::<_, Disease>(
            "SELECT disease_id, name, created_utc FROM diseases WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;

        timer.observe_duration();
        Ok(disease)
    }

    #[instrument(skip(self))]
    async fn insert_disease(&self, name: &str) -> Result<Option<Disease>, ServiceError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert_disease"])
            .start_timer();
        let mut tx = self.tx.lock().await;

        // ON CONFLICT keeps the transaction usable when another writer won the race.
        let disease = sqlx::query_as::<_, Disease>(
            r#"
            INSERT INTO diseases (disease_id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            RETURNING disease_id, name, created_utc
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_optional(&mut **tx)
        .await?;

        timer.observe_duration();

        if let Some(disease) = &disease {
            info!(disease_id = %disease.disease_id, "Disease created");
        }
        Ok(disease)
    }

    #[instrument(skip(self), fields(breed_id = %breed_id, disease_id = %disease_id))]
    async fn insert_link(
        &self,
        breed_id: Uuid,
        disease_id: Uuid,
        prevalence: f64,
        position: i32,
    ) -> Result<(), ServiceError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert_link"])
            .start_timer();
        let mut tx = self.tx.lock().await;

        sqlx::query(
            r#"
            INSERT INTO breed_disease_links (breed_id, disease_id, prevalence, position)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(breed_id)
        .bind(disease_id)
        .bind(prevalence)
        .bind(position)
        .execute(&mut **tx)
        .await?;

        timer.observe_duration();
        Ok(())
    }
}
