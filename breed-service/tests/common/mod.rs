//! Common test utilities for breed-service integration tests.

#![allow(dead_code)]

use breed_service::config::{BreedConfig, CarePlanConfig, DatabaseConfig};
use breed_service::seed::sample_breeds;
use breed_service::services::Database;
use breed_service::startup::Application;
use reqwest::Client;
use serde_json::Value;
use service_core::config::Config as CommonConfig;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,breed_service=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub struct TestApp {
    pub address: String,
    pub client: Client,
}

impl TestApp {
    pub async fn post_breed(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}/breeds", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn risk_analysis(&self, breed_name: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/breeds/risk_analysis", self.address))
            .query(&[("breed_name", breed_name)])
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Spawn the application on a random port against an empty database.
/// Care plans always use the fallback text.
pub async fn spawn_app() -> TestApp {
    init_tracing();

    let database_url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set to run integration tests");

    let config = BreedConfig {
        common: CommonConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        },
        service_name: "breed-service-test".to_string(),
        service_version: "test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        database: DatabaseConfig {
            url: database_url,
            max_connections: 2,
            min_connections: 1,
        },
        care_plan: CarePlanConfig::default(),
    };

    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    app.db().reset().await.expect("Failed to reset tables");

    let address = format!("http://127.0.0.1:{}", app.http_port());

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    TestApp {
        address,
        client: Client::new(),
    }
}

/// Spawn the application and load the sample breeds through the API.
pub async fn spawn_seeded_app() -> TestApp {
    let app = spawn_app().await;
    for breed in sample_breeds() {
        let body = serde_json::json!({
            "name": breed.name,
            "species": breed.species,
            "diseases": breed
                .diseases
                .iter()
                .map(|d| serde_json::json!({
                    "disease_name": d.disease_name,
                    "prevalence": d.prevalence
                }))
                .collect::<Vec<_>>(),
        });
        let response = app.post_breed(&body).await;
        assert_eq!(response.status().as_u16(), 201, "seeding {}", breed.name);
    }
    app
}

/// Open a separate pool on the test database for driving the service layer directly.
pub async fn test_database() -> Database {
    let database_url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    Database::new(&database_url, 4, 1)
        .await
        .expect("Failed to connect to test database")
}

/// Count rows in each breed table as (breeds, diseases, links).
pub async fn row_counts() -> (i64, i64, i64) {
    let database_url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    let pool = sqlx::PgPool::connect(&database_url)
        .await
        .expect("Failed to connect");

    let count = |table: &'static str| {
        let pool = pool.clone();
        async move {
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&pool)
                .await
                .expect("Failed to count rows")
        }
    };

    (
        count("breeds").await,
        count("diseases").await,
        count("breed_disease_links").await,
    )
}
