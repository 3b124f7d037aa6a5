//! Prometheus metrics for breed-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "breed_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// Breeds registered, by species.
pub static BREEDS_REGISTERED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "breed_registrations_total",
        "Total number of breeds registered",
        &["species"]
    )
    .expect("Failed to register breed_registrations_total")
});

/// Risk analyses by outcome (ok, not_found, db_error, ...).
pub static RISK_ANALYSES: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "breed_risk_analyses_total",
        "Total number of risk analyses",
        &["outcome"]
    )
    .expect("Failed to register breed_risk_analyses_total")
});

/// Care plans by source: provider or fallback.
pub static CARE_PLANS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "breed_care_plans_total",
        "Total number of care plans generated",
        &["source"]
    )
    .expect("Failed to register breed_care_plans_total")
});

/// Error counter for alerting.
pub static ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "breed_errors_total",
        "Total number of errors by type",
        &["error_type"]
    )
    .expect("Failed to register errors_total")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&BREEDS_REGISTERED);
    Lazy::force(&RISK_ANALYSES);
    Lazy::force(&CARE_PLANS);
    Lazy::force(&ERRORS_TOTAL);
}

pub fn record_breed_registered(species: &str) {
    BREEDS_REGISTERED.with_label_values(&[species]).inc();
}

pub fn record_risk_analysis(outcome: &str) {
    RISK_ANALYSES.with_label_values(&[outcome]).inc();
}

pub fn record_care_plan(source: &str) {
    CARE_PLANS.with_label_values(&[source]).inc();
}

pub fn record_error(error_type: &str) {
    ERRORS_TOTAL.with_label_values(&[error_type]).inc();
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
