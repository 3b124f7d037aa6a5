//! Services module for breed-service.

pub mod care_plan;
pub mod database;
pub mod error;
pub mod metrics;
pub mod providers;
pub mod registry;
pub mod risk_analysis;
pub mod scoring;
pub mod shared;
pub mod similarity;
pub mod store;
pub mod suggest;

pub use care_plan::CarePlanGenerator;
pub use database::{Database, PgStore};
pub use error::ServiceError;
pub use metrics::{
    get_metrics, init_metrics, record_breed_registered, record_care_plan, record_error,
    record_risk_analysis,
};
pub use registry::register_breed;
pub use risk_analysis::{assess_risk, run_risk_analysis};
pub use store::{BreedStore, MemoryStore};
