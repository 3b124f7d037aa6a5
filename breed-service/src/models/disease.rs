//! Disease model and breed-disease link views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Disease, created lazily the first time a breed references it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Disease {
    pub disease_id: Uuid,
    pub name: String,
    pub created_utc: DateTime<Utc>,
}

/// A disease as linked to a specific breed.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct BreedDisease {
    pub disease_id: Uuid,
    pub name: String,
    pub prevalence: f64,
}
