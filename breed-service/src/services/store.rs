//! Data store contract used by registration and risk analysis.
//!
//! The PostgreSQL implementation lives in [`crate::services::database`]; an
//! in-memory implementation is provided for tests and local experiments.

use crate::models::{Breed, BreedDisease, Disease, Species};
use crate::services::ServiceError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Mutex;
use uuid::Uuid;

/// Queries the breed registry must answer. Insert operations return `None`
/// when a uniqueness constraint on the name is hit, so callers can re-fetch.
#[async_trait]
pub trait BreedStore: Send + Sync {
    /// Exact-name breed lookup.
    async fn find_breed(&self, name: &str) -> Result<Option<Breed>, ServiceError>;

    /// Names of every registered breed.
    async fn breed_names(&self) -> Result<Vec<String>, ServiceError>;

    /// Every breed except `breed_id`.
    async fn other_breeds(&self, breed_id: Uuid) -> Result<Vec<Breed>, ServiceError>;

    /// Diseases linked to a breed, in the order they were registered.
    async fn breed_diseases(&self, breed_id: Uuid) -> Result<Vec<BreedDisease>, ServiceError>;

    /// Ids of the diseases linked to a breed.
    async fn disease_ids(&self, breed_id: Uuid) -> Result<HashSet<Uuid>, ServiceError>;

    /// Names for a set of disease ids. Unknown ids are ignored.
    async fn disease_names(&self, disease_ids: &[Uuid]) -> Result<Vec<String>, ServiceError>;

    async fn insert_breed(
        &self,
        name: &str,
        species: Species,
    ) -> Result<Option<Breed>, ServiceError>;

    async fn find_disease(&self, name: &str) -> Result<Option<Disease>, ServiceError>;

    async fn insert_disease(&self, name: &str) -> Result<Option<Disease>, ServiceError>;

    async fn insert_link(
        &self,
        breed_id: Uuid,
        disease_id: Uuid,
        prevalence: f64,
        position: i32,
    ) -> Result<(), ServiceError>;
}

#[derive(Debug, Clone)]
struct Link {
    breed_id: Uuid,
    disease_id: Uuid,
    prevalence: f64,
    position: i32,
}

#[derive(Debug, Default)]
struct MemoryState {
    breeds: Vec<Breed>,
    diseases: Vec<Disease>,
    links: Vec<Link>,
}

/// In-memory store with the same uniqueness rules as the database schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row counts as (breeds, diseases, links).
    pub fn row_counts(&self) -> (usize, usize, usize) {
        let state = self.lock();
        (state.breeds.len(), state.diseases.len(), state.links.len())
    }

    /// Disease names in creation order.
    pub fn created_diseases(&self) -> Vec<String> {
        self.lock().diseases.iter().map(|d| d.name.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A panic while holding the lock cannot leave the Vecs half-written.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BreedStore for MemoryStore {
    async fn find_breed(&self, name: &str) -> Result<Option<Breed>, ServiceError> {
        Ok(self.lock().breeds.iter().find(|b| b.name == name).cloned())
    }

    async fn breed_names(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.lock().breeds.iter().map(|b| b.name.clone()).collect())
    }

    async fn other_breeds(&self, breed_id: Uuid) -> Result<Vec<Breed>, ServiceError> {
        Ok(self
            .lock()
            .breeds
            .iter()
            .filter(|b| b.breed_id != breed_id)
            .cloned()
            .collect())
    }

    async fn breed_diseases(&self, breed_id: Uuid) -> Result<Vec<BreedDisease>, ServiceError> {
        let state = self.lock();
        let mut links: Vec<&Link> = state
            .links
            .iter()
            .filter(|l| l.breed_id == breed_id)
            .collect();
        links.sort_by_key(|l| l.position);

        Ok(links
            .into_iter()
            .filter_map(|l| {
                state
                    .diseases
                    .iter()
                    .find(|d| d.disease_id == l.disease_id)
                    .map(|d| BreedDisease {
                        disease_id: d.disease_id,
                        name: d.name.clone(),
                        prevalence: l.prevalence,
                    })
            })
            .collect())
    }

    async fn disease_ids(&self, breed_id: Uuid) -> Result<HashSet<Uuid>, ServiceError> {
        Ok(self
            .lock()
            .links
            .iter()
            .filter(|l| l.breed_id == breed_id)
            .map(|l| l.disease_id)
            .collect())
    }

    async fn disease_names(&self, disease_ids: &[Uuid]) -> Result<Vec<String>, ServiceError> {
        Ok(self
            .lock()
            .diseases
            .iter()
            .filter(|d| disease_ids.contains(&d.disease_id))
            .map(|d| d.name.clone())
            .collect())
    }

    async fn insert_breed(
        &self,
        name: &str,
        species: Species,
    ) -> Result<Option<Breed>, ServiceError> {
        let mut state = self.lock();
        if state.breeds.iter().any(|b| b.name == name) {
            return Ok(None);
        }
        let breed = Breed {
            breed_id: Uuid::new_v4(),
            name: name.to_string(),
            species,
            created_utc: Utc::now(),
        };
        state.breeds.push(breed.clone());
        Ok(Some(breed))
    }

    async fn find_disease(&self, name: &str) -> Result<Option<Disease>, ServiceError> {
        Ok(self.lock().diseases.iter().find(|d| d.name == name).cloned())
    }

    async fn insert_disease(&self, name: &str) -> Result<Option<Disease>, ServiceError> {
        let mut state = self.lock();
        if state.diseases.iter().any(|d| d.name == name) {
            return Ok(None);
        }
        let disease = Disease {
            disease_id: Uuid::new_v4(),
            name: name.to_string(),
            created_utc: Utc::now(),
        };
        state.diseases.push(disease.clone());
        Ok(Some(disease))
    }

    async fn insert_link(
        &self,
        breed_id: Uuid,
        disease_id: Uuid,
        prevalence: f64,
        position: i32,
    ) -> Result<(), ServiceError> {
        let mut state = self.lock();
        if state
            .links
            .iter()
            .any(|l| l.breed_id == breed_id && l.disease_id == disease_id)
        {
            return Err(ServiceError::Internal(anyhow::anyhow!(
                "Link between breed {} and disease {} already exists",
                breed_id,
                disease_id
            )));
        }
        state.links.push(Link {
            breed_id,
            disease_id,
            prevalence,
            position,
        });
        Ok(())
    }
}
