//! Breed registration.

use crate::models::{BreedDisease, BreedWithDiseases, Disease, NewBreed, Species};
use crate::services::metrics::record_breed_registered;
use crate::services::store::BreedStore;
use crate::services::ServiceError;
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument, warn};

const DISEASE_CREATE_ATTEMPTS: usize = 3;

/// Validate and store a breed with its disease links.
///
/// Every check runs before the first write, so a rejected request leaves the
/// store untouched. Callers own the transaction and decide whether to commit.
#[instrument(skip(store, new_breed), fields(breed = %new_breed.name, species = %new_breed.species))]
pub async fn register_breed(
    store: &dyn BreedStore,
    new_breed: NewBreed,
) -> Result<BreedWithDiseases, ServiceError> {
    let species: Species = new_breed
        .species
        .parse()
        .map_err(|_| ServiceError::InvalidSpecies(new_breed.species.clone()))?;

    let mut seen = HashSet::new();
    for disease in &new_breed.diseases {
        if !(0.0..=1.0).contains(&disease.prevalence) {
            return Err(ServiceError::InvalidPrevalence {
                disease_name: disease.disease_name.clone(),
                prevalence: disease.prevalence,
            });
        }
        if !seen.insert(disease.disease_name.as_str()) {
            return Err(ServiceError::DuplicateDisease(disease.disease_name.clone()));
        }
    }

    if store.find_breed(&new_breed.name).await?.is_some() {
        return Err(ServiceError::DuplicateBreed(new_breed.name));
    }

    let breed = store
        .insert_breed(&new_breed.name, species)
        .await?
        .ok_or_else(|| ServiceError::DuplicateBreed(new_breed.name.clone()))?;

    // Concurrent writers take disease-name locks in the same order.
    let mut names: Vec<&str> = new_breed
        .diseases
        .iter()
        .map(|d| d.disease_name.as_str())
        .collect();
    names.sort_unstable();
    let mut resolved = HashMap::with_capacity(names.len());
    for name in names {
        let disease = get_or_create_disease(store, name).await?;
        resolved.insert(name.to_string(), disease);
    }

    let mut diseases = Vec::with_capacity(new_breed.diseases.len());
    for (position, entry) in new_breed.diseases.into_iter().enumerate() {
        let disease = resolved.remove(&entry.disease_name).ok_or_else(|| {
            ServiceError::Internal(anyhow::anyhow!(
                "Disease '{}' was not resolved",
                entry.disease_name
            ))
        })?;
        store
            .insert_link(
                breed.breed_id,
                disease.disease_id,
                entry.prevalence,
                position as i32,
            )
            .await?;
        diseases.push(BreedDisease {
            disease_id: disease.disease_id,
            name: disease.name,
            prevalence: entry.prevalence,
        });
    }

    record_breed_registered(species.as_str());
    info!(breed_id = %breed.breed_id, diseases = diseases.len(), "Breed registered");

    Ok(BreedWithDiseases { breed, diseases })
}

/// Find a disease by name, creating it when missing. A lost creation race
/// is resolved by reading the row the other writer created.
#[instrument(skip(store))]
pub async fn get_or_create_disease(
    store: &dyn BreedStore,
    name: &str,
) -> Result<Disease, ServiceError> {
    for attempt in 1..=DISEASE_CREATE_ATTEMPTS {
        if let Some(disease) = store.find_disease(name).await? {
            return Ok(disease);
        }
        if let Some(disease) = store.insert_disease(name).await? {
            return Ok(disease);
        }
        warn!(attempt, "Disease insert conflicted, re-fetching");
    }

    Err(ServiceError::Internal(anyhow::anyhow!(
        "Disease '{}' could not be created or found after {} attempts",
        name,
        DISEASE_CREATE_ATTEMPTS
    )))
}
