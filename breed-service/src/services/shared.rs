//! Diseases the analysed breed shares with its closest matches.

use crate::services::store::BreedStore;
use crate::services::ServiceError;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Union, over `similar_names`, of the diseases each breed has in common with
/// `target_diseases`. Names that no longer resolve to a breed are skipped.
/// Returns disease names sorted and de-duplicated.
#[instrument(skip_all, fields(similar = similar_names.len()))]
pub async fn shared_diseases(
    store: &dyn BreedStore,
    target_diseases: &HashSet<Uuid>,
    similar_names: &[String],
) -> Result<Vec<String>, ServiceError> {
    if target_diseases.is_empty() || similar_names.is_empty() {
        return Ok(Vec::new());
    }

    let mut shared: HashSet<Uuid> = HashSet::new();
    for name in similar_names {
        let Some(breed) = store.find_breed(name).await? else {
            debug!(breed = %name, "Similar breed no longer exists, skipping");
            continue;
        };
        let diseases = store.disease_ids(breed.breed_id).await?;
        shared.extend(diseases.intersection(target_diseases).copied());
    }

    if shared.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = shared.into_iter().collect();
    let names: BTreeSet<String> = store.disease_names(&ids).await?.into_iter().collect();
    Ok(names.into_iter().collect())
}
