//! Jaccard similarity between breeds' disease sets.

use crate::models::{Breed, Species};
use crate::services::store::BreedStore;
use crate::services::ServiceError;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::{debug, instrument};

/// How many similar breeds a risk analysis reports.
pub const TOP_SIMILAR: usize = 3;

/// A breed scored against the analysed breed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredBreed {
    pub name: String,
    pub species: Species,
    pub score: f64,
}

/// `|a ∩ b| / |a ∪ b|`, with two empty sets scoring 0.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Descending score, then ascending name.
pub fn rank_order(a: &ScoredBreed, b: &ScoredBreed) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.name.cmp(&b.name))
}

/// Score every other breed against `target` and keep the best `limit`.
#[instrument(skip(store, target, target_diseases), fields(target = %target.name))]
pub async fn top_similar_breeds(
    store: &dyn BreedStore,
    target: &Breed,
    target_diseases: &HashSet<uuid::Uuid>,
    limit: usize,
) -> Result<Vec<ScoredBreed>, ServiceError> {
    let candidates = store.other_breeds(target.breed_id).await?;

    let mut scored = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let diseases = store.disease_ids(candidate.breed_id).await?;
        scored.push(ScoredBreed {
            score: jaccard(target_diseases, &diseases),
            name: candidate.name,
            species: candidate.species,
        });
    }

    scored.sort_by(rank_order);
    scored.truncate(limit);

    debug!(kept = scored.len(), "Similarity ranking computed");
    Ok(scored)
}
