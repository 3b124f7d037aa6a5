//! Cross-species penalty and final ranking.

use crate::models::{SimilarBreed, Species};
use crate::services::similarity::{rank_order, ScoredBreed, TOP_SIMILAR};

/// Deducted from the raw score when the candidate is a different species.
pub const SPECIES_PENALTY: f64 = 0.10;

/// Round to 4 decimal places, half away from zero.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Penalise cross-species candidates, round, re-rank and keep the top entries.
pub fn apply_species_penalty(target: Species, candidates: Vec<ScoredBreed>) -> Vec<SimilarBreed> {
    let mut adjusted: Vec<ScoredBreed> = candidates
        .into_iter()
        .map(|mut candidate| {
            if candidate.species != target {
                candidate.score = (candidate.score - SPECIES_PENALTY).max(0.0);
            }
            candidate.score = round4(candidate.score);
            candidate
        })
        .collect();

    adjusted.sort_by(rank_order);
    adjusted.truncate(TOP_SIMILAR);

    adjusted
        .into_iter()
        .map(|c| SimilarBreed {
            name: c.name,
            species: c.species,
            similarity: c.score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(name: &str, species: Species, score: f64) -> ScoredBreed {
        ScoredBreed {
            name: name.to_string(),
            species,
            score,
        }
    }

    #[test]
    fn same_species_is_not_penalised() {
        let out = apply_species_penalty(Species::Dog, vec![scored("Y", Species::Dog, 0.5)]);
        assert_eq!(out[0].similarity, 0.5);
    }

    #[test]
    fn cross_species_loses_a_tenth() {
        let out = apply_species_penalty(Species::Dog, vec![scored("Z", Species::Cat, 0.5)]);
        assert_eq!(out[0].similarity, 0.4);
    }

    #[test]
    fn penalty_clamps_at_zero() {
        let out = apply_species_penalty(Species::Cat, vec![scored("B", Species::Dog, 0.05)]);
        assert_eq!(out[0].similarity, 0.0);
    }

    #[test]
    fn scores_are_rounded_to_four_places() {
        let out = apply_species_penalty(
            Species::Dog,
            vec![
                scored("A", Species::Dog, 1.0 / 3.0),
                scored("B", Species::Cat, 1.0 / 3.0),
            ],
        );
        assert_eq!(out[0].similarity, 0.3333);
        assert_eq!(out[1].similarity, 0.2333);
    }

    #[test]
    fn penalty_reorders_candidates() {
        let out = apply_species_penalty(
            Species::Dog,
            vec![
                scored("Cat", Species::Cat, 0.55),
                scored("Dog", Species::Dog, 0.5),
            ],
        );
        let names: Vec<&str> = out.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Dog", "Cat"]);
    }

    #[test]
    fn equal_adjusted_scores_sort_by_name() {
        let out = apply_species_penalty(
            Species::Dog,
            vec![
                scored("Maine Coon", Species::Cat, 0.6),
                scored("Beagle", Species::Dog, 0.5),
            ],
        );
        let names: Vec<&str> = out.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Beagle", "Maine Coon"]);
    }

    #[test]
    fn output_is_capped_and_bounded() {
        let out = apply_species_penalty(
            Species::Cat,
            vec![
                scored("A", Species::Cat, 1.0),
                scored("B", Species::Dog, 1.0),
                scored("C", Species::Cat, 0.0),
                scored("D", Species::Dog, 0.0),
            ],
        );
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|b| (0.0..=1.0).contains(&b.similarity)));
    }

    #[test]
    fn no_candidates_yields_empty_ranking() {
        assert!(apply_species_penalty(Species::Dog, Vec::new()).is_empty());
    }
}
