//! Risk analysis results.

use serde::Serialize;

use super::breed::Species;

/// A breed ranked by similarity to the analysed breed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarBreed {
    pub name: String,
    pub species: Species,
    pub similarity: f64,
}

/// Everything the analysis reads from the store: the ranking, shared
/// diseases and the target's own (name, prevalence) pairs in supply order.
#[derive(Debug, Clone)]
pub struct RiskAssessment {
    pub target_breed: String,
    pub similar_breeds: Vec<SimilarBreed>,
    pub shared_diseases: Vec<String>,
    pub target_diseases: Vec<(String, f64)>,
}

/// Output of the risk analysis pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAnalysis {
    pub target_breed: String,
    pub similar_breeds: Vec<SimilarBreed>,
    pub shared_diseases: Vec<String>,
    pub care_plan: String,
}
