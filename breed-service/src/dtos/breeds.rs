use crate::models::{BreedWithDiseases, NewBreed, NewBreedDisease, RiskAnalysis, Species};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBreedRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// "dog" or "cat"; checked during registration.
    pub species: String,
    #[serde(default)]
    #[validate(nested)]
    pub diseases: Vec<DiseaseRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiseaseRequest {
    #[validate(length(min = 1, max = 255))]
    pub disease_name: String,
    pub prevalence: f64,
}

impl From<CreateBreedRequest> for NewBreed {
    fn from(req: CreateBreedRequest) -> Self {
        Self {
            name: req.name,
            species: req.species,
            diseases: req
                .diseases
                .into_iter()
                .map(|d| NewBreedDisease {
                    disease_name: d.disease_name,
                    prevalence: d.prevalence,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiseaseResponse {
    pub disease_name: String,
    pub prevalence: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BreedResponse {
    pub name: String,
    pub species: Species,
    pub diseases: Vec<DiseaseResponse>,
}

impl From<BreedWithDiseases> for BreedResponse {
    fn from(created: BreedWithDiseases) -> Self {
        Self {
            name: created.breed.name,
            species: created.breed.species,
            diseases: created
                .diseases
                .into_iter()
                .map(|d| DiseaseResponse {
                    disease_name: d.name,
                    prevalence: d.prevalence,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RiskAnalysisParams {
    pub breed_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarBreedResponse {
    pub name: String,
    pub species: Species,
    pub similarity: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RiskAnalysisResponse {
    pub target_breed: String,
    pub similar_breeds: Vec<SimilarBreedResponse>,
    pub shared_diseases: Vec<String>,
    pub care_plan: String,
}

impl From<RiskAnalysis> for RiskAnalysisResponse {
    fn from(analysis: RiskAnalysis) -> Self {
        Self {
            target_breed: analysis.target_breed,
            similar_breeds: analysis
                .similar_breeds
                .into_iter()
                .map(|b| SimilarBreedResponse {
                    name: b.name,
                    species: b.species,
                    similarity: b.similarity,
                })
                .collect(),
            shared_diseases: analysis.shared_diseases,
            care_plan: analysis.care_plan,
        }
    }
}
