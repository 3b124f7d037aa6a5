pub mod breeds;

pub use breeds::{
    BreedResponse, CreateBreedRequest, DiseaseRequest, DiseaseResponse, RiskAnalysisParams,
    RiskAnalysisResponse, SimilarBreedResponse,
};
