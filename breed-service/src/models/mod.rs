//! Domain models for breed-service.

mod analysis;
mod breed;
mod disease;

pub use analysis::{RiskAnalysis, RiskAssessment, SimilarBreed};
pub use breed::{Breed, BreedWithDiseases, NewBreed, NewBreedDisease, Species, UnknownSpecies};
pub use disease::{BreedDisease, Disease};
