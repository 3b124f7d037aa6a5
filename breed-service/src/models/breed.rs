//! Breed model and species classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use super::disease::BreedDisease;

/// Species a breed belongs to. Only dogs and cats are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown species '{0}'")]
pub struct UnknownSpecies(pub String);

impl Species {
    /// Get string representation for database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
        }
    }
}

impl FromStr for Species {
    type Err = UnknownSpecies;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dog" => Ok(Self::Dog),
            "cat" => Ok(Self::Cat),
            other => Err(UnknownSpecies(other.to_string())),
        }
    }
}

impl TryFrom<String> for Species {
    type Error = UnknownSpecies;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registered breed.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Breed {
    pub breed_id: Uuid,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub species: Species,
    pub created_utc: DateTime<Utc>,
}

/// One disease entry of a registration request, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBreedDisease {
    pub disease_name: String,
    pub prevalence: f64,
}

/// Input for registering a breed. Species is still raw text here; registration
/// rejects anything but `dog`/`cat`.
#[derive(Debug, Clone)]
pub struct NewBreed {
    pub name: String,
    pub species: String,
    pub diseases: Vec<NewBreedDisease>,
}

/// A breed together with its diseases in supply order.
#[derive(Debug, Clone)]
pub struct BreedWithDiseases {
    pub breed: Breed,
    pub diseases: Vec<BreedDisease>,
}
