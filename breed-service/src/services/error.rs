use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Species must be 'dog' or 'cat'.")]
    InvalidSpecies(String),

    #[error("Prevalence must be between 0 and 1.")]
    InvalidPrevalence { disease_name: String, prevalence: f64 },

    #[error("Disease '{0}' is listed more than once.")]
    DuplicateDisease(String),

    #[error("Breed already exists.")]
    DuplicateBreed(String),

    #[error("{}", not_found_message(.name, .suggestion))]
    BreedNotFound {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn not_found_message(name: &str, suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!("Breed '{}' not found. Did you mean '{}'?", name, s),
        None => format!("Breed '{}' not found.", name),
    }
}

impl ServiceError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::InvalidSpecies(_)
            | ServiceError::InvalidPrevalence { .. }
            | ServiceError::DuplicateDisease(_)
            | ServiceError::DuplicateBreed(_)
            | ServiceError::Validation(_) => "validation_error",
            ServiceError::BreedNotFound { .. } => "not_found",
            ServiceError::Database(_) => "db_error",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => AppError::ValidationError(e),
            ServiceError::Database(e) => AppError::DatabaseError(anyhow::Error::new(e)),
            ServiceError::Internal(e) => AppError::InternalError(e),
            e @ ServiceError::BreedNotFound { .. } => AppError::NotFound(anyhow::anyhow!(e.to_string())),
            e => AppError::BadRequest(anyhow::anyhow!(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn not_found_mentions_suggestion() {
        let err = ServiceError::BreedNotFound {
            name: "Labradorr".to_string(),
            suggestion: Some("Labrador Retriever".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Breed 'Labradorr' not found. Did you mean 'Labrador Retriever'?"
        );
        assert_eq!(AppError::from(err).status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn not_found_without_suggestion() {
        let err = ServiceError::BreedNotFound {
            name: "Zzz".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "Breed 'Zzz' not found.");
    }

    #[test]
    fn client_errors_map_to_bad_request() {
        for err in [
            ServiceError::InvalidSpecies("bird".to_string()),
            ServiceError::InvalidPrevalence {
                disease_name: "Diabetes".to_string(),
                prevalence: 1.5,
            },
            ServiceError::DuplicateBreed("Beagle".to_string()),
            ServiceError::DuplicateDisease("Diabetes".to_string()),
        ] {
            assert_eq!(err.kind(), "validation_error");
            assert_eq!(AppError::from(err).status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn store_faults_are_internal() {
        let err = ServiceError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), "db_error");
        assert_eq!(
            AppError::from(err).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
