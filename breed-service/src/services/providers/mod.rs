//! Text generation providers for care plans.
//!
//! The care-plan generator only sees [`TextProvider`]; which implementation
//! backs it is decided once at startup by [`from_config`].

pub mod disabled;
pub mod mock;
pub mod openai;

use crate::config::CarePlanConfig;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::sync::Arc;
use thiserror::Error;

pub use disabled::DisabledTextProvider;
pub use mock::MockTextProvider;
pub use openai::{OpenAiConfig, OpenAiTextProvider};

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider returned no text")]
    EmptyResponse,
}

impl ProviderError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::EmptyResponse => "empty_response",
        }
    }
}

/// Generation parameters for text requests.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Maximum output tokens.
    pub max_tokens: Option<u32>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: Some(0.7),
            max_tokens: Some(512),
        }
    }
}

/// Something that turns a prompt into text.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str, params: &GenerationParams)
        -> Result<String, ProviderError>;
}

/// Pick the provider for the configured credential: OpenAI when a non-empty
/// key is present, otherwise the disabled provider.
pub fn from_config(config: &CarePlanConfig) -> Result<Arc<dyn TextProvider>, ProviderError> {
    match &config.api_key {
        Some(key) if !key.expose_secret().trim().is_empty() => {
            let provider = OpenAiTextProvider::new(OpenAiConfig {
                api_key: key.clone(),
                model: config.model.clone(),
                base_url: config.api_base_url.clone(),
                timeout_secs: config.timeout_secs,
            })?;
            tracing::info!(model = %config.model, "Care plans use the OpenAI provider");
            Ok(Arc::new(provider))
        }
        _ => {
            tracing::info!("No OpenAI key configured, care plans use the fallback text");
            Ok(Arc::new(DisabledTextProvider))
        }
    }
}
