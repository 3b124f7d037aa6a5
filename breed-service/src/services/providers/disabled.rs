//! Provider used when no text generation service is configured.

use super::{GenerationParams, ProviderError, TextProvider};
use async_trait::async_trait;

/// Always fails with [`ProviderError::NotConfigured`], so callers fall back.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTextProvider;

#[async_trait]
impl TextProvider for DisabledTextProvider {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::NotConfigured(
            "OPENAI_API_KEY is not set".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn never_generates() {
        let err = DisabledTextProvider
            .generate("anything", &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
