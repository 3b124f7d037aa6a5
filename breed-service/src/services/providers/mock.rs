//! Mock provider for testing.

use super::{GenerationParams, ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock text provider that returns a canned reply or a canned failure and
/// remembers the prompts it was given.
pub struct MockTextProvider {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    /// Succeeds with `text` on every call.
    pub fn responding(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fails with an API error on every call.
    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(ProviderError::ApiError(
                "Mock text provider configured to fail".to_string(),
            )),
        }
    }
}
