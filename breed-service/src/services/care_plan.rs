//! Preventive care plan text.
//!
//! A configured [`TextProvider`] writes the plan when it can. Any provider
//! failure, including a blank reply, is logged and replaced by
//! [`fallback_plan`], so generation itself never fails.

use crate::services::metrics::record_care_plan;
use crate::services::providers::{GenerationParams, TextProvider};
use std::fmt::Write;
use std::sync::Arc;
use tracing::{instrument, warn};

pub struct CarePlanGenerator {
    provider: Arc<dyn TextProvider>,
    params: GenerationParams,
}

impl CarePlanGenerator {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self {
            provider,
            params: GenerationParams::default(),
        }
    }

    /// Care plan for `breed_name` covering `diseases` (name, prevalence) in the given order.
    #[instrument(skip(self, diseases), fields(provider = self.provider.name(), diseases = diseases.len()))]
    pub async fn generate(&self, breed_name: &str, diseases: &[(String, f64)]) -> String {
        let prompt = build_prompt(breed_name, diseases);

        match self.provider.generate(&prompt, &self.params).await {
            Ok(text) if !text.trim().is_empty() => {
                record_care_plan("provider");
                text.trim().to_string()
            }
            Ok(_) => {
                warn!("Care plan provider returned blank text, using fallback");
                record_care_plan("fallback");
                fallback_plan(breed_name, diseases)
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Care plan provider failed, using fallback");
                record_care_plan("fallback");
                fallback_plan(breed_name, diseases)
            }
        }
    }
}

/// Prompt sent to the provider.
pub fn build_prompt(breed_name: &str, diseases: &[(String, f64)]) -> String {
    let mut prompt = format!(
        "Write a short preventive care plan for a {} covering these known health risks:\n",
        breed_name
    );
    if diseases.is_empty() {
        prompt.push_str("- none recorded\n");
    }
    for (name, prevalence) in diseases {
        let _ = writeln!(prompt, "- {} (prevalence {:.0}%)", name, prevalence * 100.0);
    }
    prompt.push_str("For each risk give monitoring advice, vet checkups and lifestyle adjustments.");
    prompt
}

/// Deterministic plan used whenever the provider cannot be used.
pub fn fallback_plan(breed_name: &str, diseases: &[(String, f64)]) -> String {
    let bullets: Vec<String> = diseases
        .iter()
        .map(|(name, _)| format!("- {}: monitor, vet checkups, lifestyle adjustments.", name))
        .collect();
    format!(
        "Preventive care plan for {}:\n{}",
        breed_name,
        bullets.join("\n")
    )
}
