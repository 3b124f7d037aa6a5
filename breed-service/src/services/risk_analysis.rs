//! Risk analysis pipeline: lookup, similarity, species adjustment, shared
//! diseases and care plan.

use crate::models::{RiskAnalysis, RiskAssessment};
use crate::services::care_plan::CarePlanGenerator;
use crate::services::metrics::record_risk_analysis;
use crate::services::scoring::apply_species_penalty;
use crate::services::shared::shared_diseases;
use crate::services::similarity::{top_similar_breeds, TOP_SIMILAR};
use crate::services::store::BreedStore;
use crate::services::suggest::closest_match;
use crate::services::ServiceError;
use std::collections::HashSet;
use tracing::{info, instrument};
use uuid::Uuid;

/// Run the full analysis for `breed_name`.
pub async fn run_risk_analysis(
    store: &dyn BreedStore,
    care_plans: &CarePlanGenerator,
    breed_name: &str,
) -> Result<RiskAnalysis, ServiceError> {
    let assessment = assess_risk(store, breed_name).await?;
    Ok(assessment.with_care_plan(care_plans).await)
}

/// Store-backed steps of the analysis. The care plan is left to
/// [`RiskAssessment::with_care_plan`] so callers can release the store first.
#[instrument(skip(store))]
pub async fn assess_risk(
    store: &dyn BreedStore,
    breed_name: &str,
) -> Result<RiskAssessment, ServiceError> {
    let result = assess(store, breed_name).await;
    match &result {
        Ok(_) => record_risk_analysis("ok"),
        Err(e) => record_risk_analysis(e.kind()),
    }
    result
}

impl RiskAssessment {
    pub async fn with_care_plan(self, care_plans: &CarePlanGenerator) -> RiskAnalysis {
        let care_plan = care_plans
            .generate(&self.target_breed, &self.target_diseases)
            .await;
        RiskAnalysis {
            target_breed: self.target_breed,
            similar_breeds: self.similar_breeds,
            shared_diseases: self.shared_diseases,
            care_plan,
        }
    }
}

async fn assess(store: &dyn BreedStore, breed_name: &str) -> Result<RiskAssessment, ServiceError> {
    let Some(target) = store.find_breed(breed_name).await? else {
        let names = store.breed_names().await?;
        let suggestion = closest_match(breed_name, names.iter().map(String::as_str));
        return Err(ServiceError::BreedNotFound {
            name: breed_name.to_string(),
            suggestion,
        });
    };

    let target_diseases = store.breed_diseases(target.breed_id).await?;
    let target_ids: HashSet<Uuid> = target_diseases.iter().map(|d| d.disease_id).collect();

    let candidates = top_similar_breeds(store, &target, &target_ids, TOP_SIMILAR).await?;
    let similar_breeds = apply_species_penalty(target.species, candidates);

    let similar_names: Vec<String> = similar_breeds.iter().map(|b| b.name.clone()).collect();
    let shared = shared_diseases(store, &target_ids, &similar_names).await?;

    info!(
        similar = similar_breeds.len(),
        shared = shared.len(),
        "Risk assessment completed"
    );

    Ok(RiskAssessment {
        target_breed: target.name,
        similar_breeds,
        shared_diseases: shared,
        target_diseases: target_diseases
            .into_iter()
            .map(|d| (d.name, d.prevalence))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewBreed, NewBreedDisease, Species};
    use crate::seed::sample_breeds;
    use crate::services::care_plan::fallback_plan;
    use crate::services::providers::{DisabledTextProvider, MockTextProvider};
    use crate::services::registry::register_breed;
    use crate::services::store::MemoryStore;
    use std::sync::Arc;

    fn fallback_generator() -> CarePlanGenerator {
        CarePlanGenerator::new(Arc::new(DisabledTextProvider))
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for breed in sample_breeds() {
            register_breed(&store, breed).await.unwrap();
        }
        store
    }

    async fn add(store: &MemoryStore, name: &str, species: &str, diseases: &[(&str, f64)]) {
        register_breed(
            store,
            NewBreed {
                name: name.to_string(),
                species: species.to_string(),
                diseases: diseases
                    .iter()
                    .map(|(d, p)| NewBreedDisease {
                        disease_name: d.to_string(),
                        prevalence: *p,
                    })
                    .collect(),
            },
        )
        .await
        .unwrap();
    }

    fn ranking(analysis: &RiskAnalysis) -> Vec<(&str, Species, f64)> {
        analysis
            .similar_breeds
            .iter()
            .map(|b| (b.name.as_str(), b.species, b.similarity))
            .collect()
    }

    #[tokio::test]
    async fn analyses_labrador_from_sample_data() {
        let store = seeded().await;
        let analysis = run_risk_analysis(&store, &fallback_generator(), "Labrador Retriever")
            .await
            .unwrap();

        assert_eq!(analysis.target_breed, "Labrador Retriever");
        assert_eq!(
            ranking(&analysis),
            vec![
                ("Golden Retriever", Species::Dog, 1.0),
                ("German Shepherd", Species::Dog, 0.3333),
                ("British Shorthair", Species::Cat, 0.2333),
            ]
        );
        assert_eq!(analysis.shared_diseases, vec!["Arthritis", "Hip Dysplasia"]);
        assert_eq!(
            analysis.care_plan,
            "Preventive care plan for Labrador Retriever:\n\
             - Hip Dysplasia: monitor, vet checkups, lifestyle adjustments.\n\
             - Arthritis: monitor, vet checkups, lifestyle adjustments."
        );
    }

    #[tokio::test]
    async fn same_species_pair_keeps_raw_score() {
        let store = MemoryStore::new();
        add(&store, "X", "dog", &[("H", 0.8), ("A", 0.4)]).await;
        add(&store, "Y", "dog", &[("H", 0.7)]).await;

        let analysis = run_risk_analysis(&store, &fallback_generator(), "X").await.unwrap();

        assert_eq!(ranking(&analysis), vec![("Y", Species::Dog, 0.5)]);
        assert_eq!(analysis.shared_diseases, vec!["H"]);
    }

    #[tokio::test]
    async fn cross_species_pair_is_penalised() {
        let store = MemoryStore::new();
        add(&store, "X", "dog", &[("H", 0.8), ("A", 0.4)]).await;
        add(&store, "Y", "dog", &[("H", 0.7)]).await;
        add(&store, "Z", "cat", &[("H", 0.2)]).await;

        let analysis = run_risk_analysis(&store, &fallback_generator(), "X").await.unwrap();

        assert_eq!(
            ranking(&analysis),
            vec![("Y", Species::Dog, 0.5), ("Z", Species::Cat, 0.4)]
        );
    }

    #[tokio::test]
    async fn breed_without_diseases_scores_zero() {
        let store = MemoryStore::new();
        add(&store, "Loner", "cat", &[]).await;
        add(&store, "Other", "cat", &[]).await;
        add(&store, "Dog", "dog", &[("H", 0.5)]).await;

        let analysis = run_risk_analysis(&store, &fallback_generator(), "Loner")
            .await
            .unwrap();

        assert_eq!(
            ranking(&analysis),
            vec![("Dog", Species::Dog, 0.0), ("Other", Species::Cat, 0.0)]
        );
        assert!(analysis.shared_diseases.is_empty());
        assert_eq!(analysis.care_plan, fallback_plan("Loner", &[]));
    }

    #[tokio::test]
    async fn only_breed_has_no_similar_breeds() {
        let store = MemoryStore::new();
        add(&store, "Solo", "dog", &[("H", 0.5)]).await;

        let analysis = run_risk_analysis(&store, &fallback_generator(), "Solo").await.unwrap();

        assert!(analysis.similar_breeds.is_empty());
        assert!(analysis.shared_diseases.is_empty());
    }

    #[tokio::test]
    async fn unknown_breed_carries_suggestion() {
        let store = seeded().await;
        let err = run_risk_analysis(&store, &fallback_generator(), "Labradorr")
            .await
            .unwrap_err();

        match err {
            ServiceError::BreedNotFound { name, suggestion } => {
                assert_eq!(name, "Labradorr");
                assert_eq!(suggestion.as_deref(), Some("Labrador Retriever"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unknown_breed_without_close_match() {
        let store = seeded().await;
        let err = run_risk_analysis(&store, &fallback_generator(), "Axolotl")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Breed 'Axolotl' not found.");
    }

    #[tokio::test]
    async fn assessment_carries_target_diseases_in_supply_order() {
        let store = seeded().await;
        let assessment = assess_risk(&store, "Labrador Retriever").await.unwrap();

        assert_eq!(assessment.target_breed, "Labrador Retriever");
        assert_eq!(assessment.similar_breeds.len(), 3);
        assert_eq!(assessment.shared_diseases, vec!["Arthritis", "Hip Dysplasia"]);
        assert_eq!(
            assessment.target_diseases,
            vec![("Hip Dysplasia".to_string(), 0.8), ("Arthritis".to_string(), 0.4)]
        );
    }

    #[tokio::test]
    async fn care_plan_is_generated_after_the_store_is_released() {
        let assessment = {
            let store = seeded().await;
            assess_risk(&store, "Persian").await.unwrap()
        };
        let provider = Arc::new(MockTextProvider::responding("Plan."));
        let generator = CarePlanGenerator::new(provider.clone());

        let analysis = assessment.with_care_plan(&generator).await;

        assert_eq!(analysis.care_plan, "Plan.");
        assert_eq!(analysis.shared_diseases, vec!["Kidney Disease"]);
        assert_eq!(provider.prompts().len(), 1);
        assert!(provider.prompts()[0].contains("Kidney Disease (prevalence 70%)"));
    }

    #[tokio::test]
    async fn provider_text_is_used_when_available() {
        let store = seeded().await;
        let generator = CarePlanGenerator::new(Arc::new(MockTextProvider::responding("Plan.")));

        let analysis = run_risk_analysis(&store, &generator, "Persian").await.unwrap();

        assert_eq!(analysis.care_plan, "Plan.");
        assert_eq!(analysis.shared_diseases, vec!["Kidney Disease"]);
    }

    #[tokio::test]
    async fn failing_provider_does_not_fail_analysis() {
        let store = seeded().await;
        let generator = CarePlanGenerator::new(Arc::new(MockTextProvider::failing()));

        let analysis = run_risk_analysis(&store, &generator, "Beagle").await.unwrap();

        assert_eq!(
            analysis.care_plan,
            "Preventive care plan for Beagle:\n- Diabetes: monitor, vet checkups, lifestyle adjustments."
        );
    }
}
