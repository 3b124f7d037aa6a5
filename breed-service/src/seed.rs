//! Sample breeds and diseases for local development and tests.

use crate::models::{NewBreed, NewBreedDisease};

const SAMPLE_BREEDS: &[(&str, &str, &[(&str, f64)])] = &[
    ("Labrador Retriever", "dog", &[("Hip Dysplasia", 0.8), ("Arthritis", 0.4)]),
    ("German Shepherd", "dog", &[("Hip Dysplasia", 0.7), ("Heart Disease", 0.3)]),
    ("Golden Retriever", "dog", &[("Hip Dysplasia", 0.6), ("Arthritis", 0.5)]),
    ("Bulldog", "dog", &[("Heart Disease", 0.6)]),
    ("Beagle", "dog", &[("Diabetes", 0.4)]),
    ("Persian", "cat", &[("Kidney Disease", 0.7)]),
    ("Siamese", "cat", &[("Diabetes", 0.5)]),
    ("Maine Coon", "cat", &[("Heart Disease", 0.4)]),
    ("Ragdoll", "cat", &[("Kidney Disease", 0.6)]),
    ("British Shorthair", "cat", &[("Arthritis", 0.3), ("Diabetes", 0.4)]),
];

/// Ten breeds over five diseases, fourteen links in total.
pub fn sample_breeds() -> Vec<NewBreed> {
    SAMPLE_BREEDS
        .iter()
        .map(|(name, species, diseases)| NewBreed {
            name: name.to_string(),
            species: species.to_string(),
            diseases: diseases
                .iter()
                .map(|(disease, prevalence)| NewBreedDisease {
                    disease_name: disease.to_string(),
                    prevalence: *prevalence,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{register_breed, MemoryStore};

    #[tokio::test]
    async fn sample_data_registers_cleanly() {
        let store = MemoryStore::new();
        for breed in sample_breeds() {
            register_breed(&store, breed).await.unwrap();
        }
        assert_eq!(store.row_counts(), (10, 5, 14));
    }
}
