//! Classifier Trait
//!
//! The only seam around the hosted model. The Hugging Face client lives in
//! the infra layer; tests plug in their own implementations.

use crate::domain::verdict::Prediction;
use crate::error::DetectionResult;

/// Text classifier
#[trait_variant::make(Classifier: Send)]
pub trait LocalClassifier {
    /// Classify `text` and return the highest-scoring candidate
    async fn classify(&self, text: &str) -> DetectionResult<Prediction>;
}
