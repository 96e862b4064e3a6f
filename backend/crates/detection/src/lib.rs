//! Fake News Detection Module
//!
//! Clean Architecture structure:
//! - `domain/` - Predictions, verdicts, the `Classifier` trait
//! - `application/` - Analyze use case and its configuration
//! - `infra/` - Hugging Face inference client
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! The model labels `LABEL_0` as fake; every other label reads as real.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::DetectionConfig;
pub use domain::{Classifier, Prediction, Verdict, VerdictLabel};
pub use error::{DetectionError, DetectionResult};
pub use infra::{HuggingFaceClassifier, HuggingFaceConfig};
pub use presentation::{DetectionAppState, analyze_router, health_router};
