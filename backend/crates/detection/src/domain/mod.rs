//! Domain Layer
//!
//! Predictions, verdicts and the classifier trait.

pub mod classifier;
pub mod verdict;

// Re-exports
pub use classifier::Classifier;
pub use verdict::{Prediction, Verdict, VerdictLabel};
