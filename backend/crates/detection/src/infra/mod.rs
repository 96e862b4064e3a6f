//! Infrastructure Layer
//!
//! External service integrations.

pub mod huggingface;

pub use huggingface::{HuggingFaceClassifier, HuggingFaceConfig};
