//! Application Layer

pub mod analyze_text;
pub mod config;

// Re-exports
pub use analyze_text::{Analysis, AnalyzeTextUseCase};
pub use config::DetectionConfig;
