//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Analyze request
///
/// `text` is kept as a raw JSON value so that missing and non-string inputs
/// get the same 400 as empty ones.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<Value>,
}

/// Analyze response
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: AnalyzeData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeData {
    pub text: String,
    pub is_fake: bool,
    pub confidence: f64,
    pub label: &'static str,
    pub timestamp: String,
}

/// Health response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: String,
}
