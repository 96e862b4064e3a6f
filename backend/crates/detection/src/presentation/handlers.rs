//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum_extra::extract::WithRejection;
use chrono::{SecondsFormat, Utc};
use kernel::error::app_error::AppError;
use serde_json::Value;
use std::sync::Arc;

use crate::application::{AnalyzeTextUseCase, DetectionConfig};
use crate::domain::classifier::Classifier;
use crate::error::{DetectionError, DetectionResult};
use crate::presentation::dto::{AnalyzeData, AnalyzeRequest, AnalyzeResponse, HealthResponse};

/// Shared state for detection handlers
pub struct DetectionAppState<C>
where
    C: Classifier + Send + Sync + 'static,
{
    pub classifier: Arc<C>,
    pub config: Arc<DetectionConfig>,
}

impl<C> DetectionAppState<C>
where
    C: Classifier + Send + Sync + 'static,
{
    pub fn new(classifier: C, config: DetectionConfig) -> Self {
        Self {
            classifier: Arc::new(classifier),
            config: Arc::new(config),
        }
    }
}

// Manual impl: the classifier itself need not be Clone
impl<C> Clone for DetectionAppState<C>
where
    C: Classifier + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            classifier: self.classifier.clone(),
            config: self.config.clone(),
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ============================================================================
// Analyze
// ============================================================================

/// POST /api/detection/analyze
pub async fn analyze<C>(
    State(state): State<DetectionAppState<C>>,
    WithRejection(Json(req), _): WithRejection<Json<AnalyzeRequest>, AppError>,
) -> DetectionResult<Json<AnalyzeResponse>>
where
    C: Classifier + Send + Sync + 'static,
{
    let Some(Value::String(text)) = req.text else {
        return Err(DetectionError::EmptyText);
    };

    let use_case = AnalyzeTextUseCase::new(state.classifier.clone(), state.config.clone());
    let analysis = use_case.execute(&text).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        data: AnalyzeData {
            text: analysis.text,
            is_fake: analysis.verdict.is_fake,
            confidence: state.config.round_confidence(analysis.verdict.confidence),
            label: analysis.verdict.label.as_str(),
            timestamp: now_rfc3339(),
        },
    }))
}

// ============================================================================
// Health
// ============================================================================

/// GET /api/detection/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Fake news detection service is running",
        timestamp: now_rfc3339(),
    })
}
