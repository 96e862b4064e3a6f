//! Detection Routers
//!
//! Both are mounted under `/api/detection`; the server puts `require_auth`
//! on the analyze router only.

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::classifier::Classifier;
use crate::presentation::handlers::{self, DetectionAppState};

/// `POST /analyze`
pub fn analyze_router<C>(state: DetectionAppState<C>) -> Router
where
    C: Classifier + Send + Sync + 'static,
{
    Router::new()
        .route("/analyze", post(handlers::analyze::<C>))
        .with_state(state)
}

/// `GET /health` (public)
pub fn health_router() -> Router {
    Router::new().route("/health", get(handlers::health))
}
