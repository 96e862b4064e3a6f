//! Hugging Face Inference client
//!
//! POSTs `{"inputs": text}` with a bearer token and expects
//! `[[{"label": "...", "score": 0.0..1.0}, ...]]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::domain::classifier::Classifier;
use crate::domain::verdict::Prediction;
use crate::error::{DetectionError, DetectionResult};

pub const DEFAULT_MODEL_URL: &str =
    "https://router.huggingface.co/hf-inference/models/Pulk17/Fake-News-Detection";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Upstream error bodies are truncated to this many bytes in logs
const MAX_ERROR_BODY_LEN: usize = 512;

/// Client settings
#[derive(Clone)]
pub struct HuggingFaceConfig {
    pub api_token: String,
    pub model_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl HuggingFaceConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            model_url: DEFAULT_MODEL_URL.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for HuggingFaceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceConfig")
            .field("api_token", &"[REDACTED]")
            .field("model_url", &self.model_url)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct Candidate {
    label: String,
    score: f64,
}

/// Classifier backed by the hosted inference endpoint
#[derive(Clone)]
pub struct HuggingFaceClassifier {
    http: reqwest::Client,
    api_token: String,
    model_url: String,
}

impl HuggingFaceClassifier {
    /// Fails if the token is empty or the HTTP client cannot be built.
    pub fn new(config: HuggingFaceConfig) -> DetectionResult<Self> {
        if config.api_token.trim().is_empty() {
            return Err(DetectionError::MissingCredential);
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| DetectionError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            api_token: config.api_token,
            model_url: config.model_url,
        })
    }

    pub fn model_url(&self) -> &str {
        &self.model_url
    }
}

impl Classifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> DetectionResult<Prediction> {
        let response = self
            .http
            .post(&self.model_url)
            .bearer_auth(&self.api_token)
            .json(&InferenceRequest { inputs: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY_LEN {
                let cut = (0..=MAX_ERROR_BODY_LEN)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(DetectionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        tracing::debug!(response = %body, "Classifier response");

        select_prediction(body)
    }
}

/// Pick the highest-scoring candidate from `result[0]`.
///
/// Ties keep the earlier candidate.
fn select_prediction(body: Value) -> DetectionResult<Prediction> {
    let candidates = match body {
        Value::Array(mut outer) if !outer.is_empty() => outer.swap_remove(0),
        _ => {
            return Err(DetectionError::MalformedResponse(
                "expected a non-empty top-level array".to_string(),
            ));
        }
    };

    let candidates: Vec<Candidate> = match candidates {
        Value::Array(items) if !items.is_empty() => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .map_err(|e| DetectionError::MalformedResponse(format!("invalid candidate: {}", e)))?,
        _ => {
            return Err(DetectionError::MalformedResponse(
                "no prediction result received from the model".to_string(),
            ));
        }
    };

    if let Some(bad) = candidates
        .iter()
        .find(|c| !c.score.is_finite() || !(0.0..=1.0).contains(&c.score))
    {
        return Err(DetectionError::MalformedResponse(format!(
            "score out of range for {}: {}",
            bad.label, bad.score
        )));
    }

    let best = candidates
        .into_iter()
        .reduce(|max, current| if current.score > max.score { current } else { max })
        .ok_or_else(|| DetectionError::MalformedResponse("empty candidates".to_string()))?;

    Ok(Prediction::new(best.label, best.score))
}
