//! Analyze Text Use Case
//!
//! Validates the input, asks the classifier, and turns the prediction into
//! a verdict.

use std::sync::Arc;

use crate::application::config::DetectionConfig;
use crate::domain::classifier::Classifier;
use crate::domain::verdict::Verdict;
use crate::error::{DetectionError, DetectionResult};

/// Analysis output
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Trimmed text that was classified
    pub text: String,
    pub verdict: Verdict,
}

/// Analyze text use case
pub struct AnalyzeTextUseCase<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
    config: Arc<DetectionConfig>,
}

impl<C> AnalyzeTextUseCase<C>
where
    C: Classifier,
{
    pub fn new(classifier: Arc<C>, config: Arc<DetectionConfig>) -> Self {
        Self { classifier, config }
    }

    /// The classifier is not called for rejected input.
    pub async fn execute(&self, text: &str) -> DetectionResult<Analysis> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DetectionError::EmptyText);
        }

        // Unicode scalar values, not UTF-16 units: an emoji counts once.
        let length = text.chars().count();
        if length > self.config.max_text_chars {
            return Err(DetectionError::TextTooLong {
                max: self.config.max_text_chars,
                actual: length,
            });
        }

        let prediction = self
            .classifier
            .classify(trimmed)
            .await
            .map_err(|e| DetectionError::AnalysisFailed(Box::new(e)))?;

        let verdict = Verdict::from_prediction(&prediction);

        tracing::info!(
            chars = length,
            label = verdict.label.as_str(),
            confidence = verdict.confidence,
            "Text analyzed"
        );

        Ok(Analysis {
            text: trimmed.to_string(),
            verdict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::verdict::{Prediction, VerdictLabel};
    use std::sync::Mutex;

    /// Records every text it is asked to classify
    #[derive(Default)]
    struct RecordingClassifier {
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    impl Classifier for RecordingClassifier {
        async fn classify(&self, text: &str) -> DetectionResult<Prediction> {
            self.seen.lock().unwrap().push(text.to_string());
            if self.fail {
                return Err(DetectionError::MalformedResponse("boom".to_string()));
            }
            Ok(Prediction::new("LABEL_0", 0.87))
        }
    }

    fn use_case(classifier: Arc<RecordingClassifier>) -> AnalyzeTextUseCase<RecordingClassifier> {
        AnalyzeTextUseCase::new(classifier, Arc::new(DetectionConfig::default()))
    }

    #[tokio::test]
    async fn test_trims_before_classifying() {
        let classifier = Arc::new(RecordingClassifier::default());
        let analysis = use_case(classifier.clone())
            .execute("  Breaking news!  \n")
            .await
            .unwrap();

        assert_eq!(analysis.text, "Breaking news!");
        assert_eq!(analysis.verdict.label, VerdictLabel::Fake);
        assert_eq!(*classifier.seen.lock().unwrap(), vec!["Breaking news!"]);
    }

    #[tokio::test]
    async fn test_rejected_input_skips_classifier() {
        let classifier = Arc::new(RecordingClassifier::default());
        let use_case = use_case(classifier.clone());

        assert!(matches!(
            use_case.execute(" \t\n").await,
            Err(DetectionError::EmptyText)
        ));
        assert!(matches!(
            use_case.execute(&"a".repeat(10_001)).await,
            Err(DetectionError::TextTooLong { actual: 10_001, .. })
        ));
        assert!(classifier.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_limit_counts_characters() {
        let classifier = Arc::new(RecordingClassifier::default());
        // 10,000 multi-byte characters are within the limit
        let text = "é".repeat(10_000);
        assert!(use_case(classifier).execute(&text).await.is_ok());
    }

    #[tokio::test]
    async fn test_classifier_failure_is_wrapped() {
        let classifier = Arc::new(RecordingClassifier {
            fail: true,
            ..Default::default()
        });
        let err = use_case(classifier).execute("some text").await.unwrap_err();
        assert!(matches!(err, DetectionError::AnalysisFailed(_)));
    }
}
