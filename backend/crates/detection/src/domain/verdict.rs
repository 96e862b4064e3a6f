//! Prediction and Verdict
//!
//! A `Prediction` is what the model says (`LABEL_0` / `LABEL_1` plus a
//! score); a `Verdict` is what the API reports (`FAKE` / `REAL`).

/// Raw model label meaning "fake"
pub const FAKE_MODEL_LABEL: &str = "LABEL_0";

/// Highest-scoring candidate returned by a classifier
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Confidence in `[0, 1]`
    pub score: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Human-readable label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictLabel {
    Fake,
    Real,
}

impl VerdictLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::Fake => "FAKE",
            VerdictLabel::Real => "REAL",
        }
    }
}

/// Normalized classification result
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub is_fake: bool,
    pub confidence: f64,
    pub label: VerdictLabel,
}

impl Verdict {
    /// `LABEL_0` is fake; any other label is real.
    pub fn from_prediction(prediction: &Prediction) -> Self {
        let is_fake = prediction.label == FAKE_MODEL_LABEL;

        Self {
            is_fake,
            confidence: prediction.score,
            label: if is_fake {
                VerdictLabel::Fake
            } else {
                VerdictLabel::Real
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_0_is_fake() {
        let verdict = Verdict::from_prediction(&Prediction::new("LABEL_0", 0.91));
        assert!(verdict.is_fake);
        assert_eq!(verdict.label.as_str(), "FAKE");
        assert_eq!(verdict.confidence, 0.91);
    }

    #[test]
    fn test_other_labels_are_real() {
        for label in ["LABEL_1", "label_0", "SOMETHING_ELSE"] {
            let verdict = Verdict::from_prediction(&Prediction::new(label, 0.6));
            assert!(!verdict.is_fake, "{label} should be real");
            assert_eq!(verdict.label, VerdictLabel::Real);
        }
    }
}
