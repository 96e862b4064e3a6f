//! Application Configuration

/// Maximum accepted text length, in characters
pub const DEFAULT_MAX_TEXT_CHARS: usize = 10_000;

/// Detection application configuration
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Longest accepted input, counted in characters before trimming
    pub max_text_chars: usize,
    /// Decimal places kept in the reported confidence
    pub confidence_decimals: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            confidence_decimals: 2,
        }
    }
}

impl DetectionConfig {
    /// Round a confidence score for the response body
    pub fn round_confidence(&self, confidence: f64) -> f64 {
        let factor = 10f64.powi(self.confidence_decimals as i32);
        (confidence * factor).round() / factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_confidence() {
        let config = DetectionConfig::default();
        assert_eq!(config.round_confidence(0.9137), 0.91);
        assert_eq!(config.round_confidence(0.876), 0.88);
        assert_eq!(config.round_confidence(0.0), 0.0);
        assert_eq!(config.round_confidence(1.0), 1.0);
    }
}
