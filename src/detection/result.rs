//! Detection results.

use serde::Serialize;

/// Per-signal entry in a detection report.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureReport {
    /// Signal name, in registry order.
    pub feature: String,
    /// Verdict word: Legitimate, Suspicious, or Phishing.
    pub result: String,
    /// Human-readable explanation for this outcome.
    pub explanation: String,
}

/// The complete verdict for one URL. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    /// The normalized input URL.
    pub url: String,
    /// Probability the URL is safe, in [0,100]. Sums to 100 with phishing.
    pub safe_percentage: f64,
    /// Probability the URL is phishing, in [0,100].
    pub phishing_percentage: f64,
    /// Per-signal explanations; empty for whitelist short-circuits.
    pub features: Vec<FeatureReport>,
    /// Joined red-flag warnings, when any triggered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl DetectionResult {
    /// The short-circuit verdict for an exactly whitelisted domain.
    pub fn whitelisted(url: &str) -> Self {
        Self {
            url: url.to_string(),
            safe_percentage: 100.0,
            phishing_percentage: 0.0,
            features: Vec::new(),
            warning: Some("Domain is whitelisted (trusted)".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelisted_result_shape() {
        let result = DetectionResult::whitelisted("https://google.com");
        assert_eq!(result.safe_percentage, 100.0);
        assert_eq!(result.phishing_percentage, 0.0);
        assert!(result.features.is_empty());
        assert!(result.warning.as_deref().unwrap().contains("whitelisted"));
    }

    #[test]
    fn test_serializes_without_null_warning() {
        let result = DetectionResult {
            url: "https://example.com".into(),
            safe_percentage: 60.0,
            phishing_percentage: 40.0,
            features: Vec::new(),
            warning: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("warning"));
    }
}
