//! The pretrained classifier, behind a narrow interface.
//!
//! The model is an opaque scoring collaborator: it takes the ordered
//! 30-value feature vector and returns a phishing probability. Only the
//! input and output contracts matter here; training and selection happen
//! elsewhere. A model that cannot be loaded is fatal at startup, never a
//! silent fallback.

use std::path::Path;

use serde::Deserialize;

use crate::error_handling::DetectError;
use crate::signals::{FeatureVector, FEATURE_COUNT};

/// A binary phishing classifier.
///
/// Implementations score an ordered feature vector into a phishing
/// probability in [0,1].
pub trait Classifier: Send + Sync {
    /// Phishing probability for the given feature vector, in [0,1].
    ///
    /// # Errors
    ///
    /// Returns `DetectError::ClassifierUnavailable` when the model cannot
    /// produce a score.
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, DetectError>;
}

#[derive(Debug, Deserialize)]
struct ModelFile {
    weights: Vec<f64>,
    intercept: f64,
}

/// Linear scorer over the signal values with a logistic link.
///
/// The weight layout is positional and must match the signal registry
/// order; the file is rejected when the length differs.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    weights: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearClassifier {
    /// Loads the model from a JSON file of `{weights: [...], intercept}`.
    ///
    /// # Errors
    ///
    /// Returns `DetectError::ClassifierUnavailable` when the file is
    /// missing, unreadable, or carries the wrong number of weights.
    pub fn from_file(path: &Path) -> Result<Self, DetectError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DetectError::ClassifierUnavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        let parsed: ModelFile = serde_json::from_str(&raw).map_err(|e| {
            DetectError::ClassifierUnavailable(format!("cannot parse {}: {e}", path.display()))
        })?;
        Self::from_parts(&parsed.weights, parsed.intercept)
    }

    /// Builds the model from raw weights and intercept.
    ///
    /// # Errors
    ///
    /// Returns `DetectError::ClassifierUnavailable` when the weight count
    /// differs from the feature count.
    pub fn from_parts(weights: &[f64], intercept: f64) -> Result<Self, DetectError> {
        if weights.len() != FEATURE_COUNT {
            return Err(DetectError::ClassifierUnavailable(format!(
                "model has {} weights, expected {FEATURE_COUNT}",
                weights.len()
            )));
        }
        let mut fixed = [0.0; FEATURE_COUNT];
        fixed.copy_from_slice(weights);
        Ok(Self {
            weights: fixed,
            intercept,
        })
    }
}

impl Classifier for LinearClassifier {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, DetectError> {
        let input = features.as_model_input();
        let logit: f64 = self
            .weights
            .iter()
            .zip(input.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        Ok(1.0 / (1.0 + (-logit).exp()))
    }
}
