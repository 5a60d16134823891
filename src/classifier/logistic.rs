//! Logistic-regression classifier artifact.
//!
//! Coefficients were fitted offline against the labelled incident dataset
//! (standardized features, L2 regularization). The built-in parameters match
//! the deployed artifact; a retrained model ships as a TOML parameter file
//! loaded via `LogisticModel::load()`.

use super::{ClassifierError, FeatureVector, RiskClassifier, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Serialized model parameters, as written by the offline training job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticParams {
    /// Model tag reported in responses
    pub name: String,
    /// Per-feature standardization means (training-set statistics)
    pub means: [f64; FEATURE_COUNT],
    /// Per-feature standardization scales (training-set standard deviations)
    pub scales: [f64; FEATURE_COUNT],
    /// Logistic coefficients over standardized features
    pub weights: [f64; FEATURE_COUNT],
    /// Intercept term
    pub bias: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        // Offline fit over the synthetic incident dataset. Signs follow the
        // physical intuition: compliant PPE and high SpO2 reduce risk, heat,
        // gas and incident history increase it.
        Self {
            name: "Logistic_v1".to_string(),
            means: [82.0, 97.5, 36.8, 38.0, 36.0, 0.82, 6.8, 0.6, 31.0],
            scales: [18.0, 2.5, 0.9, 16.0, 5.0, 0.38, 1.9, 1.1, 8.0],
            weights: [0.92, -1.08, 0.81, 0.97, 0.58, -1.31, 0.66, 0.49, 0.14],
            bias: -1.22,
        }
    }
}

/// Pretrained logistic-regression binary classifier.
#[derive(Debug)]
pub struct LogisticModel {
    params: LogisticParams,
}

impl LogisticModel {
    /// Build a model from explicit parameters.
    pub const fn from_params(params: LogisticParams) -> Self {
        Self { params }
    }

    /// Load model parameters from a TOML file produced by the training job.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let raw = std::fs::read_to_string(&path)?;
        let params: LogisticParams = toml::from_str(&raw)?;
        info!(
            path = %path.as_ref().display(),
            model = %params.name,
            "Loaded classifier parameters"
        );
        Ok(Self::from_params(params))
    }
}

impl Default for LogisticModel {
    fn default() -> Self {
        Self::from_params(LogisticParams::default())
    }
}

impl RiskClassifier for LogisticModel {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        let mut z = self.params.bias;
        for i in 0..FEATURE_COUNT {
            let scale = self.params.scales[i];
            if scale == 0.0 {
                return Err(ClassifierError::Prediction(format!(
                    "zero standardization scale for feature {i}"
                )));
            }
            z += self.params.weights[i] * (features.0[i] - self.params.means[i]) / scale;
        }

        let probability = 1.0 / (1.0 + (-z).exp());
        if !probability.is_finite() {
            return Err(ClassifierError::Prediction(format!(
                "non-finite output for z = {z}"
            )));
        }
        Ok(probability.clamp(0.0, 1.0))
    }

    fn model_name(&self) -> &str {
        &self.params.name
    }
}
