//! Classifier Boundary
//!
//! The progressive scorer consumes one probability from a pretrained binary
//! classifier. That classifier is a replaceable artifact behind the
//! [`RiskClassifier`] trait, so scoring logic is testable with a deterministic
//! stub and the trained model can be swapped without touching the pipeline.
//!
//! The shipped implementation is a logistic-regression model with coefficients
//! fitted offline on the same 9 features (in the same order) as the reference
//! system's gradient-boosted classifier. Coefficients can be overridden from a
//! TOML parameter file (`[model] path` in the safety config) for retrained
//! artifacts.

mod logistic;

pub use logistic::{LogisticModel, LogisticParams};

use crate::types::ResolvedTelemetry;
use thiserror::Error;

/// Number of model input features.
pub const FEATURE_COUNT: usize = 9;

/// Feature names in training order. The order is part of the model contract.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "hr",
    "spo2",
    "skinTemp",
    "ambientGasPpm",
    "zoneTemp",
    "ppeCompliant",
    "shiftDurationHours",
    "pastIncidentCount",
    "age",
];

/// Errors from the classifier boundary.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to read model parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model parameter file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("model produced an invalid probability: {0}")]
    Prediction(String),
}

/// Ordered numeric feature vector, assembled from default-filled telemetry.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl From<&ResolvedTelemetry> for FeatureVector {
    #[allow(clippy::cast_precision_loss)]
    fn from(t: &ResolvedTelemetry) -> Self {
        Self([
            t.hr as f64,
            t.spo2 as f64,
            t.skin_temp,
            t.ambient_gas_ppm as f64,
            t.zone_temp as f64,
            f64::from(u8::from(t.ppe_compliant)),
            t.shift_duration_hours,
            f64::from(t.past_incident_count),
            f64::from(t.age),
        ])
    }
}

/// Capability trait for the pretrained binary classifier.
///
/// One operation: a probability of incident in `[0, 1]` for a feature vector.
/// Implementations must be pure and side-effect-free; failures surface as
/// explicit errors, never hangs.
pub trait RiskClassifier: Send + Sync {
    /// Predict the incident probability for one feature vector.
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError>;

    /// Model tag reported as `modelUsed` in responses.
    fn model_name(&self) -> &str;
}
