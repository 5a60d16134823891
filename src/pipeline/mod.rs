//! Risk Pipeline
//!
//! Hybrid control flow for one assessment:
//! telemetry → rule engine (may short-circuit) → classifier probability →
//! progressive scorer → advisory mapper → [`RiskResult`].
//!
//! The pipeline owns no state across calls; each evaluation is an independent
//! synchronous decision. The classifier is never invoked when a hazard-chain
//! rule fires.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::advisory::advisory_for;
use crate::classifier::{ClassifierError, FeatureVector, RiskClassifier};
use crate::config::{RuleThresholds, ScoringThresholds, SafetyConfig};
use crate::rules::run_hazard_chain;
use crate::scoring::progressive_score;
use crate::types::{RiskResult, WorkerContext};

/// Errors surfaced to the API layer from one evaluation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The scoring path requires a classifier and none is loaded or it failed.
    /// The rule-engine path is unaffected by this condition.
    #[error("risk model unavailable: {0}")]
    ModelUnavailable(String),

    /// Malformed top-level request; surfaced to the caller, not retried.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unexpected internal fault, logged with full context upstream.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Stateless evaluation pipeline. Cheap to clone behind an `Arc`.
pub struct RiskPipeline {
    classifier: Option<Arc<dyn RiskClassifier>>,
    rules: RuleThresholds,
    scoring: ScoringThresholds,
}

impl RiskPipeline {
    /// Build a pipeline from config thresholds and an optional classifier.
    ///
    /// A pipeline without a classifier still serves the rule-engine path;
    /// scoring requests fail with [`EngineError::ModelUnavailable`].
    pub fn new(config: &SafetyConfig, classifier: Option<Arc<dyn RiskClassifier>>) -> Self {
        if classifier.is_none() {
            warn!("No classifier loaded — only the rule-engine path will serve requests");
        }
        Self {
            classifier,
            rules: config.rules.clone(),
            scoring: config.scoring.clone(),
        }
    }

    /// Run the full hybrid assessment for one worker context.
    pub fn evaluate(&self, ctx: &WorkerContext) -> Result<RiskResult, EngineError> {
        // Deterministic hazard chains first; a hit bypasses the model entirely.
        if let Some(outcome) = run_hazard_chain(ctx, &self.rules) {
            info!(
                worker_id = %ctx.worker_id,
                risk_score = outcome.risk_score,
                reason = outcome.reason,
                "Hazard-chain rule triggered"
            );
            let (level, advisory) = advisory_for(outcome.risk_score);
            return Ok(RiskResult {
                worker_id: ctx.worker_id.clone(),
                risk: outcome.risk_score,
                risk_score: outcome.risk_score,
                level,
                confidence: 100.0,
                top_risk_factors: vec![outcome.reason.to_string()],
                advisory_hinglish: advisory.to_string(),
                model_used: outcome.source.to_string(),
                timestamp: Utc::now().to_rfc3339(),
            });
        }

        // Learned path: classifier probability + progressive penalties.
        let classifier = self.classifier.as_deref().ok_or_else(|| {
            EngineError::ModelUnavailable("classifier artifact is not loaded".to_string())
        })?;

        let resolved = ctx.resolve();
        let features = FeatureVector::from(&resolved);
        let probability = classifier.predict_probability(&features).map_err(|e| {
            error!(worker_id = %ctx.worker_id, error = %e, "Classifier prediction failed");
            match e {
                ClassifierError::Prediction(msg) => EngineError::Internal(msg),
                other => EngineError::ModelUnavailable(other.to_string()),
            }
        })?;

        let breakdown = progressive_score(
            &resolved,
            ctx.vision_telemetry.missing_items(),
            probability,
            &self.scoring,
        );

        let (level, advisory) = advisory_for(breakdown.final_score);
        info!(
            worker_id = %ctx.worker_id,
            base_score = breakdown.base_score,
            progressive_bonus = breakdown.progressive_bonus,
            final_score = breakdown.final_score,
            %level,
            "Risk assessment complete"
        );

        Ok(RiskResult {
            worker_id: ctx.worker_id.clone(),
            risk: breakdown.final_score,
            risk_score: breakdown.final_score,
            level,
            confidence: 100.0,
            top_risk_factors: breakdown.top_factors,
            advisory_hinglish: advisory.to_string(),
            model_used: classifier.model_name().to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AdvisoryLevel;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic classifier stub returning a fixed probability and
    /// counting invocations.
    struct StubClassifier {
        probability: f64,
        calls: AtomicUsize,
    }

    impl StubClassifier {
        fn new(probability: f64) -> Self {
            Self {
                probability,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl RiskClassifier for StubClassifier {
        fn predict_probability(&self, _: &FeatureVector) -> Result<f64, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.probability)
        }

        fn model_name(&self) -> &str {
            "Stub_v1"
        }
    }

    struct FailingClassifier;

    impl RiskClassifier for FailingClassifier {
        fn predict_probability(&self, _: &FeatureVector) -> Result<f64, ClassifierError> {
            Err(ClassifierError::Prediction("NaN output".to_string()))
        }

        fn model_name(&self) -> &str {
            "Failing_v1"
        }
    }

    fn pipeline_with(probability: f64) -> (RiskPipeline, Arc<StubClassifier>) {
        let stub = Arc::new(StubClassifier::new(probability));
        let pipeline = RiskPipeline::new(
            &SafetyConfig::default(),
            Some(Arc::clone(&stub) as Arc<dyn RiskClassifier>),
        );
        (pipeline, stub)
    }

    fn context(json: &str) -> WorkerContext {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_rule_path_never_invokes_classifier() {
        let (pipeline, stub) = pipeline_with(0.9);
        let ctx = context(r#"{"workerId": "W1", "badgeTelemetry": {"sosActive": true}}"#);

        let result = pipeline.evaluate(&ctx).unwrap();
        assert_eq!(result.risk_score, 100);
        assert_eq!(result.level, AdvisoryLevel::Critical);
        assert_eq!(result.model_used, "Rule_Engine_v1");
        assert_eq!(result.top_risk_factors, ["SOS Button Activated"]);
        assert_eq!(result.confidence, 100.0);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_scoring_path_uses_classifier() {
        let (pipeline, stub) = pipeline_with(0.0);
        let ctx = context(r#"{"workerId": "W1"}"#);

        let result = pipeline.evaluate(&ctx).unwrap();
        // Compliant defaults with probability 0.0 floor at 12 → SAFE.
        assert_eq!(result.risk_score, 12);
        assert_eq!(result.level, AdvisoryLevel::Safe);
        assert_eq!(result.model_used, "Stub_v1");
        assert_eq!(result.advisory_hinglish, "Sab theek hai, safe raho");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_scorer_output_stays_below_rule_ceiling() {
        let (pipeline, _) = pipeline_with(1.0);
        let ctx = context(
            r#"{
                "workerId": "W1",
                "badgeTelemetry": {"hr": 129, "spo2": 70, "skinTemp": 42.0},
                "visionTelemetry": {"isCompliant": false},
                "scadaContext": {"ambientGasPpm": 74, "zoneTemp": 39},
                "workerProfile": {"shiftDurationHours": 14.0, "pastIncidentCount": 9}
            }"#,
        );

        let result = pipeline.evaluate(&ctx).unwrap();
        assert_eq!(result.risk_score, 95);
        assert_eq!(result.level, AdvisoryLevel::Critical);
    }

    #[test]
    fn test_no_classifier_is_service_unavailable() {
        let pipeline = RiskPipeline::new(&SafetyConfig::default(), None);
        let ctx = context(r#"{"workerId": "W1"}"#);

        let err = pipeline.evaluate(&ctx).unwrap_err();
        assert!(matches!(err, EngineError::ModelUnavailable(_)));
    }

    #[test]
    fn test_rule_path_works_without_classifier() {
        let pipeline = RiskPipeline::new(&SafetyConfig::default(), None);
        let ctx = context(r#"{"workerId": "W1", "badgeTelemetry": {"fallDetected": true}}"#);

        let result = pipeline.evaluate(&ctx).unwrap();
        assert_eq!(result.risk_score, 100);
        assert_eq!(result.top_risk_factors, ["Fall Detected"]);
    }

    #[test]
    fn test_classifier_fault_is_internal_error() {
        let pipeline = RiskPipeline::new(
            &SafetyConfig::default(),
            Some(Arc::new(FailingClassifier)),
        );
        let ctx = context(r#"{"workerId": "W1"}"#);

        let err = pipeline.evaluate(&ctx).unwrap_err();
        assert!(matches!(err, EngineError::Internal(_)));
    }

    #[test]
    fn test_missing_items_appear_in_factors() {
        let (pipeline, _) = pipeline_with(0.0);
        let ctx = context(
            r#"{
                "workerId": "W1",
                "visionTelemetry": {"isCompliant": false, "missingItems": ["hardhat"]}
            }"#,
        );

        let result = pipeline.evaluate(&ctx).unwrap();
        assert_eq!(result.top_risk_factors[0], "PPE Violation (+45%)");
        assert_eq!(result.top_risk_factors[1], "Missing: hardhat");
    }
}
