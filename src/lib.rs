//! SurakshaMesh Intelligence Engine: Worker Safety Operational Intelligence
//!
//! Hybrid risk-scoring pipeline for simulated worker-safety telemetry
//! (wearable vitals, SCADA environment, vision PPE compliance).
//!
//! ## Architecture
//!
//! - **Hazard-Chain Rule Engine**: deterministic, ordered fact-checks that can
//!   fully override the learned scorer
//! - **Progressive Risk Scorer**: classifier probability blended with capped
//!   additive situational penalties into one bounded score
//! - **Advisory Mapper**: score → discrete risk level + fixed guidance string
//! - **Incident Memory**: RAM-only append-only incident log with a recency
//!   heuristic trend predictor

pub mod advisory;
pub mod api;
pub mod classifier;
pub mod config;
pub mod memory;
pub mod pipeline;
pub mod rules;
pub mod scoring;
pub mod types;

// Re-export safety configuration
pub use config::SafetyConfig;

// Re-export commonly used types
pub use types::{
    AdvisoryLevel, Incident, IncidentLikelihood, IncidentPrediction, ResolvedTelemetry,
    RiskResult, RuleOutcome, WorkerContext, WorkerInsights,
};

// Re-export the classifier boundary
pub use classifier::{ClassifierError, FeatureVector, LogisticModel, RiskClassifier};

// Re-export pipeline and memory
pub use memory::IncidentMemory;
pub use pipeline::{EngineError, RiskPipeline};
