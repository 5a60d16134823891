//! Core types: worker telemetry schema, risk results, incidents, advisory levels.
//!
//! The wire format follows the upstream telemetry collectors: camelCase field
//! names, every leaf field independently optional, unknown fields ignored.

mod context;
mod risk;

pub use context::{
    BadgeLocation, BadgeTelemetry, ResolvedTelemetry, ScadaContext, VisionTelemetry,
    WorkerContext, WorkerProfile,
};
pub use risk::{
    AdvisoryLevel, Incident, IncidentLikelihood, IncidentPrediction, RiskResult, RuleOutcome,
    WorkerInsights,
};
