//! Risk output types: advisory levels, rule outcomes, final results, and the
//! incident-memory records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Advisory Levels
// ============================================================================

/// Discrete risk band derived purely from the final score.
///
/// Ordering is meaningful: `Safe < Caution < Warning < High < Critical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdvisoryLevel {
    Safe,
    Caution,
    Warning,
    High,
    Critical,
}

impl std::fmt::Display for AdvisoryLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Caution => write!(f, "CAUTION"),
            Self::Warning => write!(f, "WARNING"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ============================================================================
// Rule Engine Output
// ============================================================================

/// Result of a triggered hazard-chain rule.
///
/// A rule hit fully overrides the learned scorer; absence of an outcome means
/// "defer to the progressive scorer".
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Overriding risk score (0-100; 100 is reserved for SOS/fall)
    pub risk_score: u8,
    /// Human-readable trigger description
    pub reason: &'static str,
    /// Source tag reported as `modelUsed` in the response
    pub source: &'static str,
}

// ============================================================================
// Final Risk Result
// ============================================================================

/// Final output of one risk assessment, returned to dashboards and actuators.
///
/// `risk` and `riskScore` carry the same value; both names are kept for
/// backward compatibility with existing dashboard consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub worker_id: String,
    pub risk: u8,
    pub risk_score: u8,
    pub level: AdvisoryLevel,
    pub confidence: f64,
    /// Up to 3 contributing factors, in evaluation order
    pub top_risk_factors: Vec<String>,
    pub advisory_hinglish: String,
    pub model_used: String,
    pub timestamp: String,
}

// ============================================================================
// Incident Memory
// ============================================================================

/// One append-only incident record. Never mutated after creation; lifetime is
/// the process lifetime (RAM-only store, no persistence).
#[derive(Debug, Clone, Serialize)]
pub struct Incident {
    pub worker_id: String,
    pub timestamp: DateTime<Utc>,
    pub risk_score: u8,
    pub zone: String,
}

/// Heuristic likelihood of the next incident for a worker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum IncidentLikelihood {
    Low,
    Medium,
    Critical,
}

/// Recency-based trend prediction. A placeholder heuristic, not a forecast —
/// it inspects only the most recent stored incident.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IncidentPrediction {
    pub prediction: IncidentLikelihood,
    /// Confidence in percent
    pub confidence: u8,
    pub recommendation: &'static str,
    pub time_until_hours: f64,
}

/// Aggregated incident history for one worker.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerInsights {
    pub worker_id: String,
    pub total_incidents: usize,
    /// Arithmetic mean risk score, rounded to one decimal
    pub avg_risk: f64,
    pub prediction: IncidentPrediction,
}
