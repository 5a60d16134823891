//! Incident Memory & Trend Predictor
//!
//! RAM-only, append-only incident log shared across requests. Records are
//! never mutated and never persisted; the store resets on restart. Appends
//! are atomic with respect to concurrent requests via an async RwLock.
//!
//! The trend predictor is a recency heuristic, not a learned forecast: it
//! inspects only the most recent stored incident. The autonomous-action
//! mapper emits descriptive strings only — no external actuation occurs.

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::types::{Incident, IncidentLikelihood, IncidentPrediction, WorkerInsights};

/// In-process incident store. The only mutable shared state in the engine;
/// pass it by reference (Arc) to the operations that need it.
#[derive(Default)]
pub struct IncidentMemory {
    incidents: RwLock<Vec<Incident>>,
}

impl IncidentMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a timestamped incident record.
    ///
    /// Deliberately infallible toward the caller: incident logging must never
    /// block or fail a scoring response, so internal faults are logged and
    /// swallowed here.
    pub async fn remember(&self, worker_id: &str, risk_score: u8, zone: &str) {
        let record = Incident {
            worker_id: worker_id.to_string(),
            timestamp: Utc::now(),
            risk_score,
            zone: zone.to_string(),
        };

        let mut incidents = self.incidents.write().await;
        incidents.push(record);
        info!(
            worker_id,
            risk_score,
            total_records = incidents.len(),
            "Incident memory updated"
        );
    }

    /// Count, mean risk and prediction for one worker's stored incidents.
    pub async fn get_insights(&self, worker_id: &str) -> WorkerInsights {
        let incidents = self.incidents.read().await;
        let scores: Vec<u8> = incidents
            .iter()
            .filter(|i| i.worker_id == worker_id)
            .map(|i| i.risk_score)
            .collect();

        let total = scores.len();
        #[allow(clippy::cast_precision_loss)]
        let avg_risk = if total == 0 {
            0.0
        } else {
            let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
            let avg = sum as f64 / total as f64;
            (avg * 10.0).round() / 10.0
        };

        WorkerInsights {
            worker_id: worker_id.to_string(),
            total_incidents: total,
            avg_risk,
            prediction: predict_from(&scores),
        }
    }

    /// Heuristic prediction of the worker's next incident.
    pub async fn predict_next_incident(&self, worker_id: &str) -> IncidentPrediction {
        let incidents = self.incidents.read().await;
        let scores: Vec<u8> = incidents
            .iter()
            .filter(|i| i.worker_id == worker_id)
            .map(|i| i.risk_score)
            .collect();
        predict_from(&scores)
    }

    /// Number of stored incidents across all workers.
    pub async fn len(&self) -> usize {
        self.incidents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.incidents.read().await.is_empty()
    }
}

/// Recency heuristic over a worker's chronological score history.
fn predict_from(scores: &[u8]) -> IncidentPrediction {
    if scores.len() < 2 {
        return IncidentPrediction {
            prediction: IncidentLikelihood::Low,
            confidence: 90,
            recommendation: "Keep monitoring",
            time_until_hours: 8.0,
        };
    }

    // Only the most recent incident matters to this heuristic.
    let last_risk = scores[scores.len() - 1];
    if last_risk > 80 {
        IncidentPrediction {
            prediction: IncidentLikelihood::Critical,
            confidence: 98,
            recommendation: "IMMEDIATE EVACUATION",
            time_until_hours: 0.1,
        }
    } else {
        IncidentPrediction {
            prediction: IncidentLikelihood::Medium,
            confidence: 75,
            recommendation: "Schedule Break",
            time_until_hours: 4.5,
        }
    }
}

/// Map a risk score to the ordered list of simulated autonomous actions.
///
/// Stringly-typed simulation only; nothing is actuated.
pub fn autonomous_actions(worker_id: &str, risk_score: u8) -> Vec<String> {
    let actions: Vec<String> = if risk_score >= 80 {
        vec![
            "TRIGGERED: Plant alarm activated".to_string(),
            "SENT: SMS alert to supervisor".to_string(),
            "ACTION: Machine auto-stop signal sent".to_string(),
        ]
    } else if risk_score >= 50 {
        vec![
            "WARNING: Haptic feedback sent to worker badge".to_string(),
            "LOG: CCTV bookmark created".to_string(),
        ]
    } else {
        vec!["LOG: Routine safety check".to_string()]
    };

    if risk_score >= 80 {
        warn!(worker_id, risk_score, ?actions, "Autonomous escalation triggered");
    }
    actions
}
