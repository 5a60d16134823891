//! API route handlers
//!
//! Request handling logic for the three logical message types:
//! - telemetry → risk-result (`POST /api/v1/predict`)
//! - simulate-incident → {incident-recorded, actions} (`POST /api/v1/incidents`)
//! - get-insights → insights-record (`GET /api/v1/insights/:worker_id`)

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::memory::{autonomous_actions, IncidentMemory};
use crate::pipeline::{EngineError, RiskPipeline};

use super::envelope::ApiResponse;

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers.
#[derive(Clone)]
pub struct EngineState {
    /// Stateless risk evaluation pipeline
    pub pipeline: Arc<RiskPipeline>,
    /// The only mutable shared state: the in-process incident log
    pub memory: Arc<IncidentMemory>,
    /// Process start, for the liveness probe
    pub started_at: Instant,
}

impl EngineState {
    pub fn new(pipeline: Arc<RiskPipeline>, memory: Arc<IncidentMemory>) -> Self {
        Self {
            pipeline,
            memory,
            started_at: Instant::now(),
        }
    }
}

// ============================================================================
// Risk Prediction
// ============================================================================

/// POST /api/v1/predict - full hybrid risk assessment for one worker context.
pub async fn predict_risk(
    State(state): State<EngineState>,
    payload: Result<Json<crate::types::WorkerContext>, JsonRejection>,
) -> Response {
    let Json(ctx) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected malformed telemetry request");
            return EngineError::BadRequest(rejection.body_text()).into();
        }
    };

    match state.pipeline.evaluate(&ctx) {
        Ok(result) => ApiResponse::ok(result),
        Err(err) => err.into(),
    }
}

// ============================================================================
// Incident Recording
// ============================================================================

/// Body of a simulate-incident request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRequest {
    pub worker_id: String,
    pub risk: u8,
    #[serde(default)]
    pub zone: Option<String>,
}

/// Confirmation returned after an incident is recorded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecorded {
    pub worker_id: String,
    pub risk: u8,
    pub actions: Vec<String>,
}

/// POST /api/v1/incidents - append an incident and report simulated actions.
pub async fn record_incident(
    State(state): State<EngineState>,
    payload: Result<Json<IncidentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected malformed incident request");
            return EngineError::BadRequest(rejection.body_text()).into();
        }
    };

    let zone = request.zone.unwrap_or_else(|| "UNKNOWN".to_string());
    info!(worker_id = %request.worker_id, risk = request.risk, zone = %zone, "Processing incident");

    state
        .memory
        .remember(&request.worker_id, request.risk, &zone)
        .await;
    let actions = autonomous_actions(&request.worker_id, request.risk);

    ApiResponse::ok(IncidentRecorded {
        worker_id: request.worker_id,
        risk: request.risk,
        actions,
    })
}

// ============================================================================
// Worker Insights
// ============================================================================

/// GET /api/v1/insights/:worker_id - incident history and trend prediction.
pub async fn get_insights(
    State(state): State<EngineState>,
    Path(worker_id): Path<String>,
) -> Response {
    let insights = state.memory.get_insights(&worker_id).await;
    ApiResponse::ok(insights)
}

// ============================================================================
// Liveness
// ============================================================================

/// Legacy root-level health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
}

/// GET /health - liveness probe.
pub async fn health_check(State(state): State<EngineState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "SurakshaMesh Intelligence Engine is Online",
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SafetyConfig;

    fn create_test_state() -> EngineState {
        let pipeline = Arc::new(RiskPipeline::new(
            &SafetyConfig::default(),
            Some(Arc::new(crate::classifier::LogisticModel::default())),
        ));
        EngineState::new(pipeline, Arc::new(IncidentMemory::new()))
    }

    #[tokio::test]
    async fn test_health_check() {
        let state = create_test_state();
        let response = health_check(State(state)).await;
        assert_eq!(response.status, "SurakshaMesh Intelligence Engine is Online");
    }

    #[tokio::test]
    async fn test_incident_roundtrip_through_handlers() {
        let state = create_test_state();

        let request = IncidentRequest {
            worker_id: "W1".to_string(),
            risk: 85,
            zone: Some("Furnace-A".to_string()),
        };
        let response =
            record_incident(State(state.clone()), Ok(Json(request))).await;
        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let insights = state.memory.get_insights("W1").await;
        assert_eq!(insights.total_incidents, 1);
    }
}
