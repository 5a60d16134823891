//! API route definitions
//!
//! Organizes endpoints for dashboards and telemetry collectors:
//! - POST /api/v1/predict - hybrid risk assessment
//! - POST /api/v1/incidents - incident recording + simulated actions
//! - GET  /api/v1/insights/:worker_id - incident history and prediction
//! - GET  /health - legacy liveness probe

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, EngineState};

/// Create all /api/v1 routes.
pub fn api_routes(state: EngineState) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict_risk))
        .route("/incidents", post(handlers::record_incident))
        .route("/insights/:worker_id", get(handlers::get_insights))
        .with_state(state)
}

/// Legacy health endpoint at root level.
pub fn legacy_routes(state: EngineState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

/// Assemble the full application router with CORS and request tracing.
pub fn create_app(state: EngineState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        .merge(legacy_routes(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
