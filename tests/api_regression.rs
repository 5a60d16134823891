//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! the /api/v1/* endpoints using `tower::ServiceExt::oneshot()`.
//! No binary spawn, no network port — runs in CI without `#[ignore]`.

use std::sync::Arc;

use suraksha_engine::api::{create_app, EngineState};
use suraksha_engine::classifier::LogisticModel;
use suraksha_engine::config::SafetyConfig;
use suraksha_engine::memory::IncidentMemory;
use suraksha_engine::pipeline::RiskPipeline;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

fn state_with_model() -> EngineState {
    let pipeline = Arc::new(RiskPipeline::new(
        &SafetyConfig::default(),
        Some(Arc::new(LogisticModel::default())),
    ));
    EngineState::new(pipeline, Arc::new(IncidentMemory::new()))
}

fn state_without_model() -> EngineState {
    let pipeline = Arc::new(RiskPipeline::new(&SafetyConfig::default(), None));
    EngineState::new(pipeline, Arc::new(IncidentMemory::new()))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_predict_sos_returns_rule_ceiling() {
    let app = create_app(state_with_model());

    let response = app
        .oneshot(post(
            "/api/v1/predict",
            r#"{"workerId": "WKR-2401-M", "badgeTelemetry": {"sosActive": true}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let v = body_json(response).await;
    assert_eq!(v["data"]["riskScore"], 100);
    assert_eq!(v["data"]["level"], "CRITICAL");
    assert_eq!(v["data"]["modelUsed"], "Rule_Engine_v1");
    assert_eq!(v["data"]["topRiskFactors"][0], "SOS Button Activated");
    assert_eq!(v["meta"]["version"], "1");
}

#[tokio::test]
async fn test_predict_default_context_is_safe() {
    let app = create_app(state_with_model());

    let response = app
        .oneshot(post("/api/v1/predict", r#"{"workerId": "WKR-2402-M"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let v = body_json(response).await;
    assert_eq!(v["data"]["level"], "SAFE");
    // Scorer output is clamped below the rule-engine ceiling.
    let risk = v["data"]["riskScore"].as_u64().unwrap();
    assert!(risk <= 95);
    assert!(v["data"]["advisoryHinglish"].as_str().unwrap().contains("Sab theek hai"));
}

#[tokio::test]
async fn test_predict_malformed_body_is_bad_request() {
    let app = create_app(state_with_model());

    let response = app
        .oneshot(post("/api/v1/predict", r#"{"noWorkerId": true}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let v = body_json(response).await;
    assert_eq!(v["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_predict_without_model_is_service_unavailable() {
    let app = create_app(state_without_model());

    let response = app
        .oneshot(post("/api/v1/predict", r#"{"workerId": "WKR-2403-F"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let v = body_json(response).await;
    assert_eq!(v["error"]["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_rule_path_survives_missing_model() {
    // SOS must be assessed even when the classifier artifact is broken.
    let app = create_app(state_without_model());

    let response = app
        .oneshot(post(
            "/api/v1/predict",
            r#"{"workerId": "WKR-2404-M", "badgeTelemetry": {"fallDetected": true}}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let v = body_json(response).await;
    assert_eq!(v["data"]["riskScore"], 100);
    assert_eq!(v["data"]["topRiskFactors"][0], "Fall Detected");
}

#[tokio::test]
async fn test_incident_flow_and_insights() {
    let state = state_with_model();

    let response = create_app(state.clone())
        .oneshot(post(
            "/api/v1/incidents",
            r#"{"workerId": "W1", "risk": 30, "zone": "Assembly"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = create_app(state.clone())
        .oneshot(post(
            "/api/v1/incidents",
            r#"{"workerId": "W1", "risk": 95, "zone": "Furnace-A"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let v = body_json(response).await;
    // Risk 95 triggers the full escalation band.
    assert_eq!(v["data"]["actions"].as_array().unwrap().len(), 3);

    let response = create_app(state)
        .oneshot(
            Request::builder()
                .uri("/api/v1/insights/W1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let v = body_json(response).await;
    assert_eq!(v["data"]["total_incidents"], 2);
    assert_eq!(v["data"]["avg_risk"], 62.5);
    assert_eq!(v["data"]["prediction"]["prediction"], "CRITICAL");
}

#[tokio::test]
async fn test_insights_for_unknown_worker() {
    let app = create_app(state_with_model());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/insights/NOBODY")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let v = body_json(response).await;
    assert_eq!(v["data"]["total_incidents"], 0);
    assert_eq!(v["data"]["avg_risk"], 0.0);
    assert_eq!(v["data"]["prediction"]["prediction"], "LOW");
    assert_eq!(v["data"]["prediction"]["confidence"], 90);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_app(state_with_model());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
