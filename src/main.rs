//! SurakshaMesh Intelligence Engine - Worker Safety Operational Intelligence
//!
//! Real-time hybrid risk assessment for unified worker-context telemetry.
//!
//! # Usage
//!
//! ```bash
//! # Run with built-in classifier parameters
//! cargo run --release
//!
//! # Run with a retrained classifier artifact
//! SURAKSHA_CONFIG=./safety_config.toml cargo run --release
//! ```
//!
//! # Environment Variables
//!
//! - `SURAKSHA_CONFIG`: Path to the safety config TOML file
//! - `RUST_LOG`: Logging level (default: info)

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use suraksha_engine::api::{create_app, EngineState};
use suraksha_engine::classifier::{LogisticModel, RiskClassifier};
use suraksha_engine::config::SafetyConfig;
use suraksha_engine::memory::IncidentMemory;
use suraksha_engine::pipeline::RiskPipeline;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "suraksha-engine")]
#[command(about = "SurakshaMesh Worker Safety Intelligence Engine")]
#[command(version)]
struct CliArgs {
    /// Override the server bind address (default from config: "0.0.0.0:8000")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to the safety config TOML file (overrides SURAKSHA_CONFIG)
    #[arg(long)]
    config: Option<String>,
}

// ============================================================================
// Classifier Loading
// ============================================================================

/// Load the classifier artifact configured for this site.
///
/// A load failure does not abort startup: the rule-engine path must stay
/// available even when the model artifact is broken, so the engine comes up
/// degraded and scoring requests fail with SERVICE_UNAVAILABLE.
fn load_classifier(config: &SafetyConfig) -> Option<Arc<dyn RiskClassifier>> {
    match &config.model.path {
        Some(path) => match LogisticModel::load(path) {
            Ok(model) => Some(Arc::new(model)),
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to load classifier artifact — scoring path disabled");
                None
            }
        },
        None => {
            info!("Using built-in classifier parameters");
            Some(Arc::new(LogisticModel::default()))
        }
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let safety_config = match &args.config {
        Some(path) => SafetyConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => SafetyConfig::load(),
    };

    info!(
        site_id = %safety_config.site.site_id,
        site_name = %safety_config.site.site_name,
        "SurakshaMesh Intelligence Engine starting"
    );

    let classifier = load_classifier(&safety_config);
    if let Some(model) = &classifier {
        info!(model = model.model_name(), "Classifier ready");
    }

    let pipeline = Arc::new(RiskPipeline::new(&safety_config, classifier));
    let memory = Arc::new(IncidentMemory::new());
    let state = EngineState::new(pipeline, memory);

    let addr = args
        .addr
        .unwrap_or_else(|| safety_config.server.addr.clone());

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind server address {addr}"))?;

    info!(%addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("Shutdown complete");
    Ok(())
}

/// Resolve on Ctrl-C so in-flight requests can drain.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl-C handler");
    }
    info!("Shutdown signal received");
}
