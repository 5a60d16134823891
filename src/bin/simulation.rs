//! Worker Telemetry Simulation
//!
//! Generates synthetic worker-context telemetry for exercising the
//! intelligence engine end-to-end without real collectors. Simulates:
//! - Normal operations (compliant workers, baseline vitals)
//! - Stressed shifts (elevated vitals, PPE violations, hot zones)
//! - Emergency events (SOS, falls, critical gas)
//!
//! # Usage
//! ```bash
//! ./simulation --count 50 --scenario mixed --seed 42
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use tracing::info;

use suraksha_engine::classifier::LogisticModel;
use suraksha_engine::config::SafetyConfig;
use suraksha_engine::memory::{autonomous_actions, IncidentMemory};
use suraksha_engine::pipeline::RiskPipeline;
use suraksha_engine::types::WorkerContext;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "worker-simulation")]
#[command(about = "Synthetic worker telemetry for SurakshaMesh engine testing")]
#[command(version = "1.0")]
struct Args {
    /// Number of telemetry records to generate
    #[arg(short, long, default_value = "20", value_parser = clap::value_parser!(u32).range(1..=10_000))]
    count: u32,

    /// Scenario to simulate: normal, stressed, emergency, mixed
    #[arg(long, default_value = "mixed")]
    scenario: String,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Also record high-risk results as incidents and print insights
    #[arg(long)]
    with_memory: bool,
}

// ============================================================================
// Scenarios
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    /// Compliant workers at baseline vitals
    Normal,
    /// Long shifts, heat, intermittent PPE violations
    Stressed,
    /// SOS, falls and critical gas chains
    Emergency,
    /// Weighted mix of all three
    Mixed,
}

impl Scenario {
    fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "normal" => Self::Normal,
            "stressed" => Self::Stressed,
            "emergency" => Self::Emergency,
            _ => Self::Mixed,
        }
    }

    /// Resolve a concrete scenario for one record.
    fn pick(self, rng: &mut StdRng) -> Self {
        if self == Self::Mixed {
            // Emergencies are rare; stressed shifts are not.
            match rng.gen_range(0..10) {
                0 => Self::Emergency,
                1..=4 => Self::Stressed,
                _ => Self::Normal,
            }
        } else {
            self
        }
    }
}

// ============================================================================
// Telemetry Generation
// ============================================================================

const ZONES: [&str; 4] = ["Furnace-A", "Assembly", "Storage", "Loading-Bay"];
const PPE_ITEMS: [&str; 3] = ["hardhat", "vest", "gloves"];

fn sample(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    Normal::new(mean, std_dev).map_or(mean, |dist| dist.sample(rng))
}

fn generate_context(rng: &mut StdRng, index: u32, scenario: Scenario) -> (WorkerContext, String) {
    let worker_id = format!("WKR-{:04}-{}", 2400 + index % 25, if index % 3 == 0 { "F" } else { "M" });
    let zone = ZONES[rng.gen_range(0..ZONES.len())].to_string();

    let (hr_mean, skin_mean, gas_mean, zone_temp_mean, shift_mean, ppe_violation_chance) =
        match scenario {
            Scenario::Normal => (76.0, 36.4, 28.0, 34.0, 5.5, 0.05),
            Scenario::Stressed => (118.0, 38.0, 55.0, 44.0, 9.5, 0.45),
            Scenario::Emergency => (142.0, 39.0, 82.0, 46.0, 8.0, 0.6),
            Scenario::Mixed => unreachable!("mixed resolves per record"),
        };

    let ppe_compliant = rng.gen_bool(1.0 - ppe_violation_chance);
    let missing: Vec<String> = if ppe_compliant {
        Vec::new()
    } else {
        vec![PPE_ITEMS[rng.gen_range(0..PPE_ITEMS.len())].to_string()]
    };

    let sos = scenario == Scenario::Emergency && rng.gen_bool(0.3);
    let fall = scenario == Scenario::Emergency && !sos && rng.gen_bool(0.2);

    let json = serde_json::json!({
        "workerId": worker_id,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "badgeTelemetry": {
            "hr": sample(rng, hr_mean, 8.0).round() as i64,
            "spo2": sample(rng, 97.0, 2.0).clamp(70.0, 100.0).round() as i64,
            "skinTemp": (sample(rng, skin_mean, 0.5) * 10.0).round() / 10.0,
            "fallDetected": fall,
            "sosActive": sos,
            "location": {"x": rng.gen_range(0..100), "y": rng.gen_range(0..100)}
        },
        "visionTelemetry": {
            "isCompliant": ppe_compliant,
            "missingItems": missing
        },
        "scadaContext": {
            "ambientGasPpm": sample(rng, gas_mean, 6.0).max(0.0).round() as i64,
            "zoneTemp": sample(rng, zone_temp_mean, 2.0).round() as i64
        },
        "workerProfile": {
            "shiftDurationHours": (sample(rng, shift_mean, 1.0).max(0.5) * 10.0).round() / 10.0,
            "pastIncidentCount": rng.gen_range(0..4),
            "age": rng.gen_range(21..58),
            "fatigueScore": (rng.gen_range(0.1..0.9) * 100.0_f64).round() / 100.0
        }
    });

    #[allow(clippy::unwrap_used)]
    let ctx: WorkerContext = serde_json::from_value(json).unwrap();
    (ctx, zone)
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

    let args = Args::parse();
    let scenario = Scenario::parse(&args.scenario);
    let mut rng = args.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    let config = SafetyConfig::default();
    let pipeline = RiskPipeline::new(&config, Some(Arc::new(LogisticModel::default())));
    let memory = IncidentMemory::new();

    info!(count = args.count, ?scenario, "Starting worker telemetry simulation");

    let mut rule_hits = 0u32;
    let mut level_counts = std::collections::BTreeMap::new();

    for index in 0..args.count {
        let record_scenario = scenario.pick(&mut rng);
        let (ctx, zone) = generate_context(&mut rng, index, record_scenario);

        match pipeline.evaluate(&ctx) {
            Ok(result) => {
                if result.model_used.starts_with("Rule_Engine") {
                    rule_hits += 1;
                }
                *level_counts.entry(result.level.to_string()).or_insert(0u32) += 1;

                info!(
                    worker_id = %result.worker_id,
                    risk = result.risk_score,
                    level = %result.level,
                    model = %result.model_used,
                    factors = ?result.top_risk_factors,
                    "Assessment"
                );

                if args.with_memory && result.risk_score >= 50 {
                    memory.remember(&result.worker_id, result.risk_score, &zone).await;
                    let actions = autonomous_actions(&result.worker_id, result.risk_score);
                    info!(worker_id = %result.worker_id, ?actions, "Simulated actions");
                }
            }
            Err(e) => {
                info!(worker_id = %ctx.worker_id, error = %e, "Assessment failed");
            }
        }
    }

    info!(
        total = args.count,
        rule_hits,
        distribution = ?level_counts,
        "Simulation complete"
    );

    if args.with_memory {
        let stored = memory.len().await;
        info!(incidents = stored, "Incident memory summary");
    }

    Ok(())
}
