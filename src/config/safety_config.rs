//! Safety Configuration - All rule and scoring thresholds as operator-tunable TOML values
//!
//! Every threshold used by the hazard-chain rule engine and the progressive
//! scorer is a field in this module. Each struct implements `Default` with
//! values matching the reference deployment, ensuring zero-change behavior
//! when no config file is present.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a site deployment.
///
/// Load with `SafetyConfig::load()` which searches:
/// 1. `$SURAKSHA_CONFIG` env var
/// 2. `./safety_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Site identification
    #[serde(default)]
    pub site: SiteInfo,

    /// Hazard-chain rule thresholds
    #[serde(default)]
    pub rules: RuleThresholds,

    /// Progressive scorer thresholds, steps and caps
    #[serde(default)]
    pub scoring: ScoringThresholds,

    /// Pretrained classifier artifact
    #[serde(default)]
    pub model: ModelConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl SafetyConfig {
    /// Load configuration using the standard search order.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("SURAKSHA_CONFIG") {
            match Self::load_from(&path) {
                Ok(config) => {
                    info!(path = %path, "Loaded safety config from SURAKSHA_CONFIG");
                    return config;
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "Failed to load SURAKSHA_CONFIG, falling back");
                }
            }
        }

        let local = Path::new("safety_config.toml");
        if local.exists() {
            match Self::load_from(local) {
                Ok(config) => {
                    info!("Loaded safety config from ./safety_config.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse ./safety_config.toml, using defaults");
                }
            }
        }

        info!("No safety config file found, using built-in defaults");
        Self::default()
    }

    /// Load configuration from an explicit TOML file path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        Ok(config)
    }
}

// ============================================================================
// Site / Server
// ============================================================================

/// Site identification for logging and dashboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    pub site_id: String,
    pub site_name: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            site_id: "SITE-01".to_string(),
            site_name: "Unnamed Plant".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the API server
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Pretrained classifier artifact configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to a TOML file with logistic model parameters.
    /// When unset, the built-in offline-fitted coefficients are used.
    pub path: Option<String>,
}

// ============================================================================
// Rule Engine Thresholds
// ============================================================================

/// Thresholds for the deterministic hazard-chain rules.
///
/// Rule order and scores are fixed (they encode priority); only the sensor
/// trigger levels are tunable per site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    /// Gas level above which the gas+temp hazard chain fires (ppm)
    pub gas_critical_ppm: i64,
    /// Zone temperature for the gas+temp hazard chain (°C)
    pub zone_temp_critical_c: i64,
    /// Heart rate for the heat-stroke chain (bpm)
    pub heat_stroke_hr: i64,
    /// Skin temperature for the heat-stroke chain (°C)
    pub heat_stroke_skin_temp_c: f64,
    /// Shift duration for the heat-stroke chain (hours)
    pub heat_stroke_shift_hours: f64,
    /// Fatigue score above which the fatigue+PPE chain fires (0.0-1.0)
    pub fatigue_threshold: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            gas_critical_ppm: 75,
            zone_temp_critical_c: 40,
            heat_stroke_hr: 130,
            heat_stroke_skin_temp_c: 38.5,
            heat_stroke_shift_hours: 6.0,
            fatigue_threshold: 0.7,
        }
    }
}

// ============================================================================
// Progressive Scorer Thresholds
// ============================================================================

/// Thresholds, per-step penalties and caps for the progressive scorer.
///
/// The bucketed terms use truncating integer division on the stated units;
/// the step sizes here feed directly into that arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringThresholds {
    /// Flat penalty for PPE non-compliance
    pub ppe_penalty: i64,

    /// Heart rate threshold (bpm) and bucket parameters
    pub hr_threshold: i64,
    pub hr_step_bpm: i64,
    pub hr_step_penalty: i64,
    pub hr_cap: i64,

    /// Skin temperature threshold (°C), per-degree penalty and cap
    pub skin_temp_threshold_c: f64,
    pub skin_temp_per_degree: f64,
    pub skin_temp_cap: i64,

    /// Shift duration threshold (hours), per-hour penalty and cap
    pub shift_threshold_hours: f64,
    pub shift_per_hour: f64,
    pub shift_cap: i64,

    /// Ambient gas threshold (ppm) and bucket parameters
    pub gas_threshold_ppm: i64,
    pub gas_step_ppm: i64,
    pub gas_step_penalty: i64,
    pub gas_cap: i64,

    /// Zone temperature threshold (°C) and bucket parameters
    pub zone_temp_threshold_c: i64,
    pub zone_temp_step_c: i64,
    pub zone_temp_step_penalty: i64,
    pub zone_temp_cap: i64,

    /// SpO2 threshold (%) and per-point penalty (uncapped)
    pub spo2_threshold: i64,
    pub spo2_per_point: i64,

    /// Per-incident history penalty and cap
    pub incident_penalty: i64,
    pub incident_cap: i64,

    /// Blend weights: final = round(base*ml_weight) + round(bonus*progressive_weight)
    pub ml_weight: f64,
    pub progressive_weight: f64,

    /// Minimum score for a PPE-compliant worker (baseline industrial risk)
    pub baseline_floor: i64,
    /// Maximum scorer output; 100 is reserved for the rule-engine SOS/fall ceiling
    pub max_score: i64,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            ppe_penalty: 45,
            hr_threshold: 100,
            hr_step_bpm: 5,
            hr_step_penalty: 5,
            hr_cap: 25,
            skin_temp_threshold_c: 37.5,
            skin_temp_per_degree: 15.0,
            skin_temp_cap: 30,
            shift_threshold_hours: 7.0,
            shift_per_hour: 6.0,
            shift_cap: 20,
            gas_threshold_ppm: 45,
            gas_step_ppm: 3,
            gas_step_penalty: 2,
            gas_cap: 20,
            zone_temp_threshold_c: 40,
            zone_temp_step_c: 5,
            zone_temp_step_penalty: 3,
            zone_temp_cap: 15,
            spo2_threshold: 95,
            spo2_per_point: 3,
            incident_penalty: 8,
            incident_cap: 25,
            ml_weight: 0.3,
            progressive_weight: 0.7,
            baseline_floor: 12,
            max_score: 95,
        }
    }
}
