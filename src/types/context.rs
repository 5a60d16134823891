//! Unified worker context: the input record assembled by upstream telemetry
//! collectors from badge wearables, the vision service and SCADA zone sensors.
//!
//! Every leaf field is optional on the wire. Missing, `null` or wrong-typed
//! individual fields are silently defaulted rather than rejected — a badge
//! with a flaky SpO2 sensor must not take down the whole risk assessment.
//! Only a malformed top-level shape is a caller error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Lenient leaf-field deserializer: any value that does not fit the target
/// type collapses to `None` instead of failing the whole request.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// ============================================================================
// Nested telemetry groups
// ============================================================================

/// 2D badge position within the plant grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeLocation {
    #[serde(default, deserialize_with = "lenient")]
    pub x: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub y: Option<i64>,
}

impl Default for BadgeLocation {
    fn default() -> Self {
        Self {
            x: Some(10),
            y: Some(15),
        }
    }
}

/// Wearable badge vitals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeTelemetry {
    /// Heart rate in bpm
    #[serde(default, deserialize_with = "lenient")]
    pub hr: Option<i64>,
    /// Oxygen saturation %
    #[serde(default, deserialize_with = "lenient")]
    pub spo2: Option<i64>,
    /// Skin temperature in °C
    #[serde(default, deserialize_with = "lenient")]
    pub skin_temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<BadgeLocation>,
    #[serde(default, deserialize_with = "lenient")]
    pub fall_detected: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub sos_active: Option<bool>,
}

impl BadgeTelemetry {
    pub fn hr(&self) -> i64 {
        self.hr.unwrap_or(72)
    }

    pub fn spo2(&self) -> i64 {
        self.spo2.unwrap_or(99)
    }

    pub fn skin_temp(&self) -> f64 {
        self.skin_temp.unwrap_or(36.5)
    }

    pub fn fall_detected(&self) -> bool {
        self.fall_detected.unwrap_or(false)
    }

    pub fn sos_active(&self) -> bool {
        self.sos_active.unwrap_or(false)
    }
}

/// Computer-vision PPE compliance report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionTelemetry {
    /// PPE compliance verdict from the vision service
    #[serde(default, deserialize_with = "lenient")]
    pub is_compliant: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub missing_items: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub all_found_items: Option<Vec<String>>,
}

impl VisionTelemetry {
    pub fn is_compliant(&self) -> bool {
        self.is_compliant.unwrap_or(true)
    }

    pub fn missing_items(&self) -> &[String] {
        self.missing_items.as_deref().unwrap_or(&[])
    }
}

/// SCADA environmental readings for the worker's current zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScadaContext {
    /// Ambient gas in ppm
    #[serde(default, deserialize_with = "lenient")]
    pub ambient_gas_ppm: Option<i64>,
    /// Zone temperature in °C
    #[serde(default, deserialize_with = "lenient")]
    pub zone_temp: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub zone_alarm_active: Option<bool>,
}

impl ScadaContext {
    pub fn ambient_gas_ppm(&self) -> i64 {
        self.ambient_gas_ppm.unwrap_or(30)
    }

    pub fn zone_temp(&self) -> i64 {
        self.zone_temp.unwrap_or(35)
    }

    pub fn zone_alarm_active(&self) -> bool {
        self.zone_alarm_active.unwrap_or(false)
    }
}

/// Static worker profile maintained by the workforce backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    #[serde(default, deserialize_with = "lenient")]
    pub shift_duration_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub past_incident_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub age: Option<u32>,
    /// Fatigue score 0.0-1.0
    #[serde(default, deserialize_with = "lenient")]
    pub fatigue_score: Option<f64>,
}

impl WorkerProfile {
    pub fn shift_duration_hours(&self) -> f64 {
        self.shift_duration_hours.unwrap_or(6.5)
    }

    pub fn past_incident_count(&self) -> u32 {
        self.past_incident_count.unwrap_or(0)
    }

    pub fn age(&self) -> u32 {
        self.age.unwrap_or(28)
    }

    pub fn fatigue_score(&self) -> f64 {
        self.fatigue_score.unwrap_or(0.3)
    }
}

// ============================================================================
// Top-level context
// ============================================================================

/// Full input record for one risk assessment.
///
/// Only `workerId` is required; each telemetry group defaults to an empty
/// record whose accessors return the documented baseline values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerContext {
    pub worker_id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub badge_telemetry: BadgeTelemetry,
    #[serde(default)]
    pub vision_telemetry: VisionTelemetry,
    #[serde(default)]
    pub scada_context: ScadaContext,
    #[serde(default)]
    pub worker_profile: WorkerProfile,
}

impl WorkerContext {
    /// Flatten the context into the default-filled numeric record consumed by
    /// the classifier and the progressive scorer.
    pub fn resolve(&self) -> ResolvedTelemetry {
        ResolvedTelemetry {
            hr: self.badge_telemetry.hr(),
            spo2: self.badge_telemetry.spo2(),
            skin_temp: self.badge_telemetry.skin_temp(),
            ambient_gas_ppm: self.scada_context.ambient_gas_ppm(),
            zone_temp: self.scada_context.zone_temp(),
            ppe_compliant: self.vision_telemetry.is_compliant(),
            shift_duration_hours: self.worker_profile.shift_duration_hours(),
            past_incident_count: self.worker_profile.past_incident_count(),
            age: self.worker_profile.age(),
        }
    }
}

/// Default-filled numeric view of a [`WorkerContext`].
///
/// Field order matches the feature order the classifier was trained on.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTelemetry {
    pub hr: i64,
    pub spo2: i64,
    pub skin_temp: f64,
    pub ambient_gas_ppm: i64,
    pub zone_temp: i64,
    pub ppe_compliant: bool,
    pub shift_duration_hours: f64,
    pub past_incident_count: u32,
    pub age: u32,
}

impl Default for ResolvedTelemetry {
    fn default() -> Self {
        WorkerContext {
            worker_id: String::new(),
            timestamp: None,
            badge_telemetry: BadgeTelemetry::default(),
            vision_telemetry: VisionTelemetry::default(),
            scada_context: ScadaContext::default(),
            worker_profile: WorkerProfile::default(),
        }
        .resolve()
    }
}
