//! Progressive Risk Scorer
//!
//! Blends the classifier's base probability (30%) with additive, individually
//! capped situational penalties (70%) into a final integer score in [0, 95].
//!
//! The bucketed penalty terms deliberately use truncating division on the
//! stated units (heart rate in 5-bpm buckets, gas in 3-ppm buckets, zone
//! temperature in 5-degree buckets) while the temperature and shift terms
//! truncate a float product. The per-term formulas are normative and must not
//! be unified into a single rounding scheme — dashboards and the incident
//! replay tooling depend on the exact bucket edges.

use crate::config::ScoringThresholds;
use crate::types::ResolvedTelemetry;
use tracing::debug;

/// Full output of one progressive scoring pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// `round(probability * 100)` — the classifier's contribution before weighting
    pub base_score: i64,
    /// Sum of all triggered situational penalties before weighting
    pub progressive_bonus: i64,
    /// Final blended score in [0, 95]
    pub final_score: u8,
    /// Up to 3 contributing-factor descriptions, in evaluation order
    pub top_factors: Vec<String>,
}

/// Compute the final risk score from default-filled telemetry and the
/// classifier probability.
///
/// `missing_items` is the vision service's missing-PPE list; it only adds a
/// descriptive factor, never a penalty. Pure function of its inputs; owns no
/// state across calls.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progressive_score(
    t: &ResolvedTelemetry,
    missing_items: &[String],
    probability: f64,
    cfg: &ScoringThresholds,
) -> ScoreBreakdown {
    let base_score = (probability * 100.0).round() as i64;

    let mut bonus: i64 = 0;
    let mut factors: Vec<String> = Vec::new();

    // Factor 1: PPE compliance — the single heaviest situational signal.
    if !t.ppe_compliant {
        bonus += cfg.ppe_penalty;
        factors.push(format!("PPE Violation (+{}%)", cfg.ppe_penalty));
        if !missing_items.is_empty() {
            factors.push(format!("Missing: {}", missing_items.join(", ")));
        }
        debug!(penalty = cfg.ppe_penalty, "PPE non-compliant");
    }

    // Factor 2: heart rate elevation, in 5-bpm buckets.
    if t.hr > cfg.hr_threshold {
        let excess = t.hr - cfg.hr_threshold;
        let penalty = ((excess / cfg.hr_step_bpm) * cfg.hr_step_penalty).min(cfg.hr_cap);
        bonus += penalty;
        factors.push(format!("Elevated HR: {} bpm (+{penalty}%)", t.hr));
        debug!(hr = t.hr, penalty, "Elevated heart rate");
    }

    // Factor 3: skin temperature — prorated per degree, truncated.
    if t.skin_temp > cfg.skin_temp_threshold_c {
        let excess = t.skin_temp - cfg.skin_temp_threshold_c;
        let penalty = ((excess * cfg.skin_temp_per_degree) as i64).min(cfg.skin_temp_cap);
        bonus += penalty;
        factors.push(format!("Heat Stress: {}°C (+{penalty}%)", t.skin_temp));
        debug!(skin_temp = t.skin_temp, penalty, "Heat stress");
    }

    // Factor 4: shift duration — fatigue accumulation past the threshold hour.
    if t.shift_duration_hours > cfg.shift_threshold_hours {
        let excess = t.shift_duration_hours - cfg.shift_threshold_hours;
        let penalty = ((excess * cfg.shift_per_hour) as i64).min(cfg.shift_cap);
        bonus += penalty;
        factors.push(format!(
            "Fatigue: {}h shift (+{penalty}%)",
            t.shift_duration_hours
        ));
        debug!(shift_hours = t.shift_duration_hours, penalty, "Long shift");
    }

    // Factor 5: ambient gas, in 3-ppm buckets.
    if t.ambient_gas_ppm > cfg.gas_threshold_ppm {
        let excess = t.ambient_gas_ppm - cfg.gas_threshold_ppm;
        let penalty = ((excess / cfg.gas_step_ppm) * cfg.gas_step_penalty).min(cfg.gas_cap);
        bonus += penalty;
        factors.push(format!("High Gas: {} ppm (+{penalty}%)", t.ambient_gas_ppm));
        debug!(gas_ppm = t.ambient_gas_ppm, penalty, "High gas level");
    }

    // Factor 6: zone temperature, in 5-degree buckets.
    if t.zone_temp > cfg.zone_temp_threshold_c {
        let excess = t.zone_temp - cfg.zone_temp_threshold_c;
        let penalty =
            ((excess / cfg.zone_temp_step_c) * cfg.zone_temp_step_penalty).min(cfg.zone_temp_cap);
        bonus += penalty;
        factors.push(format!("Hot Zone: {}°C (+{penalty}%)", t.zone_temp));
        debug!(zone_temp = t.zone_temp, penalty, "Hot zone");
    }

    // Factor 7: oxygen saturation — per point below threshold, uncapped
    // (bounded implicitly by the final clamp).
    if t.spo2 < cfg.spo2_threshold {
        let deficit = cfg.spo2_threshold - t.spo2;
        let penalty = deficit * cfg.spo2_per_point;
        bonus += penalty;
        factors.push(format!("Low O2: {}% SpO2 (+{penalty}%)", t.spo2));
        debug!(spo2 = t.spo2, penalty, "Low oxygen saturation");
    }

    // Factor 8: incident history.
    if t.past_incident_count > 0 {
        let penalty =
            (i64::from(t.past_incident_count) * cfg.incident_penalty).min(cfg.incident_cap);
        bonus += penalty;
        factors.push(format!(
            "History: {} past incidents (+{penalty}%)",
            t.past_incident_count
        ));
        debug!(incidents = t.past_incident_count, penalty, "Incident history");
    }

    // Weighted blend of the two signals.
    #[allow(clippy::cast_precision_loss)]
    let mut final_score = (base_score as f64 * cfg.ml_weight).round() as i64
        + (bonus as f64 * cfg.progressive_weight).round() as i64;

    // Industrial environments always carry some risk; the floor only applies
    // to compliant workers so a violation is never masked upward.
    if final_score < cfg.baseline_floor && t.ppe_compliant {
        final_score = cfg.baseline_floor;
        debug!(floor = cfg.baseline_floor, "Applied baseline industrial risk");
    }

    // Cap below 100 — the ceiling is reserved for the rule-engine SOS/fall path.
    final_score = final_score.clamp(0, cfg.max_score);

    debug!(
        base_score,
        progressive_bonus = bonus,
        final_score,
        "Progressive risk calculation complete"
    );

    let top_factors = if factors.is_empty() {
        legacy_factors(t)
    } else {
        factors.into_iter().take(3).collect()
    };

    ScoreBreakdown {
        base_score,
        progressive_bonus: bonus,
        final_score: final_score as u8,
        top_factors,
    }
}

/// Legacy coarse factor generation, used when no progressive penalty fired.
///
/// The thresholds here are fixed dashboard cutoffs from the pre-progressive
/// scorer, not site-tunable values; they are intentionally hardcoded.
fn legacy_factors(t: &ResolvedTelemetry) -> Vec<String> {
    let mut factors = Vec::new();
    if t.hr > 110 {
        factors.push(format!("Elevated HR ({} bpm)", t.hr));
    }
    if t.ambient_gas_ppm > 50 {
        factors.push(format!("High Gas ({} ppm)", t.ambient_gas_ppm));
    }
    if !t.ppe_compliant {
        factors.push("PPE Violation (Missing Item)".to_string());
    }
    if t.shift_duration_hours > 8.0 {
        factors.push("Long Shift (Fatigue)".to_string());
    }
    if factors.is_empty() {
        factors.push("Baseline industrial risk".to_string());
    }
    factors.into_iter().take(3).collect()
}
