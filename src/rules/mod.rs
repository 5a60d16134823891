//! Hazard-Chain Rule Engine
//!
//! Deterministic, ordered fact-checks that fully override the learned scorer.
//! Safety-critical facts (SOS, fall, explosive gas mix) must never be diluted
//! by a statistical average, so a rule hit short-circuits the model entirely —
//! the classifier is not even invoked on that path.
//!
//! Rule order encodes priority: rules are checked strictly in sequence and
//! the first match wins, independent of how severe a later rule might seem.

use crate::config::RuleThresholds;
use crate::types::{RuleOutcome, WorkerContext};

/// Source tag reported as `modelUsed` when a rule fires.
pub const RULE_ENGINE_TAG: &str = "Rule_Engine_v1";

/// Evaluate the ordered hazard chains against a worker context.
///
/// Returns the first triggered rule, or `None` when no deterministic hazard
/// is present and control should pass to the progressive scorer.
pub fn run_hazard_chain(ctx: &WorkerContext, thresholds: &RuleThresholds) -> Option<RuleOutcome> {
    let badge = &ctx.badge_telemetry;
    let scada = &ctx.scada_context;
    let vision = &ctx.vision_telemetry;
    let profile = &ctx.worker_profile;

    // Rule 1: worker down — SOS button. Highest priority, risk = 100.
    if badge.sos_active() {
        return Some(RuleOutcome {
            risk_score: 100,
            reason: "SOS Button Activated",
            source: RULE_ENGINE_TAG,
        });
    }

    // Rule 2: worker down — fall detected. Risk = 100.
    if badge.fall_detected() {
        return Some(RuleOutcome {
            risk_score: 100,
            reason: "Fall Detected",
            source: RULE_ENGINE_TAG,
        });
    }

    // Rule 3: critical gas leak in a hot zone.
    if scada.ambient_gas_ppm() > thresholds.gas_critical_ppm
        && scada.zone_temp() > thresholds.zone_temp_critical_c
    {
        return Some(RuleOutcome {
            risk_score: 95,
            reason: "Critical Gas + High Temp in Zone",
            source: RULE_ENGINE_TAG,
        });
    }

    // Rule 4: heat stroke risk — high HR + high skin temp + long shift.
    if badge.hr() > thresholds.heat_stroke_hr
        && badge.skin_temp() > thresholds.heat_stroke_skin_temp_c
        && profile.shift_duration_hours() > thresholds.heat_stroke_shift_hours
    {
        return Some(RuleOutcome {
            risk_score: 90,
            reason: "Heat Stroke Risk (High HR + Temp + Long Shift)",
            source: RULE_ENGINE_TAG,
        });
    }

    // Rule 5: fatigued worker without full PPE.
    if profile.fatigue_score() > thresholds.fatigue_threshold && !vision.is_compliant() {
        return Some(RuleOutcome {
            risk_score: 75,
            reason: "Fatigue + PPE Violation",
            source: RULE_ENGINE_TAG,
        });
    }

    // No high-priority facts found — trust the learned scorer.
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkerContext;

    fn context(json: &str) -> WorkerContext {
        serde_json::from_str(json).unwrap()
    }

    fn thresholds() -> RuleThresholds {
        RuleThresholds::default()
    }

    #[test]
    fn test_no_rule_on_default_context() {
        let ctx = context(r#"{"workerId": "W1"}"#);
        assert_eq!(run_hazard_chain(&ctx, &thresholds()), None);
    }

    #[test]
    fn test_sos_triggers_ceiling() {
        let ctx = context(
            r#"{"workerId": "W1", "badgeTelemetry": {"sosActive": true}}"#,
        );
        let outcome = run_hazard_chain(&ctx, &thresholds()).unwrap();
        assert_eq!(outcome.risk_score, 100);
        assert_eq!(outcome.reason, "SOS Button Activated");
        assert_eq!(outcome.source, RULE_ENGINE_TAG);
    }

    #[test]
    fn test_fall_triggers_ceiling() {
        let ctx = context(
            r#"{"workerId": "W1", "badgeTelemetry": {"fallDetected": true}}"#,
        );
        let outcome = run_hazard_chain(&ctx, &thresholds()).unwrap();
        assert_eq!(outcome.risk_score, 100);
        assert_eq!(outcome.reason, "Fall Detected");
    }

    #[test]
    fn test_sos_wins_over_gas_rule() {
        // Rule order wins: SOS beats the (also matching) gas+temp chain.
        let ctx = context(
            r#"{
                "workerId": "W1",
                "badgeTelemetry": {"sosActive": true},
                "scadaContext": {"ambientGasPpm": 90, "zoneTemp": 45}
            }"#,
        );
        let outcome = run_hazard_chain(&ctx, &thresholds()).unwrap();
        assert_eq!(outcome.reason, "SOS Button Activated");
    }

    #[test]
    fn test_gas_and_temp_chain() {
        let ctx = context(
            r#"{"workerId": "W1", "scadaContext": {"ambientGasPpm": 80, "zoneTemp": 42}}"#,
        );
        let outcome = run_hazard_chain(&ctx, &thresholds()).unwrap();
        assert_eq!(outcome.risk_score, 95);
        assert_eq!(outcome.reason, "Critical Gas + High Temp in Zone");
    }

    #[test]
    fn test_gas_alone_does_not_fire() {
        // Both facts are required; high gas in a cool zone defers to the scorer.
        let ctx = context(
            r#"{"workerId": "W1", "scadaContext": {"ambientGasPpm": 80, "zoneTemp": 35}}"#,
        );
        assert_eq!(run_hazard_chain(&ctx, &thresholds()), None);
    }

    #[test]
    fn test_heat_stroke_chain() {
        let ctx = context(
            r#"{
                "workerId": "W1",
                "badgeTelemetry": {"hr": 135, "skinTemp": 38.8},
                "workerProfile": {"shiftDurationHours": 7.5}
            }"#,
        );
        let outcome = run_hazard_chain(&ctx, &thresholds()).unwrap();
        assert_eq!(outcome.risk_score, 90);
    }

    #[test]
    fn test_heat_stroke_needs_all_three_facts() {
        // Short shift breaks the chain even with extreme vitals.
        let ctx = context(
            r#"{
                "workerId": "W1",
                "badgeTelemetry": {"hr": 140, "skinTemp": 39.0},
                "workerProfile": {"shiftDurationHours": 4.0}
            }"#,
        );
        assert_eq!(run_hazard_chain(&ctx, &thresholds()), None);
    }

    #[test]
    fn test_fatigue_plus_ppe_violation() {
        let ctx = context(
            r#"{
                "workerId": "W1",
                "visionTelemetry": {"isCompliant": false},
                "workerProfile": {"fatigueScore": 0.8}
            }"#,
        );
        let outcome = run_hazard_chain(&ctx, &thresholds()).unwrap();
        assert_eq!(outcome.risk_score, 75);
        assert_eq!(outcome.reason, "Fatigue + PPE Violation");
    }

    #[test]
    fn test_fatigue_alone_defers_to_scorer() {
        let ctx = context(
            r#"{"workerId": "W1", "workerProfile": {"fatigueScore": 0.9}}"#,
        );
        assert_eq!(run_hazard_chain(&ctx, &thresholds()), None);
    }

    #[test]
    fn test_site_tuned_thresholds() {
        let mut tuned = thresholds();
        tuned.gas_critical_ppm = 50;
        tuned.zone_temp_critical_c = 35;

        let ctx = context(
            r#"{"workerId": "W1", "scadaContext": {"ambientGasPpm": 55, "zoneTemp": 38}}"#,
        );
        assert!(run_hazard_chain(&ctx, &tuned).is_some());
        assert_eq!(run_hazard_chain(&ctx, &RuleThresholds::default()), None);
    }
}
