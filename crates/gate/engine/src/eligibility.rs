use serde::{Deserialize, Serialize};

use oneiro_gate_commitment::hash_state_vector;
use oneiro_gate_types::{PolicyProfile, StageIndices, StateSnapshot};

use crate::bounds::clamp01;
use crate::indices::compute_stage_indices;

/// Stage-timing window bounds, minutes since sleep onset.
const WINDOW_MIN_MINUTES: f64 = 20.0;
const WINDOW_MAX_MINUTES: f64 = 40.0;

/// Autonomic arousal bounds for the independent safety check.
const LF_HF_RATIO_CEILING: f64 = 2.8;
const THETA_GAMMA_PLV_FLOOR: f64 = 0.19;

/// Alignment floor applied regardless of policy.
const ALIGNMENT_FLOOR: f64 = 0.5;

/// Fraction of the policy dose budget actually usable per session.
const DOSE_SAFETY_MARGIN: f64 = 0.8;

/// Minimum combined safety index.
const SAFETY_INDEX_FLOOR: f64 = 0.7;

/// Multiplicative eligibility scalar `E = readiness * (1 - risk) * stability`.
///
/// Each factor is clamped to [0, 1] here; callers need not pre-clamp.
/// A zero in any factor is a hard veto, not an average.
pub fn eligibility_scalar(readiness: f64, risk: f64, stability: f64) -> f64 {
    clamp01(readiness) * (1.0 - clamp01(risk)) * clamp01(stability)
}

/// Individual predicate outcomes from an eligibility evaluation.
///
/// Predicates are evaluated independently so a rejection can name every
/// failed condition, not just the first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateChecks {
    /// Stage in {N2, N3} and minutes-since-onset inside the window.
    pub stage_window: bool,
    /// Eligibility scalar strictly positive.
    pub eligibility_positive: bool,
    /// Emotional-stabilization gate value at or above the policy floor.
    pub stage_gate: bool,
    /// Consent scarcity at or below the policy ceiling.
    pub consent_scarcity: bool,
    /// Alignment score at or above the fixed floor.
    pub alignment: bool,
    /// Arousal ratio below ceiling and coherence above floor.
    pub arousal: bool,
    /// Dose fraction within the margined policy budget.
    pub dose: bool,
    /// Consecutive high-intensity epochs within the policy maximum.
    pub consecutive_epochs: bool,
    /// Agency preserved, when the policy requires it.
    pub agency: bool,
    /// Combined safety index at or above the fixed floor.
    pub safety_index: bool,
}

impl PredicateChecks {
    /// Whether every predicate holds.
    pub fn all_pass(&self) -> bool {
        self.stage_window
            && self.eligibility_positive
            && self.stage_gate
            && self.consent_scarcity
            && self.alignment
            && self.arousal
            && self.dose
            && self.consecutive_epochs
            && self.agency
            && self.safety_index
    }

    /// Stable reason codes for every failed predicate, in field order.
    pub fn failed(&self) -> Vec<&'static str> {
        let mut reasons = Vec::new();
        if !self.stage_window {
            reasons.push("STAGE_WINDOW");
        }
        if !self.eligibility_positive {
            reasons.push("ELIGIBILITY_ZERO");
        }
        if !self.stage_gate {
            reasons.push("STAGE_GATE_LOW");
        }
        if !self.consent_scarcity {
            reasons.push("CONSENT_SCARCE");
        }
        if !self.alignment {
            reasons.push("ALIGNMENT_LOW");
        }
        if !self.arousal {
            reasons.push("AROUSAL_UNSAFE");
        }
        if !self.dose {
            reasons.push("DOSE_EXCEEDED");
        }
        if !self.consecutive_epochs {
            reasons.push("EPOCH_RUN_EXCEEDED");
        }
        if !self.agency {
            reasons.push("AGENCY_NOT_PRESERVED");
        }
        if !self.safety_index {
            reasons.push("SAFETY_INDEX_LOW");
        }
        reasons
    }
}

/// Outcome of the eligibility stage: the scalar, derived indices,
/// per-predicate results, and the state fingerprint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    /// Multiplicative eligibility scalar in [0, 1].
    pub eligibility: f64,
    /// Derived stage indices.
    pub indices: StageIndices,
    /// Per-predicate outcomes.
    pub checks: PredicateChecks,
    /// Conjunction of all predicates.
    pub allow_high_intensity: bool,
    /// Fingerprint over the evaluated state, present on every path.
    pub commitment_hash: String,
}

/// Evaluate all eligibility predicates against a snapshot and policy.
///
/// Scalars the data model declares in [0, 1] are clamped before
/// comparison; arousal metrics, minutes, and dose fraction are compared
/// raw, and a NaN in any raw comparison fails that predicate.
pub fn evaluate_eligibility(snapshot: &StateSnapshot, policy: &PolicyProfile) -> EligibilityReport {
    let indices = compute_stage_indices(&snapshot.posteriors);
    let eligibility = eligibility_scalar(snapshot.readiness, snapshot.risk, snapshot.stability);

    let checks = PredicateChecks {
        stage_window: snapshot.stage.in_intensity_window()
            && snapshot.minutes_since_onset >= WINDOW_MIN_MINUTES
            && snapshot.minutes_since_onset <= WINDOW_MAX_MINUTES,
        eligibility_positive: eligibility > 0.0,
        stage_gate: clamp01(snapshot.stage_gate_value) >= policy.stage_gate_floor,
        consent_scarcity: clamp01(snapshot.consent_scarcity) <= policy.consent_scarcity_ceiling,
        alignment: clamp01(snapshot.alignment_score) >= ALIGNMENT_FLOOR,
        arousal: snapshot.arousal.lf_hf_ratio < LF_HF_RATIO_CEILING
            && snapshot.arousal.theta_gamma_plv > THETA_GAMMA_PLV_FLOOR,
        dose: snapshot.dose_fraction <= policy.max_dose_fraction * DOSE_SAFETY_MARGIN,
        consecutive_epochs: snapshot.consecutive_high_intensity_epochs
            <= policy.max_consecutive_high_intensity_epochs,
        agency: !policy.require_agency_preservation || snapshot.agency_preserved,
        safety_index: indices.safety >= SAFETY_INDEX_FLOOR,
    };

    // Fixed-order fingerprint input, identical on allow and reject
    // paths so audit trails stay comparable.
    let commitment_hash = hash_state_vector(&[
        eligibility,
        indices.depth,
        indices.uncertainty,
        indices.safety,
        snapshot.arousal.lf_hf_ratio,
        snapshot.arousal.theta_gamma_plv,
        snapshot.consent_scarcity,
        snapshot.stage_gate_value,
    ]);

    EligibilityReport {
        eligibility,
        indices,
        allow_high_intensity: checks.all_pass(),
        checks,
        commitment_hash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oneiro_gate_types::{ArousalMetrics, SleepStage, StagePosteriors};

    fn eligible_snapshot() -> StateSnapshot {
        StateSnapshot {
            posteriors: StagePosteriors {
                wake: 0.01,
                n1: 0.04,
                n2: 0.15,
                n3: 0.75,
                rem: 0.05,
            },
            readiness: 0.8,
            risk: 0.1,
            stability: 0.9,
            consent_scarcity: 0.2,
            stage_gate_value: 0.8,
            alignment_score: 0.7,
            stage: SleepStage::N3,
            minutes_since_onset: 32.0,
            arousal: ArousalMetrics {
                lf_hf_ratio: 1.2,
                theta_gamma_plv: 0.35,
            },
            dose_fraction: 0.1,
            consecutive_high_intensity_epochs: 2,
            agency_preserved: true,
        }
    }

    #[test]
    fn scalar_matches_reference_product() {
        let e = eligibility_scalar(0.8, 0.1, 0.9);
        assert!((e - 0.648).abs() < 1e-12);
    }

    #[test]
    fn scalar_vetoes_on_any_zero_factor() {
        assert_eq!(eligibility_scalar(0.0, 0.1, 0.9), 0.0);
        assert_eq!(eligibility_scalar(0.8, 1.0, 0.9), 0.0);
        assert_eq!(eligibility_scalar(0.8, 0.1, 0.0), 0.0);
    }

    #[test]
    fn scalar_clamps_out_of_range_factors() {
        // risk -1 clamps to 0, readiness 2 clamps to 1.
        assert_eq!(eligibility_scalar(2.0, -1.0, 1.0), 1.0);
    }

    #[test]
    fn reference_snapshot_passes_every_predicate() {
        let report = evaluate_eligibility(&eligible_snapshot(), &PolicyProfile::default());
        assert!(report.allow_high_intensity);
        assert!(report.checks.failed().is_empty());
        assert!((report.eligibility - 0.648).abs() < 1e-12);
    }

    #[test]
    fn each_predicate_fails_independently() {
        let policy = PolicyProfile::default();
        let base = eligible_snapshot();

        let cases: Vec<(StateSnapshot, &str)> = vec![
            (
                StateSnapshot {
                    stage: SleepStage::Rem,
                    ..base.clone()
                },
                "STAGE_WINDOW",
            ),
            (
                StateSnapshot {
                    minutes_since_onset: 45.0,
                    ..base.clone()
                },
                "STAGE_WINDOW",
            ),
            (
                StateSnapshot {
                    risk: 1.0,
                    ..base.clone()
                },
                "ELIGIBILITY_ZERO",
            ),
            (
                StateSnapshot {
                    stage_gate_value: 0.5,
                    ..base.clone()
                },
                "STAGE_GATE_LOW",
            ),
            (
                StateSnapshot {
                    consent_scarcity: 0.9,
                    ..base.clone()
                },
                "CONSENT_SCARCE",
            ),
            (
                StateSnapshot {
                    alignment_score: 0.3,
                    ..base.clone()
                },
                "ALIGNMENT_LOW",
            ),
            (
                StateSnapshot {
                    arousal: ArousalMetrics {
                        lf_hf_ratio: 3.5,
                        theta_gamma_plv: 0.35,
                    },
                    ..base.clone()
                },
                "AROUSAL_UNSAFE",
            ),
            (
                StateSnapshot {
                    dose_fraction: 0.21,
                    ..base.clone()
                },
                "DOSE_EXCEEDED",
            ),
            (
                StateSnapshot {
                    consecutive_high_intensity_epochs: 5,
                    ..base.clone()
                },
                "EPOCH_RUN_EXCEEDED",
            ),
            (
                StateSnapshot {
                    agency_preserved: false,
                    ..base.clone()
                },
                "AGENCY_NOT_PRESERVED",
            ),
            (
                StateSnapshot {
                    posteriors: StagePosteriors {
                        wake: 0.5,
                        n3: 0.5,
                        ..Default::default()
                    },
                    ..base.clone()
                },
                "SAFETY_INDEX_LOW",
            ),
        ];

        for (snapshot, expected_reason) in cases {
            let report = evaluate_eligibility(&snapshot, &policy);
            assert!(
                !report.allow_high_intensity,
                "expected failure for {expected_reason}"
            );
            assert!(
                report.checks.failed().contains(&expected_reason),
                "missing {expected_reason}, got {:?}",
                report.checks.failed()
            );
        }
    }

    #[test]
    fn agency_predicate_can_be_waived_by_policy() {
        let policy = PolicyProfile {
            require_agency_preservation: false,
            ..PolicyProfile::default()
        };
        let snapshot = StateSnapshot {
            agency_preserved: false,
            ..eligible_snapshot()
        };
        let report = evaluate_eligibility(&snapshot, &policy);
        assert!(report.checks.agency);
        assert!(report.allow_high_intensity);
    }

    #[test]
    fn nan_arousal_fails_closed() {
        let snapshot = StateSnapshot {
            arousal: ArousalMetrics {
                lf_hf_ratio: f64::NAN,
                theta_gamma_plv: 0.35,
            },
            ..eligible_snapshot()
        };
        let report = evaluate_eligibility(&snapshot, &PolicyProfile::default());
        assert!(!report.checks.arousal);
    }

    #[test]
    fn commitment_hash_is_present_on_reject_paths() {
        let snapshot = StateSnapshot {
            agency_preserved: false,
            ..eligible_snapshot()
        };
        let rejected = evaluate_eligibility(&snapshot, &PolicyProfile::default());
        assert!(!rejected.allow_high_intensity);
        // Same fingerprint as the passing evaluation: the hash covers
        // the evaluated state, not the outcome.
        let allowed = evaluate_eligibility(&eligible_snapshot(), &PolicyProfile::default());
        assert_eq!(rejected.commitment_hash, allowed.commitment_hash);
    }
}
