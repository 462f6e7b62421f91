use tracing::{debug, info, warn};

use oneiro_gate_commitment::hash_state_vector;
use oneiro_gate_types::{CapabilityGrants, Decision, PolicyProfile, Route, StateSnapshot};

use crate::difficulty::clamp_difficulty;
use crate::eligibility::evaluate_eligibility;

/// Fingerprint input when rights are refused and no state was evaluated.
const NULL_STATE_VECTOR: [f64; 4] = [0.0; 4];

/// The eligibility gate orchestrator.
///
/// Holds the injected read-only policy profile; each call to
/// [`IntensityGate::evaluate`] is an independent pure function of its
/// inputs, so a single gate may serve concurrent evaluations without
/// coordination.
#[derive(Clone, Debug, Default)]
pub struct IntensityGate {
    policy: PolicyProfile,
}

impl IntensityGate {
    pub fn new(policy: PolicyProfile) -> Self {
        Self { policy }
    }

    /// The policy profile this gate enforces.
    pub fn policy(&self) -> &PolicyProfile {
        &self.policy
    }

    /// Decide whether the caller may enter high-intensity mode.
    ///
    /// Rights are checked before anything else: a missing grant routes
    /// straight to `Restorative` with the null-state fingerprint.
    /// Otherwise every eligibility predicate is evaluated; any failure
    /// routes to `SafeRoom` when the eligibility scalar is positive and
    /// `Restorative` when it is zero, with difficulty forced to 0. Only
    /// a full pass yields `Allow`, with the proposal clamped under the
    /// risk ceiling.
    pub fn evaluate(
        &self,
        snapshot: &StateSnapshot,
        proposed_difficulty: f64,
        grants: &CapabilityGrants,
    ) -> Decision {
        if !grants.is_complete() {
            warn!(route = %Route::Restorative, "capability grants incomplete, refusing evaluation");
            return Decision {
                allow: false,
                high_intensity: false,
                difficulty: 0.0,
                route: Route::Restorative,
                commitment_hash: hash_state_vector(&NULL_STATE_VECTOR),
            };
        }

        let report = evaluate_eligibility(snapshot, &self.policy);

        if !report.allow_high_intensity {
            let route = if report.eligibility > 0.0 {
                Route::SafeRoom
            } else {
                Route::Restorative
            };
            info!(
                route = %route,
                eligibility = report.eligibility,
                failed = ?report.checks.failed(),
                "high intensity refused"
            );
            return Decision {
                allow: false,
                high_intensity: false,
                difficulty: 0.0,
                route,
                commitment_hash: report.commitment_hash,
            };
        }

        let difficulty = clamp_difficulty(proposed_difficulty, snapshot.risk);
        debug!(
            difficulty,
            eligibility = report.eligibility,
            safety = report.indices.safety,
            "high intensity allowed"
        );
        Decision {
            allow: true,
            high_intensity: true,
            difficulty,
            route: Route::Allow,
            commitment_hash: report.commitment_hash,
        }
    }
}
