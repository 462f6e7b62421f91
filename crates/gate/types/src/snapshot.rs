use serde::{Deserialize, Serialize};

use crate::stage::SleepStage;

/// Per-stage probability-like weights, one entry per stage.
///
/// Weights are non-negative and need not sum to 1; the normalizer
/// treats them as unnormalized. Missing entries deserialize as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagePosteriors {
    pub wake: f64,
    pub n1: f64,
    pub n2: f64,
    pub n3: f64,
    pub rem: f64,
}

impl StagePosteriors {
    /// Weight for a single stage.
    pub fn get(&self, stage: SleepStage) -> f64 {
        match stage {
            SleepStage::Wake => self.wake,
            SleepStage::N1 => self.n1,
            SleepStage::N2 => self.n2,
            SleepStage::N3 => self.n3,
            SleepStage::Rem => self.rem,
        }
    }
}

/// Autonomic arousal metrics for the independent arousal-safety check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArousalMetrics {
    /// Sympathetic/parasympathetic balance ratio (LF/HF). Unbounded above.
    pub lf_hf_ratio: f64,
    /// Theta-gamma phase-locking coherence.
    pub theta_gamma_plv: f64,
}

/// Immutable biometric state snapshot, constructed by the caller for
/// each evaluation.
///
/// Scalars declared in [0, 1] are clamped by the engine, not validated
/// here; partial payloads deserialize with zeroed/false fields so the
/// gate fails closed instead of erroring.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateSnapshot {
    /// Unnormalized stage-posterior weights.
    pub posteriors: StagePosteriors,
    /// Sleep depth-and-timing readiness, [0, 1].
    pub readiness: f64,
    /// Measured distress/risk estimate, [0, 1].
    pub risk: f64,
    /// Platform/session stability estimate, [0, 1].
    pub stability: f64,
    /// Consent-scarcity estimate, [0, 1]. Higher means scarcer consent.
    pub consent_scarcity: f64,
    /// Emotional-stabilization gate value, [0, 1].
    pub stage_gate_value: f64,
    /// Session alignment score, [0, 1].
    pub alignment_score: f64,
    /// Current categorical stage.
    pub stage: SleepStage,
    /// Minutes elapsed since sleep onset.
    pub minutes_since_onset: f64,
    /// Autonomic arousal metrics.
    pub arousal: ArousalMetrics,
    /// Fraction of elapsed time already spent in high-intensity mode.
    pub dose_fraction: f64,
    /// Consecutive high-intensity epochs so far.
    pub consecutive_high_intensity_epochs: u32,
    /// Whether the session preserves participant agency.
    pub agency_preserved: bool,
}
