use serde::{Deserialize, Serialize};

use crate::snapshot::StagePosteriors;
use crate::stage::SleepStage;

/// Derived per-stage indices, recomputed on every evaluation and never
/// persisted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageIndices {
    /// Normalized stage distribution. Sums to 1 unless the raw input
    /// was all-zero, in which case every entry is 0 (the defined
    /// degenerate normalization).
    pub normalized: StagePosteriors,
    /// Weighted depth favoring the deeper stages.
    pub depth: f64,
    /// One minus the maximum normalized probability.
    pub uncertainty: f64,
    /// Combined depth-and-certainty safety index.
    pub safety: f64,
    /// Stage holding the maximum normalized probability, ties broken
    /// by canonical enumeration order.
    pub coarse_region: SleepStage,
}
