use oneiro_gate_types::{SleepStage, StageIndices, StagePosteriors};

use crate::bounds::clamp01;

/// Normalize a raw stage-posterior vector and derive depth,
/// uncertainty, safety, and the coarse region.
///
/// Raw weights are clamped to [0, 1] before summing. An all-zero sum
/// substitutes 1.0 as the denominator, yielding an all-zero normalized
/// vector: depth 0, uncertainty 1, safety 0, coarse region `Wake`.
/// That degenerate normalization is part of the contract, not an error
/// path.
pub fn compute_stage_indices(posteriors: &StagePosteriors) -> StageIndices {
    let wake = clamp01(posteriors.wake);
    let n1 = clamp01(posteriors.n1);
    let n2 = clamp01(posteriors.n2);
    let n3 = clamp01(posteriors.n3);
    let rem = clamp01(posteriors.rem);

    let mut sum = wake + n1 + n2 + n3 + rem;
    if sum <= 0.0 {
        sum = 1.0;
    }

    let normalized = StagePosteriors {
        wake: wake / sum,
        n1: n1 / sum,
        n2: n2 / sum,
        n3: n3 / sum,
        rem: rem / sum,
    };

    let depth = clamp01(0.5 * normalized.n2 + 1.0 * normalized.n3);

    let max_prob = SleepStage::all()
        .iter()
        .map(|stage| normalized.get(*stage))
        .fold(0.0_f64, f64::max);
    let uncertainty = clamp01(1.0 - max_prob);

    // Rewards depth and certainty simultaneously; saturates well before
    // either reaches its own extreme.
    let safety = clamp01(depth - 0.5 + (1.0 - uncertainty));

    // Ties break on the canonical enumeration order.
    let coarse_region = SleepStage::all()
        .iter()
        .copied()
        .find(|stage| normalized.get(*stage) == max_prob)
        .unwrap_or(SleepStage::Wake);

    StageIndices {
        normalized,
        depth,
        uncertainty,
        safety,
        coarse_region,
    }
}
