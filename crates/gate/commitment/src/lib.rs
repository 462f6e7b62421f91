//! Deterministic state commitment hashing.
//!
//! Folds an ordered numeric vector into a fixed-width hex fingerprint
//! so that allow and reject paths leave comparable audit trails. The
//! fold is order-sensitive: identical vectors always commit to the same
//! value, reordered vectors generally do not.
//!
//! This is not a cryptographic hash. No collision or preimage
//! resistance is claimed; the only guarantee is bit-for-bit
//! reproducibility across platforms, which requires the fixed-width
//! wrapping arithmetic below.

#![deny(unsafe_code)]

/// 64-bit golden-ratio increment, as used by splitmix-style mixers.
const GOLDEN_GAMMA: u64 = 0x9e3779b185ebca87;
/// Post-rotation stir constant.
const STIR: u64 = 0xc2b2ae3d27d4eb4f;
/// Fixed-point scale applied before truncation toward zero.
const SCALE: f64 = 1e6;

/// Fold an ordered numeric vector into a commitment string of the form
/// `0x` followed by exactly 16 lowercase hex digits.
///
/// Non-finite entries are treated as 0.0. The empty vector commits to
/// the untouched zero accumulator.
pub fn hash_state_vector(values: &[f64]) -> String {
    let mut acc: u64 = 0;
    for &value in values {
        let value = if value.is_finite() { value } else { 0.0 };
        let scaled = (value * SCALE).trunc() as i64 as u64;
        acc ^= scaled.wrapping_add(GOLDEN_GAMMA);
        acc = acc.rotate_left(7);
        acc ^= STIR;
    }
    format!("{acc:#018x}")
}
