use std::fmt;

use serde::{Deserialize, Serialize};

/// Terminal routing outcome of a gate evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Route {
    /// High-intensity mode is permitted.
    Allow,
    /// Deferred into a safe holding experience; eligibility was
    /// positive but at least one predicate failed.
    SafeRoom,
    /// Restorative fallback; rights were refused or eligibility was zero.
    Restorative,
}

impl Route {
    /// Stable string identifier for structured logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::SafeRoom => "SAFE_ROOM",
            Self::Restorative => "RESTORATIVE",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final gate decision for one evaluation.
///
/// The engine never stores a decision; persistence is the caller's
/// responsibility. Two evaluations over identical inputs produce equal
/// decisions, commitment hash included.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the caller may enter high-intensity mode.
    pub allow: bool,
    /// High-intensity flag; true only on the allow route.
    pub high_intensity: bool,
    /// Clamped difficulty in [0, 1]. Forced to 0 on rejection routes.
    pub difficulty: f64,
    /// Terminal route.
    pub route: Route,
    /// Deterministic fingerprint of the evaluated state,
    /// `0x` + 16 lowercase hex digits.
    pub commitment_hash: String,
}
