use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Safe-mode session archetypes offered when high intensity is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    Restoration,
    Rehearsal,
    Neutral,
}

impl Archetype {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restoration => "restoration",
            Self::Rehearsal => "rehearsal",
            Self::Neutral => "neutral",
        }
    }

    /// All archetypes in selection order.
    pub fn all() -> &'static [Archetype] {
        &[Self::Restoration, Self::Rehearsal, Self::Neutral]
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform archetype pick. The random source is injected so callers
/// and tests can fix the seed; the gate itself never calls this.
pub fn select_archetype<R: Rng + ?Sized>(rng: &mut R) -> Archetype {
    let all = Archetype::all();
    all[rng.gen_range(0..all.len())]
}
