//! Gate data model - plain types shared by the eligibility engine.
//!
//! Everything here is caller-constructed data: a per-evaluation state
//! snapshot, the capability grants presented with it, the injected
//! policy profile, and the decision that comes back. No type in this
//! crate performs I/O or holds mutable state.

#![deny(unsafe_code)]

mod decision;
mod grants;
mod indices;
mod profile;
mod snapshot;
mod stage;

pub use decision::{Decision, Route};
pub use grants::CapabilityGrants;
pub use indices::StageIndices;
pub use profile::{PolicyProfile, ProfileError};
pub use snapshot::{ArousalMetrics, StagePosteriors, StateSnapshot};
pub use stage::SleepStage;
