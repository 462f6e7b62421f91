use serde::{Deserialize, Serialize};

/// The four capability grants a caller must present before any
/// eligibility evaluation takes place.
///
/// Every field deserializes as `false` when absent, so a malformed or
/// partial grants record reads as a missing grant rather than an error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityGrants {
    /// Private mental/physiological state is protected from disclosure.
    pub private_state_protection: bool,
    /// The participant retains autonomy of choice.
    pub autonomy_of_choice: bool,
    /// Mental integrity is protected.
    pub integrity_protection: bool,
    /// The experience is never used punitively.
    pub no_punitive_use: bool,
}

impl CapabilityGrants {
    /// A record with all four grants present.
    pub fn complete() -> Self {
        Self {
            private_state_protection: true,
            autonomy_of_choice: true,
            integrity_protection: true,
            no_punitive_use: true,
        }
    }

    /// Whether all four grants are present.
    pub fn is_complete(&self) -> bool {
        self.private_state_protection
            && self.autonomy_of_choice
            && self.integrity_protection
            && self.no_punitive_use
    }
}
