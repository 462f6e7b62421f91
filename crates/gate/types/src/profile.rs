use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Read-only policy thresholds governing how strict the gate is.
///
/// A profile is injected once at gate construction and never written
/// afterwards. `Default` carries the reference thresholds; deployments
/// loading a profile from external configuration should run
/// [`PolicyProfile::validate`] at load time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyProfile {
    /// Consent scarcity above this ceiling forbids high intensity.
    pub consent_scarcity_ceiling: f64,
    /// Minimum emotional-stabilization gate value.
    pub stage_gate_floor: f64,
    /// Maximum fractional high-intensity dose per session.
    pub max_dose_fraction: f64,
    /// Maximum consecutive high-intensity epochs.
    pub max_consecutive_high_intensity_epochs: u32,
    /// Whether agency preservation is mandatory.
    pub require_agency_preservation: bool,
}

impl Default for PolicyProfile {
    fn default() -> Self {
        Self {
            consent_scarcity_ceiling: 0.4,
            stage_gate_floor: 0.72,
            max_dose_fraction: 0.25,
            max_consecutive_high_intensity_epochs: 4,
            require_agency_preservation: true,
        }
    }
}

impl PolicyProfile {
    /// Check threshold ranges for profiles loaded from external
    /// configuration. The engine itself never validates or mutates a
    /// profile at evaluation time.
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_unit_interval("consent_scarcity_ceiling", self.consent_scarcity_ceiling)?;
        check_unit_interval("stage_gate_floor", self.stage_gate_floor)?;
        if !self.max_dose_fraction.is_finite() || self.max_dose_fraction < 0.0 {
            return Err(ProfileError::NegativeOrNonFinite {
                field: "max_dose_fraction",
                value: self.max_dose_fraction,
            });
        }
        Ok(())
    }
}

fn check_unit_interval(field: &'static str, value: f64) -> Result<(), ProfileError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ProfileError::OutOfRange { field, value });
    }
    Ok(())
}

/// Errors from validating an externally supplied policy profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be finite and non-negative, got {value}")]
    NegativeOrNonFinite { field: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_carries_reference_thresholds() {
        let profile = PolicyProfile::default();
        assert_eq!(profile.consent_scarcity_ceiling, 0.4);
        assert_eq!(profile.stage_gate_floor, 0.72);
        assert_eq!(profile.max_dose_fraction, 0.25);
        assert_eq!(profile.max_consecutive_high_intensity_epochs, 4);
        assert!(profile.require_agency_preservation);
    }

    #[test]
    fn default_profile_validates() {
        assert!(PolicyProfile::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_ceiling_is_rejected() {
        let profile = PolicyProfile {
            consent_scarcity_ceiling: 1.5,
            ..PolicyProfile::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::OutOfRange {
                field: "consent_scarcity_ceiling",
                ..
            })
        ));
    }

    #[test]
    fn nan_dose_budget_is_rejected() {
        let profile = PolicyProfile {
            max_dose_fraction: f64::NAN,
            ..PolicyProfile::default()
        };
        assert!(profile.validate().is_err());
    }
}
