use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorical sleep/arousal phase label.
///
/// Variant order is the canonical enumeration order used for
/// coarse-region tie-breaking: `Wake`, `N1`, `N2`, `N3`, `Rem`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepStage {
    /// Awake or indeterminate-light. The fail-closed default.
    #[default]
    Wake,
    N1,
    N2,
    N3,
    /// REM-analog stage.
    Rem,
}

impl SleepStage {
    /// Stable string identifier for structured logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wake => "wake",
            Self::N1 => "n1",
            Self::N2 => "n2",
            Self::N3 => "n3",
            Self::Rem => "rem",
        }
    }

    /// All stages in canonical enumeration order.
    pub fn all() -> &'static [SleepStage] {
        &[Self::Wake, Self::N1, Self::N2, Self::N3, Self::Rem]
    }

    /// Whether this stage sits inside the deep-sleep intensity window.
    pub fn in_intensity_window(self) -> bool {
        matches!(self, Self::N2 | Self::N3)
    }
}

impl fmt::Display for SleepStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
