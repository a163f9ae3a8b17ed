//! Stress severity scale.

use crate::{PortfolioError, PortfolioResult};
use serde::{Deserialize, Serialize};

/// Severity of a stress scenario on a 1 (mild) to 5 (extreme) scale.
///
/// Scales a scenario's base coefficient linearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Severity(u8);

impl Severity {
    /// Mildest severity.
    pub const MIN: Severity = Severity(1);

    /// Most extreme severity.
    pub const MAX: Severity = Severity(5);

    /// Creates a severity, rejecting values outside 1..=5.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidSeverity`] for out-of-range values.
    pub fn new(value: u8) -> PortfolioResult<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PortfolioError::InvalidSeverity {
                value: i64::from(value),
            })
        }
    }

    /// The raw level.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// The level as a multiplier.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        f64::from(self.0)
    }

    /// Every severity from mildest to most extreme.
    pub fn all() -> impl Iterator<Item = Severity> {
        (Self::MIN.0..=Self::MAX.0).map(Severity)
    }

    /// Short label for display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Mild",
            2 => "Moderate",
            3 => "Elevated",
            4 => "Severe",
            _ => "Extreme",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Severity {
    type Error = PortfolioError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Severity {
    type Error = PortfolioError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| PortfolioError::InvalidSeverity { value })
            .and_then(Self::new)
    }
}

impl From<Severity> for u8 {
    fn from(s: Severity) -> Self {
        s.0
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.0, self.label())
    }
}
