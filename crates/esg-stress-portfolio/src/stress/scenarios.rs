//! Stress scenario definitions.
//!
//! Each scenario is bound to exactly one ESG dimension and a fixed base-impact
//! coefficient:
//!
//! | Scenario | Dimension | Base coefficient |
//! |---|---|---|
//! | Climate Policy Shock (E) | Environmental | 0.15 |
//! | Labor Strike / Social Unrest (S) | Social | 0.10 |
//! | Governance Scandal (G) | Governance | 0.20 |

use crate::types::Severity;
use crate::{PortfolioError, PortfolioResult};
use esg_stress_traits::EsgDimension;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single-factor ESG stress scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EsgScenario {
    /// Carbon pricing or regulation hitting environmental laggards.
    ClimatePolicyShock,

    /// Labor disputes or social unrest hitting social laggards.
    LaborStrikeSocialUnrest,

    /// A governance scandal hitting governance laggards.
    GovernanceScandal,
}

impl EsgScenario {
    /// All scenarios in E, S, G order.
    pub const ALL: [EsgScenario; 3] = [
        Self::ClimatePolicyShock,
        Self::LaborStrikeSocialUnrest,
        Self::GovernanceScandal,
    ];

    /// The ESG dimension this scenario reads.
    #[must_use]
    pub fn dimension(&self) -> EsgDimension {
        match self {
            Self::ClimatePolicyShock => EsgDimension::Environmental,
            Self::LaborStrikeSocialUnrest => EsgDimension::Social,
            Self::GovernanceScandal => EsgDimension::Governance,
        }
    }

    /// Base-impact coefficient at severity 1.
    #[must_use]
    pub fn base_coefficient(&self) -> f64 {
        match self {
            Self::ClimatePolicyShock => 0.15,
            Self::LaborStrikeSocialUnrest => 0.10,
            Self::GovernanceScandal => 0.20,
        }
    }

    /// Impact factor: base coefficient scaled linearly by severity.
    #[must_use]
    pub fn impact_factor(&self, severity: Severity) -> f64 {
        self.base_coefficient() * severity.multiplier()
    }

    /// Returns the scenario display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ClimatePolicyShock => "Climate Policy Shock (E)",
            Self::LaborStrikeSocialUnrest => "Labor Strike / Social Unrest (S)",
            Self::GovernanceScandal => "Governance Scandal (G)",
        }
    }

    /// Returns the kebab-case identifier.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::ClimatePolicyShock => "climate-policy-shock",
            Self::LaborStrikeSocialUnrest => "labor-strike-social-unrest",
            Self::GovernanceScandal => "governance-scandal",
        }
    }

    /// One-line description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::ClimatePolicyShock => "Carbon pricing and emissions regulation reprice weak environmental performers",
            Self::LaborStrikeSocialUnrest => "Strikes and social unrest disrupt companies with weak labor practices",
            Self::GovernanceScandal => "Accounting or board scandals reprice weakly governed companies",
        }
    }
}

impl fmt::Display for EsgScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EsgScenario {
    type Err = PortfolioError;

    /// Accepts display names, kebab-case ids, short aliases and the
    /// dimension letter, case-insensitively. Anything else is an error,
    /// never a silent zero-impact default.
    fn from_str(s: &str) -> PortfolioResult<Self> {
        let trimmed = s.trim();
        if let Some(scenario) = Self::ALL.iter().find(|sc| sc.name() == trimmed) {
            return Ok(*scenario);
        }

        match trimmed.to_lowercase().replace(['_', ' '], "-").as_str() {
            "climate-policy-shock" | "climate" | "environmental" | "e" => {
                Ok(Self::ClimatePolicyShock)
            }
            "labor-strike-social-unrest" | "labor-strike" | "labor" | "social" | "s" => {
                Ok(Self::LaborStrikeSocialUnrest)
            }
            "governance-scandal" | "governance" | "g" => Ok(Self::GovernanceScandal),
            _ => Err(PortfolioError::unknown_scenario(trimmed)),
        }
    }
}
