//! The `esg-stress.toml` file model.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use esg_stress_portfolio::{EsgScenario, Severity, StressRequest};
use esg_stress_traits::{normalize_tickers, Ticker};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "esg-stress.toml";

/// Tickers used when neither the file nor the command line names any.
pub const DEFAULT_TICKERS: [&str; 5] = ["AAPL", "MSFT", "TSLA", "AMZN", "GOOGL"];

/// Default total investment.
pub const DEFAULT_INVESTMENT: f64 = 100_000.0;

/// Default scenario identifier.
pub const DEFAULT_SCENARIO: &str = "governance";

/// Bounds of the mock ESG score generator, `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRange {
    /// Inclusive lower bound.
    pub min: u8,
    /// Exclusive upper bound.
    pub max: u8,
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self { min: 30, max: 95 }
    }
}

/// Optional data files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// Price file (`.csv` or `.json`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices: Option<PathBuf>,

    /// Score file; replaces the mock generator when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<PathBuf>,
}

impl DataPaths {
    /// Resolves relative paths against `base`.
    pub fn resolved_against(&self, base: &Path) -> Self {
        let resolve = |p: &Option<PathBuf>| {
            p.as_ref().map(|p| {
                if p.is_relative() {
                    base.join(p)
                } else {
                    p.clone()
                }
            })
        };
        Self {
            prices: resolve(&self.prices),
            scores: resolve(&self.scores),
        }
    }
}

/// Stress tester settings.
///
/// Every field is optional in the file; missing fields take the defaults
/// shown in [`EsgStressConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EsgStressConfig {
    /// Tickers to hold, equally weighted.
    pub tickers: Vec<String>,

    /// Total investment.
    pub investment: f64,

    /// Scenario identifier; any form accepted by [`EsgScenario`]'s parser.
    pub scenario: String,

    /// Severity, 1 to 5.
    pub severity: i64,

    /// Seed of the mock score generator.
    pub seed: u64,

    /// Mock score bounds.
    pub scores: ScoreRange,

    /// Data files.
    pub data: DataPaths,
}

impl Default for EsgStressConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect(),
            investment: DEFAULT_INVESTMENT,
            scenario: DEFAULT_SCENARIO.to_string(),
            severity: i64::from(Severity::default().value()),
            seed: 42,
            scores: ScoreRange::default(),
            data: DataPaths::default(),
        }
    }
}

impl EsgStressConfig {
    /// Parses and validates TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a file. Relative data paths resolve against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::not_found(path.display().to_string()));
        }

        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(dir) = path.parent() {
            config.data = config.data.resolved_against(dir);
        }

        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Loads `explicit` if given, else `dir/esg-stress.toml` if present,
    /// else the defaults.
    ///
    /// An explicit path that does not exist is an error; a missing
    /// discovered file is not.
    pub fn discover_in(dir: &Path, explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Self::from_file(candidate);
        }

        debug!("no configuration file; using defaults");
        Ok(Self::default())
    }

    /// [`discover_in`](Self::discover_in) the working directory.
    pub fn discover(explicit: Option<&Path>) -> ConfigResult<Self> {
        Self::discover_in(Path::new("."), explicit)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Normalized tickers.
    pub fn tickers(&self) -> Vec<Ticker> {
        normalize_tickers(&self.tickers)
    }

    /// The configured scenario.
    pub fn scenario(&self) -> ConfigResult<EsgScenario> {
        self.scenario
            .parse::<EsgScenario>()
            .map_err(|e| ConfigError::validation("scenario", e.to_string()))
    }

    /// The configured severity.
    pub fn severity(&self) -> ConfigResult<Severity> {
        Severity::try_from(self.severity)
            .map_err(|e| ConfigError::validation("severity", e.to_string()))
    }

    /// Builds the stress request described by this configuration.
    pub fn to_request(&self) -> ConfigResult<StressRequest> {
        StressRequest::new(
            self.tickers(),
            self.investment,
            self.scenario()?,
            self.severity()?,
        )
        .map_err(|e| ConfigError::validation("tickers", e.to_string()))
    }
}

impl Validate for EsgStressConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.investment.is_finite() || self.investment <= 0.0 {
            errors.push(ValidationError::with_rule(
                "investment",
                format!("Investment {} must be positive", self.investment),
                "positive_investment",
            ));
        }

        if Severity::try_from(self.severity).is_err() {
            errors.push(ValidationError::with_rule(
                "severity",
                format!(
                    "Severity {} must be between {} and {}",
                    self.severity,
                    Severity::MIN.value(),
                    Severity::MAX.value()
                ),
                "severity_range",
            ));
        }

        if self.scenario.parse::<EsgScenario>().is_err() {
            errors.push(ValidationError::new(
                "scenario",
                format!("Unknown scenario '{}'", self.scenario),
            ));
        }

        if self.scores.min >= self.scores.max || self.scores.max > 101 {
            errors.push(ValidationError::with_rule(
                "scores",
                format!(
                    "Score range [{}, {}) must be non-empty and within 0..=100",
                    self.scores.min, self.scores.max
                ),
                "score_range",
            ));
        }

        errors
    }
}
