//! CLI error types.

use esg_stress_config::ConfigError;
use esg_stress_portfolio::PortfolioError;
use esg_stress_traits::TraitError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Prices could not be retrieved for some tickers.
    #[error("Could not fetch data. Check tickers. (unavailable: {0})")]
    DataUnavailable(String),

    /// Stress evaluation failed.
    #[error(transparent)]
    Stress(PortfolioError),

    /// A data source failed to load.
    #[error("Data source error: {0}")]
    Source(#[from] TraitError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CliError {
    /// True when there is nothing to evaluate.
    pub fn is_no_op(&self) -> bool {
        matches!(self, CliError::Stress(e) if e.is_no_op())
    }
}

impl From<PortfolioError> for CliError {
    fn from(err: PortfolioError) -> Self {
        match err {
            PortfolioError::PriceUnavailable { tickers } => CliError::DataUnavailable(tickers),
            other => CliError::Stress(other),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_failure_message() {
        let err: CliError = PortfolioError::price_unavailable(["ZZZZ"]).into();
        assert!(err
            .to_string()
            .starts_with("Could not fetch data. Check tickers."));
        assert!(err.to_string().contains("ZZZZ"));
    }

    #[test]
    fn test_no_op() {
        assert!(CliError::from(PortfolioError::NoTickers).is_no_op());
        assert!(!CliError::from(PortfolioError::unknown_scenario("tax")).is_no_op());
    }
}
