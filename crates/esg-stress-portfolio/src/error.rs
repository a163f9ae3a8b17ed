//! Error types for portfolio stress testing.
//!
//! Every error is terminal for the evaluation that raised it; there is no
//! retry or partial-recovery path.

use esg_stress_traits::TraitError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur while building or stressing a portfolio.
#[derive(Error, Debug, Clone)]
pub enum PortfolioError {
    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// The ticker list was empty after normalization.
    #[error("No tickers to evaluate")]
    NoTickers,

    /// The price source returned nothing usable for one or more tickers.
    #[error("Price unavailable for {tickers}")]
    PriceUnavailable {
        /// Comma-separated tickers lacking a usable price.
        tickers: String,
    },

    /// A ticker has no ESG scores.
    #[error("Missing ESG scores for '{ticker}'")]
    MissingScore {
        /// The ticker without scores.
        ticker: String,
    },

    /// A scenario identifier matched none of the known scenarios.
    #[error("Unknown scenario: '{name}'")]
    UnknownScenario {
        /// The identifier that was supplied.
        name: String,
    },

    /// Division by zero in aggregation.
    #[error("Division by zero in {operation}")]
    DivisionByZero {
        /// The operation that failed.
        operation: String,
    },

    /// Severity outside the 1-5 scale.
    #[error("Invalid severity {value}: must be between 1 and 5")]
    InvalidSeverity {
        /// The rejected severity.
        value: i64,
    },

    /// Investment amount not a positive finite number.
    #[error("Invalid investment amount: {value}")]
    InvalidInvestment {
        /// The rejected amount.
        value: f64,
    },

    /// ESG sub-score outside the 0-100 scale.
    #[error("Invalid {dimension} score {score} for '{ticker}'")]
    InvalidScore {
        /// The ticker carrying the score.
        ticker: String,
        /// The dimension name.
        dimension: String,
        /// The rejected score.
        score: u8,
    },

    /// A collaborator failed outright.
    #[error("Data source error: {0}")]
    Source(#[from] TraitError),
}

impl PortfolioError {
    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a price unavailable error for a set of tickers.
    #[must_use]
    pub fn price_unavailable<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::PriceUnavailable {
            tickers: tickers
                .into_iter()
                .map(|t| t.as_ref().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Create a missing score error.
    #[must_use]
    pub fn missing_score(ticker: impl Into<String>) -> Self {
        Self::MissingScore {
            ticker: ticker.into(),
        }
    }

    /// Create an unknown scenario error.
    #[must_use]
    pub fn unknown_scenario(name: impl Into<String>) -> Self {
        Self::UnknownScenario { name: name.into() }
    }

    /// Create a division by zero error.
    #[must_use]
    pub fn division_by_zero(operation: impl Into<String>) -> Self {
        Self::DivisionByZero {
            operation: operation.into(),
        }
    }

    /// Returns true if the error means "nothing to compute" rather than a failure.
    #[must_use]
    pub fn is_no_op(&self) -> bool {
        matches!(self, Self::NoTickers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::price_unavailable(["AAPL", "ZZZZ"]);
        assert_eq!(err.to_string(), "Price unavailable for AAPL, ZZZZ");

        let err = PortfolioError::missing_score("TSLA");
        assert!(err.to_string().contains("TSLA"));

        let err = PortfolioError::unknown_scenario("Meteor Strike");
        assert!(err.to_string().contains("Meteor Strike"));
    }

    #[test]
    fn test_no_op() {
        assert!(PortfolioError::NoTickers.is_no_op());
        assert!(!PortfolioError::division_by_zero("loss_pct").is_no_op());
    }

    #[test]
    fn test_from_trait_error() {
        let err: PortfolioError = TraitError::NotFound("prices.csv".into()).into();
        assert!(matches!(err, PortfolioError::Source(_)));
        assert!(err.to_string().contains("prices.csv"));
    }
}
