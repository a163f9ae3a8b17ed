//! Portfolio struct and core methods.

use crate::types::{Holding, ValueMap};
use esg_stress_traits::{PriceTable, Ticker};
use serde::{Deserialize, Serialize};

/// An equal-weighted equity portfolio.
///
/// Holdings keep the order in which tickers were supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Total amount invested.
    pub investment: f64,

    /// Positions, one per ticker.
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    /// Creates a new portfolio builder.
    #[must_use]
    pub fn builder() -> super::PortfolioBuilder {
        super::PortfolioBuilder::new()
    }

    /// Builds an equal-weighted portfolio in one call.
    ///
    /// # Errors
    ///
    /// See [`PortfolioBuilder::build`](super::PortfolioBuilder::build).
    pub fn equal_weight(
        tickers: &[Ticker],
        investment: f64,
        prices: &PriceTable,
    ) -> crate::PortfolioResult<Self> {
        super::PortfolioBuilder::new()
            .tickers(tickers.iter().cloned())
            .investment(investment)
            .prices(prices.clone())
            .build()
    }

    /// Returns the number of holdings.
    #[must_use]
    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    /// Returns true if the portfolio has no holdings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Tickers in holding order.
    #[must_use]
    pub fn tickers(&self) -> Vec<Ticker> {
        self.holdings.iter().map(|h| h.ticker.clone()).collect()
    }

    /// Looks up a holding by ticker.
    #[must_use]
    pub fn holding(&self, ticker: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.ticker.as_str() == ticker)
    }

    /// Baseline value per ticker.
    #[must_use]
    pub fn baseline_values(&self) -> ValueMap {
        self.holdings
            .iter()
            .map(|h| (h.ticker.clone(), h.baseline_value))
            .collect()
    }

    /// Sum of baseline values.
    #[must_use]
    pub fn total_baseline(&self) -> f64 {
        self.holdings.iter().map(|h| h.baseline_value).sum()
    }

    /// Sum of holding weights (1.0 for any non-empty portfolio).
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.holdings.iter().map(|h| h.weight).sum()
    }
}
