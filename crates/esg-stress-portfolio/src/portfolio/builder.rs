//! Portfolio builder for fluent construction.

use crate::types::Holding;
use crate::{Portfolio, PortfolioError, PortfolioResult};
use esg_stress_traits::{PriceTable, Ticker};
use std::collections::HashSet;

/// Builder for constructing an equal-weighted [`Portfolio`].
///
/// Every ticker receives `1 / n` of the investment, converted to a fractional
/// share count at its current price. No market-cap or custom weighting.
///
/// # Example
///
/// ```rust,ignore
/// use esg_stress_portfolio::prelude::*;
///
/// let portfolio = PortfolioBuilder::new()
///     .add_ticker(Ticker::new("AAPL")?)
///     .add_ticker(Ticker::new("MSFT")?)
///     .investment(100_000.0)
///     .prices(prices)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioBuilder {
    tickers: Vec<Ticker>,
    investment: Option<f64>,
    prices: Option<PriceTable>,
}

impl PortfolioBuilder {
    /// Creates a new portfolio builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a ticker to the portfolio.
    #[must_use]
    pub fn add_ticker(mut self, ticker: Ticker) -> Self {
        self.tickers.push(ticker);
        self
    }

    /// Adds multiple tickers.
    #[must_use]
    pub fn tickers(mut self, tickers: impl IntoIterator<Item = Ticker>) -> Self {
        self.tickers.extend(tickers);
        self
    }

    /// Sets the total investment amount.
    #[must_use]
    pub fn investment(mut self, amount: f64) -> Self {
        self.investment = Some(amount);
        self
    }

    /// Sets the latest prices.
    #[must_use]
    pub fn prices(mut self, prices: PriceTable) -> Self {
        self.prices = Some(prices);
        self
    }

    /// Builds the portfolio.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tickers were added
    /// - The investment is missing, non-positive or non-finite
    /// - Any ticker's price is missing, non-positive or non-finite
    pub fn build(self) -> PortfolioResult<Portfolio> {
        let mut seen = HashSet::new();
        let tickers: Vec<Ticker> = self
            .tickers
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect();

        if tickers.is_empty() {
            return Err(PortfolioError::NoTickers);
        }

        let investment = self
            .investment
            .ok_or_else(|| PortfolioError::missing_field("investment"))?;
        if !investment.is_finite() || investment <= 0.0 {
            return Err(PortfolioError::InvalidInvestment { value: investment });
        }

        let prices = self.prices.unwrap_or_default();
        let weight = 1.0 / tickers.len() as f64;
        let mut holdings = Vec::with_capacity(tickers.len());
        let mut unpriced = Vec::new();

        for ticker in tickers {
            match prices.get(ticker.as_str()) {
                Some(price) if price.is_finite() && price > 0.0 => {
                    holdings.push(Holding::from_allocation(ticker, investment, weight, price));
                }
                _ => unpriced.push(ticker),
            }
        }

        if !unpriced.is_empty() {
            return Err(PortfolioError::price_unavailable(unpriced));
        }

        Ok(Portfolio {
            investment,
            holdings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    #[test]
    fn test_single_holding() {
        let portfolio = PortfolioBuilder::new()
            .add_ticker(t("AAPL"))
            .investment(10_000.0)
            .prices(PriceTable::new().with_price(t("AAPL"), 100.0))
            .build()
            .unwrap();

        let h = &portfolio.holdings[0];
        assert_eq!(h.weight, 1.0);
        assert_eq!(h.shares, 100.0);
        assert_eq!(h.baseline_value, 10_000.0);
    }

    #[test]
    fn test_equal_weight_ignores_price() {
        let portfolio = PortfolioBuilder::new()
            .tickers([t("AAPL"), t("BRK.A")])
            .investment(100_000.0)
            .prices(
                PriceTable::new()
                    .with_price(t("AAPL"), 187.44)
                    .with_price(t("BRK.A"), 612_241.0),
            )
            .build()
            .unwrap();

        for h in &portfolio.holdings {
            assert_relative_eq!(h.weight, 0.5);
            assert_relative_eq!(h.baseline_value, 50_000.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_duplicates_dropped() {
        let portfolio = PortfolioBuilder::new()
            .tickers([t("AAPL"), t("aapl"), t("MSFT")])
            .investment(1_000.0)
            .prices(
                PriceTable::new()
                    .with_price(t("AAPL"), 10.0)
                    .with_price(t("MSFT"), 20.0),
            )
            .build()
            .unwrap();

        assert_eq!(portfolio.holding_count(), 2);
        assert_relative_eq!(portfolio.holdings[0].weight, 0.5);
    }

    #[test]
    fn test_no_tickers() {
        let result = PortfolioBuilder::new().investment(1_000.0).build();
        assert!(matches!(result, Err(PortfolioError::NoTickers)));
    }

    #[test]
    fn test_missing_investment() {
        let result = PortfolioBuilder::new()
            .add_ticker(t("AAPL"))
            .prices(PriceTable::new().with_price(t("AAPL"), 10.0))
            .build();

        assert!(result.unwrap_err().to_string().contains("investment"));
    }

    #[test]
    fn test_invalid_investment() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = PortfolioBuilder::new()
                .add_ticker(t("AAPL"))
                .investment(amount)
                .prices(PriceTable::new().with_price(t("AAPL"), 10.0))
                .build();
            assert!(matches!(result, Err(PortfolioError::InvalidInvestment { .. })));
        }
    }

    #[test]
    fn test_zero_and_missing_prices_fail() {
        let result = PortfolioBuilder::new()
            .tickers([t("AAPL"), t("MSFT"), t("TSLA")])
            .investment(1_000.0)
            .prices(
                PriceTable::new()
                    .with_price(t("AAPL"), 0.0)
                    .with_price(t("MSFT"), 20.0),
            )
            .build();

        match result {
            Err(PortfolioError::PriceUnavailable { tickers }) => assert_eq!(tickers, "AAPL, TSLA"),
            other => panic!("expected PriceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_and_non_finite_prices_fail() {
        let result = PortfolioBuilder::new()
            .tickers([t("AAPL"), t("MSFT"), t("TSLA"), t("NVDA")])
            .investment(1_000.0)
            .prices(
                PriceTable::new()
                    .with_price(t("AAPL"), -5.0)
                    .with_price(t("MSFT"), f64::NAN)
                    .with_price(t("TSLA"), f64::INFINITY)
                    .with_price(t("NVDA"), 20.0),
            )
            .build();

        match result {
            Err(PortfolioError::PriceUnavailable { tickers }) => {
                assert_eq!(tickers, "AAPL, MSFT, TSLA");
            }
            other => panic!("expected PriceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_no_prices_at_all() {
        let result = PortfolioBuilder::new()
            .add_ticker(t("AAPL"))
            .investment(1_000.0)
            .build();

        assert!(matches!(result, Err(PortfolioError::PriceUnavailable { .. })));
    }
}
