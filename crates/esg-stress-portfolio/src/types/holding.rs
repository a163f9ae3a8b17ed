//! Holding types.

use esg_stress_traits::Ticker;
use serde::{Deserialize, Serialize};

/// A single equal-weighted position.
///
/// The baseline value is reached through the share count
/// (`shares = allocation / price`, `baseline = shares × price`), so it equals
/// the allocation up to floating-point rounding. Shares are fractional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol.
    pub ticker: Ticker,

    /// Latest price used to size the position.
    pub price: f64,

    /// Portfolio weight (0-1).
    pub weight: f64,

    /// Fractional share count.
    pub shares: f64,

    /// Baseline monetary value.
    pub baseline_value: f64,
}

impl Holding {
    /// Sizes a holding from its allocation and price.
    ///
    /// The caller guarantees a positive, finite price.
    #[must_use]
    pub fn from_allocation(ticker: Ticker, investment: f64, weight: f64, price: f64) -> Self {
        let shares = (investment * weight) / price;
        Self {
            ticker,
            price,
            weight,
            shares,
            baseline_value: shares * price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_share_round_trip() {
        let h = Holding::from_allocation(Ticker::new("AAPL").unwrap(), 10_000.0, 1.0, 100.0);
        assert_eq!(h.shares, 100.0);
        assert_eq!(h.baseline_value, 10_000.0);
    }

    #[test]
    fn test_fractional_shares() {
        let h = Holding::from_allocation(Ticker::new("BRK.A").unwrap(), 1_000.0, 0.5, 650_000.0);
        assert!(h.shares < 1.0);
        assert_relative_eq!(h.baseline_value, 500.0, max_relative = 1e-12);
    }
}
