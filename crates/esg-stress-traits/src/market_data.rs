//! Market data source traits.
//!
//! A [`PriceSource`] returns the latest observed price per ticker. An empty
//! [`PriceTable`] is a valid answer meaning "no data available"; a table that
//! silently omits some requested tickers is a partial answer, and the stress
//! pipeline treats every omitted ticker as a precondition failure.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::TraitError;
use crate::ids::Ticker;

/// Source type for collaborator data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Snapshot/request-response (REST APIs)
    Snapshot,
    /// File-based (CSV, JSON)
    File,
    /// Manual entry / in-memory table
    Manual,
    /// Generated from a seeded pseudo-random source
    Synthetic,
}

// =============================================================================
// PRICE TABLE
// =============================================================================

/// Latest price per ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    prices: HashMap<Ticker, f64>,
}

impl PriceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a price.
    pub fn insert(&mut self, ticker: Ticker, price: f64) {
        self.prices.insert(ticker, price);
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_price(mut self, ticker: Ticker, price: f64) -> Self {
        self.insert(ticker, price);
        self
    }

    /// Price for a ticker, if observed.
    pub fn get(&self, ticker: &str) -> Option<f64> {
        self.prices.get(ticker).copied()
    }

    /// Returns true if the ticker has a price.
    pub fn contains(&self, ticker: &str) -> bool {
        self.prices.contains_key(ticker)
    }

    /// Number of priced tickers.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no prices are present.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Iterate over (ticker, price) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Ticker, f64)> {
        self.prices.iter().map(|(t, p)| (t, *p))
    }

    /// Requested tickers that have no price, in request order.
    pub fn missing<'a>(&self, requested: &'a [Ticker]) -> Vec<&'a Ticker> {
        requested.iter().filter(|t| !self.contains(t.as_str())).collect()
    }

    /// Keep only the requested tickers.
    #[must_use]
    pub fn restricted_to(&self, requested: &[Ticker]) -> Self {
        Self {
            prices: requested
                .iter()
                .filter_map(|t| self.get(t.as_str()).map(|p| (t.clone(), p)))
                .collect(),
        }
    }
}

impl FromIterator<(Ticker, f64)> for PriceTable {
    fn from_iter<T: IntoIterator<Item = (Ticker, f64)>>(iter: T) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// PRICE SOURCE
// =============================================================================

/// Trait for latest-price providers.
///
/// Calls are synchronous and either return a complete answer or fail.
pub trait PriceSource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Get the latest price for each requested ticker.
    ///
    /// Tickers the source knows nothing about are left out of the table.
    fn get_prices(&self, tickers: &[Ticker]) -> Result<PriceTable, TraitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    #[test]
    fn test_missing_preserves_request_order() {
        let table = PriceTable::new().with_price(t("MSFT"), 410.0);
        let requested = vec![t("TSLA"), t("MSFT"), t("AAPL")];

        let missing: Vec<&str> = table.missing(&requested).iter().map(|t| t.as_str()).collect();
        assert_eq!(missing, vec!["TSLA", "AAPL"]);
    }

    #[test]
    fn test_restricted_to() {
        let table: PriceTable = vec![(t("AAPL"), 190.0), (t("MSFT"), 410.0)]
            .into_iter()
            .collect();

        let only_aapl = table.restricted_to(&[t("AAPL"), t("GOOGL")]);
        assert_eq!(only_aapl.len(), 1);
        assert_eq!(only_aapl.get("AAPL"), Some(190.0));
        assert!(!only_aapl.contains("MSFT"));
    }
}
