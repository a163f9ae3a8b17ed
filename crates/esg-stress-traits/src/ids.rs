//! Identifier types shared by every collaborator.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::TraitError;

/// Ticker symbol of a tradable instrument.
///
/// Always trimmed, uppercase and non-empty. It is the join key across
/// prices, ESG scores and holding values.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Create a ticker, normalizing whitespace and case.
    pub fn new(symbol: impl AsRef<str>) -> Result<Self, TraitError> {
        let normalized = symbol.as_ref().trim().to_uppercase();
        if normalized.is_empty() {
            return Err(TraitError::InvalidInput("ticker is empty".into()));
        }
        Ok(Self(normalized))
    }

    /// Get the ticker as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = TraitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = TraitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = TraitError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}

impl Borrow<str> for Ticker {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize raw symbols into a ticker list.
///
/// Entries are trimmed and uppercased, blanks are dropped and duplicates are
/// removed keeping the first occurrence.
pub fn normalize_tickers<I, S>(raw: I) -> Vec<Ticker>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter_map(|s| Ticker::new(s).ok())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Parse a comma-separated ticker list such as `"aapl, MSFT,,tsla"`.
pub fn parse_ticker_list(input: &str) -> Vec<Ticker> {
    normalize_tickers(input.split(','))
}
