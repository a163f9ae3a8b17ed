//! Reference data source traits.
//!
//! An [`EsgScoreProvider`] returns Environmental, Social and Governance
//! sub-scores per ticker on a 0-100 scale (higher = stronger, lower risk).
//! Scores are semi-static; they are fetched fresh for every evaluation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::TraitError;
use crate::ids::Ticker;
use crate::market_data::SourceType;

/// Upper bound of the ESG score scale.
pub const MAX_ESG_SCORE: u8 = 100;

// =============================================================================
// ESG SCORES
// =============================================================================

/// One of the three ESG dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EsgDimension {
    /// Environmental
    Environmental,
    /// Social
    Social,
    /// Governance
    Governance,
}

impl EsgDimension {
    /// All dimensions in E, S, G order.
    pub const ALL: [EsgDimension; 3] = [Self::Environmental, Self::Social, Self::Governance];

    /// Single-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Environmental => "E",
            Self::Social => "S",
            Self::Governance => "G",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Environmental => "Environmental",
            Self::Social => "Social",
            Self::Governance => "Governance",
        }
    }
}

impl fmt::Display for EsgDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// E/S/G sub-scores for a single ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsgScores {
    /// Environmental score (0-100)
    pub environmental: u8,
    /// Social score (0-100)
    pub social: u8,
    /// Governance score (0-100)
    pub governance: u8,
}

impl EsgScores {
    /// Create a score triple.
    pub fn new(environmental: u8, social: u8, governance: u8) -> Self {
        Self {
            environmental,
            social,
            governance,
        }
    }

    /// Same score on every dimension.
    pub fn uniform(score: u8) -> Self {
        Self::new(score, score, score)
    }

    /// Score on the given dimension.
    pub fn get(&self, dimension: EsgDimension) -> u8 {
        match dimension {
            EsgDimension::Environmental => self.environmental,
            EsgDimension::Social => self.social,
            EsgDimension::Governance => self.governance,
        }
    }

    /// Returns true if every sub-score lies on the 0-100 scale.
    pub fn is_in_range(&self) -> bool {
        EsgDimension::ALL
            .iter()
            .all(|d| self.get(*d) <= MAX_ESG_SCORE)
    }
}

/// E/S/G sub-scores keyed by ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EsgScoreSet {
    scores: HashMap<Ticker, EsgScores>,
}

impl EsgScoreSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the scores of a ticker.
    pub fn insert(&mut self, ticker: Ticker, scores: EsgScores) {
        self.scores.insert(ticker, scores);
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_scores(mut self, ticker: Ticker, scores: EsgScores) -> Self {
        self.insert(ticker, scores);
        self
    }

    /// Scores of a ticker, if present.
    pub fn get(&self, ticker: &str) -> Option<&EsgScores> {
        self.scores.get(ticker)
    }

    /// Returns true if the ticker has scores.
    pub fn contains(&self, ticker: &str) -> bool {
        self.scores.contains_key(ticker)
    }

    /// Number of scored tickers.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns true if no scores are present.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate over (ticker, scores) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Ticker, &EsgScores)> {
        self.scores.iter()
    }

    /// Requested tickers that have no scores, in request order.
    pub fn missing<'a>(&self, requested: &'a [Ticker]) -> Vec<&'a Ticker> {
        requested.iter().filter(|t| !self.contains(t.as_str())).collect()
    }
}

impl FromIterator<(Ticker, EsgScores)> for EsgScoreSet {
    fn from_iter<T: IntoIterator<Item = (Ticker, EsgScores)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// ESG SCORE PROVIDER
// =============================================================================

/// Trait for ESG score providers.
pub trait EsgScoreProvider: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Get E/S/G sub-scores for each requested ticker.
    fn get_scores(&self, tickers: &[Ticker]) -> Result<EsgScoreSet, TraitError>;
}
