//! ESG score sources: files, static tables and the seeded mock generator.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{debug, warn};

use esg_stress_traits::reference_data::MAX_ESG_SCORE;
use esg_stress_traits::{EsgScoreProvider, EsgScoreSet, EsgScores, SourceType, Ticker, TraitError};

/// Default seed of the mock score generator.
pub const DEFAULT_SEED: u64 = 42;

/// Default inclusive lower bound of mock scores.
pub const DEFAULT_SCORE_MIN: u8 = 30;

/// Default exclusive upper bound of mock scores.
pub const DEFAULT_SCORE_MAX: u8 = 95;

/// Swaps `fresh` in as the cache contents.
fn replace_all(cache: &DashMap<Ticker, EsgScores>, fresh: HashMap<Ticker, EsgScores>) {
    cache.retain(|ticker, _| fresh.contains_key(ticker));
    for (ticker, scores) in fresh {
        cache.insert(ticker, scores);
    }
}

fn lookup(cache: &DashMap<Ticker, EsgScores>, tickers: &[Ticker]) -> EsgScoreSet {
    tickers
        .iter()
        .filter_map(|t| cache.get(t).map(|s| (t.clone(), *s)))
        .collect()
}

// =============================================================================
// SEEDED MOCK PROVIDER
// =============================================================================

/// Deterministic pseudo-random ESG scores.
///
/// Each call reseeds a [`StdRng`] and draws E, S and G for every ticker in
/// request order, so the same ticker list always yields the same scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededEsgScoreProvider {
    seed: u64,
    range: Range<u8>,
}

impl SeededEsgScoreProvider {
    /// Create a provider drawing from the default range `[30, 95)`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            range: DEFAULT_SCORE_MIN..DEFAULT_SCORE_MAX,
        }
    }

    /// Draw scores from `[min, max)` instead.
    ///
    /// Fails with [`TraitError::InvalidInput`] unless `min < max <= 101`.
    pub fn with_range(mut self, min: u8, max: u8) -> Result<Self, TraitError> {
        if min >= max || max > MAX_ESG_SCORE + 1 {
            return Err(TraitError::InvalidInput(format!(
                "score range [{min}, {max}) must be non-empty and within 0..=100"
            )));
        }
        self.range = min..max;
        Ok(self)
    }

    /// The generator seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The half-open score range.
    pub fn range(&self) -> Range<u8> {
        self.range.clone()
    }
}

impl Default for SeededEsgScoreProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl EsgScoreProvider for SeededEsgScoreProvider {
    fn source_type(&self) -> SourceType {
        SourceType::Synthetic
    }

    fn get_scores(&self, tickers: &[Ticker]) -> Result<EsgScoreSet, TraitError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let scores = tickers
            .iter()
            .map(|ticker| {
                let environmental = rng.gen_range(self.range.clone());
                let social = rng.gen_range(self.range.clone());
                let governance = rng.gen_range(self.range.clone());
                (
                    ticker.clone(),
                    EsgScores::new(environmental, social, governance),
                )
            })
            .collect();
        debug!(seed = self.seed, count = tickers.len(), "mock ESG scores generated");
        Ok(scores)
    }
}

// =============================================================================
// CSV SCORE SOURCE
// =============================================================================

/// CSV record for ESG scores.
#[derive(Debug, Deserialize)]
struct ScoreRecord {
    ticker: String,
    e_score: u8,
    s_score: u8,
    g_score: u8,
}

/// CSV-based score source with a `ticker,e_score,s_score,g_score` header.
///
/// Scores are passed through as read; range checks happen in the stress
/// engine before any arithmetic.
pub struct CsvEsgScoreSource {
    file_path: PathBuf,
    scores: DashMap<Ticker, EsgScores>,
}

impl CsvEsgScoreSource {
    /// Create a new CSV score source.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            scores: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload scores from file.
    ///
    /// On error the previously loaded scores are kept unchanged.
    pub fn reload(&self) -> Result<(), TraitError> {
        if !self.file_path.exists() {
            warn!(path = %self.file_path.display(), "score file not found");
            self.scores.clear();
            return Ok(()); // Empty source
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        let mut fresh = HashMap::new();
        for result in reader.deserialize() {
            let record: ScoreRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            fresh.insert(
                Ticker::new(&record.ticker)?,
                EsgScores::new(record.e_score, record.s_score, record.g_score),
            );
        }
        replace_all(&self.scores, fresh);

        debug!(path = %self.file_path.display(), count = self.scores.len(), "score file loaded");
        Ok(())
    }

    /// Number of tickers loaded.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns true if no scores were loaded.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl EsgScoreProvider for CsvEsgScoreSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn get_scores(&self, tickers: &[Ticker]) -> Result<EsgScoreSet, TraitError> {
        Ok(lookup(&self.scores, tickers))
    }
}

// =============================================================================
// JSON SCORE SOURCE
// =============================================================================

/// JSON-based score source keyed by ticker.
pub struct JsonEsgScoreSource {
    file_path: PathBuf,
    scores: DashMap<Ticker, EsgScores>,
}

impl JsonEsgScoreSource {
    /// Create a new JSON score source.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            scores: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload scores from file.
    ///
    /// On error the previously loaded scores are kept unchanged.
    pub fn reload(&self) -> Result<(), TraitError> {
        if !self.file_path.exists() {
            warn!(path = %self.file_path.display(), "score file not found");
            self.scores.clear();
            return Ok(()); // Empty source
        }

        let content = std::fs::read_to_string(&self.file_path)?;
        let raw: BTreeMap<String, EsgScores> =
            serde_json::from_str(&content).map_err(|e| TraitError::ParseError(e.to_string()))?;

        let fresh = raw
            .into_iter()
            .map(|(symbol, scores)| Ok((Ticker::new(&symbol)?, scores)))
            .collect::<Result<HashMap<_, _>, TraitError>>()?;
        replace_all(&self.scores, fresh);

        debug!(path = %self.file_path.display(), count = self.scores.len(), "score file loaded");
        Ok(())
    }
}

impl EsgScoreProvider for JsonEsgScoreSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn get_scores(&self, tickers: &[Ticker]) -> Result<EsgScoreSet, TraitError> {
        Ok(lookup(&self.scores, tickers))
    }
}

// =============================================================================
// STATIC / EMPTY IMPLEMENTATIONS
// =============================================================================

/// In-memory score source.
#[derive(Debug, Clone, Default)]
pub struct StaticEsgScoreSource {
    scores: EsgScoreSet,
}

impl StaticEsgScoreSource {
    /// Create a source serving `scores`.
    pub fn new(scores: EsgScoreSet) -> Self {
        Self { scores }
    }
}

impl EsgScoreProvider for StaticEsgScoreSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    fn get_scores(&self, tickers: &[Ticker]) -> Result<EsgScoreSet, TraitError> {
        Ok(tickers
            .iter()
            .filter_map(|t| self.scores.get(t.as_str()).map(|s| (t.clone(), *s)))
            .collect())
    }
}

/// Empty score source.
pub struct EmptyEsgScoreSource;

impl EsgScoreProvider for EmptyEsgScoreSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    fn get_scores(&self, _tickers: &[Ticker]) -> Result<EsgScoreSet, TraitError> {
        Ok(EsgScoreSet::new())
    }
}
