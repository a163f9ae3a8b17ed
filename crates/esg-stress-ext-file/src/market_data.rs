//! File-based and in-memory price sources.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use serde::Deserialize;
use tracing::{debug, warn};

use esg_stress_traits::{PriceSource, PriceTable, SourceType, Ticker, TraitError};

/// Swaps `fresh` in as the cache contents.
fn replace_all(cache: &DashMap<Ticker, f64>, fresh: HashMap<Ticker, f64>) {
    cache.retain(|ticker, _| fresh.contains_key(ticker));
    for (ticker, price) in fresh {
        cache.insert(ticker, price);
    }
}

fn lookup(cache: &DashMap<Ticker, f64>, tickers: &[Ticker]) -> PriceTable {
    tickers
        .iter()
        .filter_map(|t| cache.get(t).map(|p| (t.clone(), *p)))
        .collect()
}

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// CSV record for prices.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    ticker: String,
    price: f64,
}

/// CSV-based price source with a `ticker,price` header.
///
/// A missing file yields an empty source, which the stress pipeline reports
/// as unavailable prices.
pub struct CsvPriceSource {
    file_path: PathBuf,
    prices: DashMap<Ticker, f64>,
}

impl CsvPriceSource {
    /// Create a new CSV price source.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            prices: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload prices from file.
    ///
    /// On error the previously loaded prices are kept unchanged.
    pub fn reload(&self) -> Result<(), TraitError> {
        if !self.file_path.exists() {
            warn!(path = %self.file_path.display(), "price file not found");
            self.prices.clear();
            return Ok(()); // Empty source
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        let mut fresh = HashMap::new();
        for result in reader.deserialize() {
            let record: PriceRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            fresh.insert(Ticker::new(&record.ticker)?, record.price);
        }
        replace_all(&self.prices, fresh);

        debug!(path = %self.file_path.display(), count = self.prices.len(), "price file loaded");
        Ok(())
    }

    /// Number of tickers loaded.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no prices were loaded.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceSource for CsvPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn get_prices(&self, tickers: &[Ticker]) -> Result<PriceTable, TraitError> {
        Ok(lookup(&self.prices, tickers))
    }
}

// =============================================================================
// JSON PRICE SOURCE
// =============================================================================

/// JSON-based price source reading a `{"TICKER": price}` object.
pub struct JsonPriceSource {
    file_path: PathBuf,
    prices: DashMap<Ticker, f64>,
}

impl JsonPriceSource {
    /// Create a new JSON price source.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            prices: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload prices from file.
    ///
    /// On error the previously loaded prices are kept unchanged.
    pub fn reload(&self) -> Result<(), TraitError> {
        if !self.file_path.exists() {
            warn!(path = %self.file_path.display(), "price file not found");
            self.prices.clear();
            return Ok(()); // Empty source
        }

        let content = std::fs::read_to_string(&self.file_path)?;
        let raw: BTreeMap<String, f64> =
            serde_json::from_str(&content).map_err(|e| TraitError::ParseError(e.to_string()))?;

        let fresh = raw
            .into_iter()
            .map(|(symbol, price)| Ok((Ticker::new(&symbol)?, price)))
            .collect::<Result<HashMap<_, _>, TraitError>>()?;
        replace_all(&self.prices, fresh);

        debug!(path = %self.file_path.display(), count = self.prices.len(), "price file loaded");
        Ok(())
    }
}

impl PriceSource for JsonPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn get_prices(&self, tickers: &[Ticker]) -> Result<PriceTable, TraitError> {
        Ok(lookup(&self.prices, tickers))
    }
}

// =============================================================================
// STATIC / EMPTY IMPLEMENTATIONS
// =============================================================================

/// In-memory price source.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    table: PriceTable,
}

impl StaticPriceSource {
    /// Create a source serving `table`.
    pub fn new(table: PriceTable) -> Self {
        Self { table }
    }
}

impl PriceSource for StaticPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    fn get_prices(&self, tickers: &[Ticker]) -> Result<PriceTable, TraitError> {
        Ok(self.table.restricted_to(tickers))
    }
}

/// Empty price source.
pub struct EmptyPriceSource;

impl PriceSource for EmptyPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    fn get_prices(&self, _tickers: &[Ticker]) -> Result<PriceTable, TraitError> {
        Ok(PriceTable::new())
    }
}
