//! # ESG Stress Ext File
//!
//! File-based and in-memory collaborators for the ESG stress tester.
//!
//! This crate provides the default implementations used by the CLI and tests:
//! - CSV and JSON price sources
//! - CSV and JSON ESG score sources
//! - Static (in-memory) sources
//! - A seeded mock ESG score provider
//!
//! For live market data, implement [`PriceSource`] against a quote service.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod market_data;
mod reference_data;

pub use market_data::*;
pub use reference_data::*;

use std::path::Path;
use std::sync::Arc;

use esg_stress_traits::{DataProviders, EsgScoreProvider, PriceSource, PriceTable, TraitError};

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Opens a price file, picking the format from its extension.
///
/// `.json` files are read as a `{"TICKER": price}` object; anything else is
/// read as a `ticker,price` CSV.
pub fn open_price_file(path: impl AsRef<Path>) -> Result<Arc<dyn PriceSource>, TraitError> {
    let path = path.as_ref();
    if is_json(path) {
        Ok(Arc::new(JsonPriceSource::new(path)?))
    } else {
        Ok(Arc::new(CsvPriceSource::new(path)?))
    }
}

/// Opens an ESG score file, picking the format from its extension.
///
/// `.json` files are read as a `{"TICKER": {"environmental": .., "social": ..,
/// "governance": ..}}` object; anything else as a
/// `ticker,e_score,s_score,g_score` CSV.
pub fn open_score_file(path: impl AsRef<Path>) -> Result<Arc<dyn EsgScoreProvider>, TraitError> {
    let path = path.as_ref();
    if is_json(path) {
        Ok(Arc::new(JsonEsgScoreSource::new(path)?))
    } else {
        Ok(Arc::new(CsvEsgScoreSource::new(path)?))
    }
}

/// Create providers backed by a price file and the seeded mock score generator.
pub fn create_file_providers(
    prices: impl AsRef<Path>,
    seed: u64,
) -> Result<DataProviders, TraitError> {
    Ok(DataProviders::new(
        open_price_file(prices)?,
        Arc::new(SeededEsgScoreProvider::new(seed)),
    ))
}

/// Create in-memory providers (for testing/development).
pub fn create_mock_providers(prices: PriceTable, seed: u64) -> DataProviders {
    DataProviders::new(
        Arc::new(StaticPriceSource::new(prices)),
        Arc::new(SeededEsgScoreProvider::new(seed)),
    )
}

/// Create providers that return no data.
pub fn create_empty_providers() -> DataProviders {
    DataProviders::new(Arc::new(EmptyPriceSource), Arc::new(EmptyEsgScoreSource))
}
