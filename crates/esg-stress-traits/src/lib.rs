//! # ESG Stress Traits
//!
//! Trait definitions for the data collaborators of the ESG stress tester.
//!
//! This crate contains ONLY trait definitions and the value types that cross
//! them. All implementations live in separate extension crates.
//!
//! ## Module Structure
//!
//! - [`ids`]: The [`Ticker`] join key and ticker-list normalization
//! - [`market_data`]: [`PriceSource`](market_data::PriceSource) and [`PriceTable`](market_data::PriceTable)
//! - [`reference_data`]: [`EsgScoreProvider`](reference_data::EsgScoreProvider) and ESG score types
//! - [`error`]: [`TraitError`] returned by every collaborator
//!
//! ## Dependency Injection
//!
//! The stress pipeline takes its collaborators as trait objects:
//!
//! ```ignore
//! let providers = DataProviders::new(
//!     Arc::new(CsvPriceSource::new("prices.csv")?),
//!     Arc::new(SeededEsgScoreProvider::new(42)),
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ids;
pub mod market_data;
pub mod reference_data;

use std::sync::Arc;

// Re-export commonly used types
pub use error::TraitError;
pub use ids::*;
pub use market_data::{PriceSource, PriceTable, SourceType};
pub use reference_data::{EsgDimension, EsgScoreProvider, EsgScoreSet, EsgScores};

/// The pair of upstream collaborators a stress evaluation reads from.
#[derive(Clone)]
pub struct DataProviders {
    /// Latest prices per ticker
    pub prices: Arc<dyn PriceSource>,
    /// E/S/G sub-scores per ticker
    pub scores: Arc<dyn EsgScoreProvider>,
}

impl DataProviders {
    /// Bundle a price source and a score provider.
    pub fn new(prices: Arc<dyn PriceSource>, scores: Arc<dyn EsgScoreProvider>) -> Self {
        Self { prices, scores }
    }
}

impl std::fmt::Debug for DataProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataProviders")
            .field("prices", &self.prices.source_type())
            .field("scores", &self.scores.source_type())
            .finish()
    }
}
