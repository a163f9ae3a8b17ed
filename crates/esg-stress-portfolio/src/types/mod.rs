//! Domain types for ESG stress testing.
//!
//! - [`Holding`]: A single equal-weighted position with its baseline value
//! - [`Severity`]: Stress severity on a 1-5 scale
//! - [`ValueMap`]: Monetary value per ticker

mod holding;
mod severity;

use esg_stress_traits::Ticker;
use std::collections::BTreeMap;

pub use holding::Holding;
pub use severity::Severity;

/// Monetary value per ticker, ordered by ticker.
pub type ValueMap = BTreeMap<Ticker, f64>;
