//! Portfolio-level aggregation of baseline and stressed values.

use crate::types::ValueMap;
use crate::{PortfolioError, PortfolioResult};
use serde::{Deserialize, Serialize};

/// Aggregate baseline vs stressed figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressTotals {
    /// Sum of baseline values.
    pub total_baseline: f64,

    /// Sum of stressed values.
    pub total_stressed: f64,

    /// `total_baseline - total_stressed`.
    pub loss: f64,

    /// `loss / total_baseline × 100`.
    pub loss_pct: f64,
}

/// Totals baseline and stressed values and derives the loss.
///
/// ```text
/// loss     = Σ baseline - Σ stressed
/// loss_pct = loss / Σ baseline × 100
/// ```
///
/// # Errors
///
/// Returns [`PortfolioError::DivisionByZero`] when the baseline total is not
/// positive (e.g. an empty portfolio), since the percentage is undefined.
/// Returns [`PortfolioError::MissingScore`] when a ticker appears in only one
/// of the two maps.
pub fn calculate_totals(baseline: &ValueMap, stressed: &ValueMap) -> PortfolioResult<StressTotals> {
    if let Some(ticker) = baseline
        .keys()
        .find(|t| !stressed.contains_key(*t))
        .or_else(|| stressed.keys().find(|t| !baseline.contains_key(*t)))
    {
        return Err(PortfolioError::missing_score(ticker.as_str()));
    }

    let total_baseline: f64 = baseline.values().sum();
    let total_stressed: f64 = stressed.values().sum();

    if total_baseline.is_nan() || total_baseline <= 0.0 {
        return Err(PortfolioError::division_by_zero("loss percentage"));
    }

    let loss = total_baseline - total_stressed;

    Ok(StressTotals {
        total_baseline,
        total_stressed,
        loss,
        loss_pct: loss / total_baseline * 100.0,
    })
}
