//! # ESG Stress Portfolio
//!
//! Single-factor ESG stress testing for equal-weighted equity portfolios.
//!
//! Given tickers, latest prices and per-ticker E/S/G sub-scores, this crate
//! builds an equal-weighted portfolio and estimates its value under one of
//! three ESG stress scenarios at a chosen severity.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Builder, stress engine and aggregation are stateless with explicit inputs
//! - **Closed scenarios**: Scenario dispatch is an exhaustive enum; unknown identifiers are errors
//! - **Explicit join key**: Tickers are checked against prices and scores before any arithmetic
//! - **Injected collaborators**: Prices and scores come through [`esg_stress_traits`] trait objects
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use esg_stress_portfolio::prelude::*;
//!
//! let portfolio = PortfolioBuilder::new()
//!     .tickers(tickers)
//!     .investment(100_000.0)
//!     .prices(prices)
//!     .build()?;
//!
//! let result = run_stress_test(&portfolio, &scores, EsgScenario::GovernanceScandal, Severity::MAX)?;
//! println!("{:.2} -> {:.2} ({:.2}%)", result.total_baseline, result.total_stressed, result.loss_pct);
//! ```
//!
//! ## Module Overview
//!
//! - [`portfolio`] - Portfolio and equal-weight builder
//! - [`stress`] - Scenarios, impact calculations, multi-scenario sweeps
//! - [`analytics`] - Baseline vs stressed totals
//! - [`evaluation`] - Fetch, build and stress in one call
//! - [`types`] - Core types (Holding, Severity)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

// Module declarations
pub mod analytics;
pub mod error;
pub mod evaluation;
pub mod portfolio;
pub mod stress;
pub mod types;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{Holding, Severity, ValueMap};

// Re-export portfolio types
pub use portfolio::{Portfolio, PortfolioBuilder};

// Re-export analytics
pub use analytics::{calculate_totals, StressTotals};

// Re-export stress testing types and functions
pub use stress::{
    apply_stress, best_case, risk_exposure, run_severity_ladder, run_stress_scenarios,
    run_stress_test, shock, stressed_value, summarize_results, worst_case, EsgScenario,
    HoldingStress, StressResult, StressSummary,
};

// Re-export evaluation pipeline
pub use evaluation::{evaluate, fetch_snapshot, MarketSnapshot, StressEvaluation, StressRequest};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use esg_stress_portfolio::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{PortfolioError, PortfolioResult};

    // Core types
    pub use crate::types::{Holding, Severity, ValueMap};

    // Portfolio
    pub use crate::portfolio::{Portfolio, PortfolioBuilder};

    // Stress testing
    pub use crate::analytics::{calculate_totals, StressTotals};
    pub use crate::stress::{
        apply_stress, run_severity_ladder, run_stress_scenarios, run_stress_test,
        summarize_results, EsgScenario, HoldingStress, StressResult, StressSummary,
    };

    // Evaluation
    pub use crate::evaluation::{evaluate, StressEvaluation, StressRequest};

    // Re-export commonly used types from the trait crate
    pub use esg_stress_traits::{
        DataProviders, EsgDimension, EsgScoreSet, EsgScores, PriceTable, Ticker,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        // Basic smoke test
        let err = PortfolioError::NoTickers;
        assert!(err.to_string().contains("No tickers"));
    }
}
