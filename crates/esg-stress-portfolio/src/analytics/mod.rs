//! Portfolio-level analytics.
//!
//! - [`calculate_totals`]: baseline vs stressed totals and loss

mod totals;

pub use totals::{calculate_totals, StressTotals};
