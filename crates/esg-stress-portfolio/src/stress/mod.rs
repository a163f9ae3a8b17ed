//! Stress testing for portfolios.
//!
//! This module provides:
//! - Scenario definitions bound to one ESG dimension each
//! - Per-holding impact calculations driven by ESG risk exposure
//! - Multi-scenario and severity-ladder analysis
//!
//! ```text
//! impact_factor = base_coefficient × severity
//! exposure      = 1 - score / 100
//! stressed      = baseline × (1 - impact_factor × exposure)
//! ```

mod impact;
mod scenarios;

pub use impact::*;
pub use scenarios::*;
