//! ESG Stress Configuration Layer
//!
//! Loads the optional `esg-stress.toml` file that supplies default inputs for
//! the stress tester: tickers, investment, scenario, severity, mock score
//! generator settings and data file locations.
//!
//! # Example
//!
//! ```rust
//! use esg_stress_config::EsgStressConfig;
//!
//! let config = EsgStressConfig::from_toml_str(r#"
//!     tickers = ["AAPL", "MSFT"]
//!     scenario = "climate"
//!     severity = 4
//! "#).unwrap();
//!
//! assert_eq!(config.tickers().len(), 2);
//! assert_eq!(config.investment, 100_000.0);
//! ```
//!
//! # Lookup Order
//!
//! 1. `--config <path>` (must exist)
//! 2. `esg-stress.toml` in the working directory
//! 3. Built-in defaults

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod settings;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use settings::{
    DataPaths, EsgStressConfig, ScoreRange, CONFIG_FILE_NAME, DEFAULT_INVESTMENT,
    DEFAULT_SCENARIO, DEFAULT_TICKERS,
};
