//! CLI command implementations.

pub mod run;
pub mod scenarios;
pub mod sweep;

// Re-export submodules for convenience
pub use run::RunArgs;
pub use scenarios::ScenariosArgs;
pub use sweep::SweepArgs;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::warn;

use esg_stress_config::EsgStressConfig;
use esg_stress_ext_file::{open_price_file, open_score_file, EmptyPriceSource, SeededEsgScoreProvider};
use esg_stress_portfolio::{EsgScenario, PortfolioError, Severity, StressRequest};
use esg_stress_traits::{parse_ticker_list, DataProviders, EsgScoreProvider, PriceSource};

use crate::error::CliResult;
use crate::output::print_warning;

/// Portfolio and data inputs shared by `run` and `sweep`.
///
/// Each flag falls back to the configuration file, then to the defaults.
#[derive(Args, Debug, Default)]
pub struct StressInputArgs {
    /// Comma-separated tickers (e.g. "AAPL, MSFT, TSLA")
    #[arg(short, long)]
    pub tickers: Option<String>,

    /// Total investment, split equally across tickers
    #[arg(short, long)]
    pub investment: Option<f64>,

    /// Scenario: climate, labor-strike, governance, or a display name
    #[arg(long)]
    pub scenario: Option<String>,

    /// Severity from 1 (mild) to 5 (extreme)
    #[arg(long)]
    pub severity: Option<i64>,

    /// Price file (.csv with ticker,price or .json object)
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// ESG score file; replaces the seeded mock scores
    #[arg(long)]
    pub scores: Option<PathBuf>,

    /// Seed for mock ESG scores
    #[arg(long)]
    pub seed: Option<u64>,
}

/// A validated request plus the collaborators to evaluate it against.
pub struct StressInputs {
    pub request: StressRequest,
    pub providers: DataProviders,
}

/// Merges flags over configuration and opens the data sources.
pub fn prepare(args: &StressInputArgs, config: &EsgStressConfig) -> CliResult<StressInputs> {
    let tickers = match &args.tickers {
        Some(raw) => parse_ticker_list(raw),
        None => config.tickers(),
    };
    // An empty list is a no-op whatever the other inputs say.
    if tickers.is_empty() {
        return Err(PortfolioError::NoTickers.into());
    }

    let scenario: EsgScenario = args
        .scenario
        .as_deref()
        .unwrap_or(config.scenario.as_str())
        .parse()?;
    let severity = Severity::try_from(args.severity.unwrap_or(config.severity))?;
    let investment = args.investment.unwrap_or(config.investment);

    let request = StressRequest::new(tickers, investment, scenario, severity)?;

    let prices: Arc<dyn PriceSource> = match args.prices.as_ref().or(config.data.prices.as_ref()) {
        Some(path) => open_price_file(path)?,
        None => {
            warn!("no price file configured");
            Arc::new(EmptyPriceSource)
        }
    };

    let scores: Arc<dyn EsgScoreProvider> = match args.scores.as_ref().or(config.data.scores.as_ref()) {
        Some(path) => open_score_file(path)?,
        None => Arc::new(
            SeededEsgScoreProvider::new(args.seed.unwrap_or(config.seed))
                .with_range(config.scores.min, config.scores.max)?,
        ),
    };

    Ok(StressInputs {
        request,
        providers: DataProviders::new(prices, scores),
    })
}

/// Like [`prepare`], but an empty ticker list prints a notice and yields `None`.
pub fn prepare_or_skip(
    args: &StressInputArgs,
    config: &EsgStressConfig,
) -> CliResult<Option<StressInputs>> {
    match prepare(args, config) {
        Ok(inputs) => Ok(Some(inputs)),
        Err(e) if e.is_no_op() => {
            print_warning("No tickers given. Nothing to stress.");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
