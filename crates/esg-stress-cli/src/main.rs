//! ESG Stress CLI - Stress equity portfolios against ESG shocks.
//!
//! # Usage
//!
//! ```bash
//! # Stress the default portfolio under a governance scandal
//! esg-stress run --prices prices.csv --scenario governance --severity 5
//!
//! # Every scenario at severity 3, as JSON
//! esg-stress --format json sweep --prices prices.csv --by scenario
//!
//! # List scenarios and their coefficients
//! esg-stress scenarios
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use esg_stress_config::EsgStressConfig;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("esg_stress=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("esg_stress=info"))
    };

    // stdout carries the report; logs stay on stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = cli.format;
    let config = EsgStressConfig::discover(cli.config.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Run(args) => commands::run::execute(args, format, &config)?,
        Commands::Sweep(args) => commands::sweep::execute(args, format, &config)?,
        Commands::Scenarios(args) => commands::scenarios::execute(args, format, &config)?,
    }

    Ok(())
}
