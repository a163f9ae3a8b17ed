//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{RunArgs, ScenariosArgs, SweepArgs};

/// ESG Stress - Single-factor ESG stress testing for equity portfolios
#[derive(Parser)]
#[command(name = "esg-stress")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (default: ./esg-stress.toml if present)
    #[arg(short, long, global = true, env = "ESG_STRESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Stress an equal-weight portfolio under one scenario
    Run(RunArgs),

    /// Stress a portfolio across every scenario or every severity
    Sweep(SweepArgs),

    /// List the available scenarios
    Scenarios(ScenariosArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
