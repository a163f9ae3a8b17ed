//! Scenarios command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use esg_stress_config::EsgStressConfig;
use esg_stress_portfolio::{EsgScenario, Severity};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{format_percent, print_header, print_output};

/// Arguments for the scenarios command.
#[derive(Args, Debug)]
pub struct ScenariosArgs {
    /// Severity used for the impact column (default: configured severity)
    #[arg(long)]
    pub severity: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Id")]
    id: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Dimension")]
    dimension: &'static str,
    #[tabled(rename = "Coefficient")]
    coefficient: f64,
    #[tabled(rename = "Impact")]
    impact: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

impl ScenarioRow {
    fn new(scenario: EsgScenario, severity: Severity) -> Self {
        Self {
            id: scenario.id(),
            name: scenario.name(),
            dimension: scenario.dimension().name(),
            coefficient: scenario.base_coefficient(),
            impact: format_percent(scenario.impact_factor(severity)),
            description: scenario.description(),
        }
    }
}

/// Execute the scenarios command.
pub fn execute(args: ScenariosArgs, format: OutputFormat, config: &EsgStressConfig) -> Result<()> {
    let severity = Severity::try_from(args.severity.unwrap_or(config.severity)).map_err(CliError::from)?;
    let rows: Vec<ScenarioRow> = EsgScenario::ALL
        .iter()
        .map(|s| ScenarioRow::new(*s, severity))
        .collect();

    if format == OutputFormat::Table {
        print_header(&format!("ESG Scenarios at severity {}", severity));
    }
    print_output(&rows, format)?;
    Ok(())
}
