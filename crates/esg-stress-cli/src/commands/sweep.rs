//! Sweep command implementation.
//!
//! Evaluates one portfolio under every scenario at a fixed severity, or under
//! every severity of a fixed scenario, and summarizes the outcomes.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use esg_stress_config::EsgStressConfig;
use esg_stress_portfolio::{
    evaluate, run_severity_ladder, run_stress_scenarios, summarize_results, EsgScenario,
    StressResult, StressSummary,
};

use crate::cli::OutputFormat;
use crate::commands::{prepare_or_skip, StressInputArgs};
use crate::error::CliError;
use crate::output::{
    format_loss_delta, format_percent, print_header, print_json, print_output,
    KeyValue,
};

/// Which axis to sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepBy {
    /// Every scenario at the chosen severity
    #[default]
    Scenario,
    /// Every severity of the chosen scenario
    Severity,
}

/// Arguments for the sweep command.
#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub inputs: StressInputArgs,

    /// Axis to sweep
    #[arg(long, value_enum, default_value = "scenario")]
    pub by: SweepBy,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct SweepRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Severity")]
    severity: u8,
    #[tabled(rename = "Impact")]
    impact: String,
    #[tabled(rename = "Stressed")]
    stressed: String,
    #[tabled(rename = "Loss")]
    loss: String,
    #[tabled(rename = "Loss %")]
    loss_pct: String,
}

impl From<&StressResult> for SweepRow {
    fn from(r: &StressResult) -> Self {
        Self {
            scenario: r.scenario.name().to_string(),
            severity: r.severity.value(),
            impact: format_percent(r.impact_factor),
            stressed: format!("{:.2}", r.total_stressed),
            loss: format!("{:.2}", r.loss),
            loss_pct: format!("{:.2}", r.loss_pct),
        }
    }
}

#[derive(Debug, Serialize)]
struct SweepPoint {
    scenario: EsgScenario,
    severity: u8,
    impact_factor: f64,
    total_baseline: f64,
    total_stressed: f64,
    loss: f64,
    loss_pct: f64,
}

#[derive(Debug, Serialize)]
struct SweepReport<'a> {
    by: SweepBy,
    results: Vec<SweepPoint>,
    summary: &'a StressSummary,
}

fn case_label(scenario: EsgScenario, severity: u8, loss: f64, loss_pct: f64) -> String {
    format!(
        "{} @ {}: {}",
        scenario.name(),
        severity,
        format_loss_delta(loss, loss_pct)
    )
}

/// Execute the sweep command.
pub fn execute(args: SweepArgs, format: OutputFormat, config: &EsgStressConfig) -> Result<()> {
    let Some(inputs) = prepare_or_skip(&args.inputs, config)? else {
        return Ok(());
    };
    let request = &inputs.request;

    let eval = evaluate(request, &inputs.providers).map_err(CliError::from)?;
    let results = match args.by {
        SweepBy::Scenario => run_stress_scenarios(
            &eval.portfolio,
            &eval.snapshot.scores,
            &EsgScenario::ALL,
            request.severity,
        ),
        SweepBy::Severity => {
            run_severity_ladder(&eval.portfolio, &eval.snapshot.scores, request.scenario)
        }
    }
    .map_err(CliError::from)?;

    let Some(summary) = summarize_results(&results) else {
        return Ok(());
    };

    match format {
        OutputFormat::Table => {
            let title = match args.by {
                SweepBy::Scenario => format!("ESG Stress Sweep: all scenarios, severity {}", request.severity),
                SweepBy::Severity => format!("ESG Stress Sweep: {}, all severities", request.scenario.name()),
            };
            print_header(&title);
            let rows: Vec<SweepRow> = results.iter().map(SweepRow::from).collect();
            print_output(&rows, format)?;

            print_header("Summary");
            let lines = vec![
                KeyValue::money("Baseline Value", eval.result.total_baseline),
                KeyValue::new(
                    "Worst Case",
                    case_label(
                        summary.worst_scenario,
                        summary.worst_severity.value(),
                        summary.worst_loss,
                        summary.worst_loss_pct,
                    ),
                ),
                KeyValue::new(
                    "Best Case",
                    case_label(
                        summary.best_scenario,
                        summary.best_severity.value(),
                        summary.best_loss,
                        summary.best_loss_pct,
                    ),
                ),
                KeyValue::new(
                    "Average Loss",
                    format_loss_delta(summary.avg_loss, summary.avg_loss_pct),
                ),
            ];
            print_output(&lines, format)?;
        }
        OutputFormat::Json => {
            let report = SweepReport {
                by: args.by,
                results: results
                    .iter()
                    .map(|r| SweepPoint {
                        scenario: r.scenario,
                        severity: r.severity.value(),
                        impact_factor: r.impact_factor,
                        total_baseline: r.total_baseline,
                        total_stressed: r.total_stressed,
                        loss: r.loss,
                        loss_pct: r.loss_pct,
                    })
                    .collect(),
                summary: &summary,
            };
            print_json(&report)?;
        }
        OutputFormat::Csv => {
            let rows: Vec<SweepRow> = results.iter().map(SweepRow::from).collect();
            print_output(&rows, format)?;
        }
        OutputFormat::Minimal => println!("{:.2}", summary.worst_loss_pct),
    }

    Ok(())
}
