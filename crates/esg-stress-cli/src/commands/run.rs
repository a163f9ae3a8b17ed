//! Run command implementation.
//!
//! Builds an equal-weight portfolio and stresses it under one scenario.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use esg_stress_config::EsgStressConfig;
use esg_stress_portfolio::{evaluate, EsgScenario, StressEvaluation};

use crate::cli::OutputFormat;
use crate::commands::{prepare_or_skip, StressInputArgs};
use crate::error::CliError;
use crate::output::{
    format_2dp, format_loss_delta, format_percent, print_divider, print_header,
    print_info, print_json, print_output, render_bar_chart, KeyValue,
};

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub inputs: StressInputArgs,

    /// Show a baseline vs stressed bar chart
    #[arg(long)]
    pub chart: bool,
}

/// One row of the per-holding table.
#[derive(Debug, Clone, Serialize, Tabled)]
struct HoldingRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "E")]
    e: u8,
    #[tabled(rename = "S")]
    s: u8,
    #[tabled(rename = "G")]
    g: u8,
    #[tabled(rename = "Base")]
    base: String,
    #[tabled(rename = "Stressed")]
    stressed: String,
}

#[derive(Debug, Serialize)]
struct HoldingReport {
    ticker: String,
    price: f64,
    shares: f64,
    environmental: u8,
    social: u8,
    governance: u8,
    risk_exposure: f64,
    shock: f64,
    baseline_value: f64,
    stressed_value: f64,
}

#[derive(Debug, Serialize)]
struct RunReport {
    scenario: EsgScenario,
    scenario_name: &'static str,
    severity: u8,
    impact_factor: f64,
    investment: f64,
    total_baseline: f64,
    total_stressed: f64,
    loss: f64,
    loss_pct: f64,
    holdings: Vec<HoldingReport>,
}

fn price_of(eval: &StressEvaluation, ticker: &str) -> f64 {
    eval.portfolio.holding(ticker).map_or(f64::NAN, |h| h.price)
}

fn holding_rows(eval: &StressEvaluation) -> Vec<HoldingRow> {
    eval.result
        .holdings
        .iter()
        .map(|h| HoldingRow {
            ticker: h.ticker.to_string(),
            price: format_2dp(price_of(eval, h.ticker.as_str())),
            e: h.scores.environmental,
            s: h.scores.social,
            g: h.scores.governance,
            base: format_2dp(h.baseline_value),
            stressed: format_2dp(h.stressed_value),
        })
        .collect()
}

fn report(eval: &StressEvaluation) -> RunReport {
    let result = &eval.result;
    RunReport {
        scenario: result.scenario,
        scenario_name: result.scenario.name(),
        severity: result.severity.value(),
        impact_factor: result.impact_factor,
        investment: eval.portfolio.investment,
        total_baseline: result.total_baseline,
        total_stressed: result.total_stressed,
        loss: result.loss,
        loss_pct: result.loss_pct,
        holdings: result
            .holdings
            .iter()
            .map(|h| {
                let holding = eval.portfolio.holding(h.ticker.as_str());
                HoldingReport {
                    ticker: h.ticker.to_string(),
                    price: holding.map_or(f64::NAN, |p| p.price),
                    shares: holding.map_or(f64::NAN, |p| p.shares),
                    environmental: h.scores.environmental,
                    social: h.scores.social,
                    governance: h.scores.governance,
                    risk_exposure: h.risk_exposure,
                    shock: h.shock,
                    baseline_value: h.baseline_value,
                    stressed_value: h.stressed_value,
                }
            })
            .collect(),
    }
}

/// Execute the run command.
pub fn execute(args: RunArgs, format: OutputFormat, config: &EsgStressConfig) -> Result<()> {
    let Some(inputs) = prepare_or_skip(&args.inputs, config)? else {
        return Ok(());
    };

    let eval = evaluate(&inputs.request, &inputs.providers).map_err(CliError::from)?;
    let result = &eval.result;

    match format {
        OutputFormat::Table => {
            print_header(&format!("ESG Stress Test: {}", result.scenario.name()));

            let summary = vec![
                KeyValue::new("Scenario", result.scenario.name()),
                KeyValue::new("Severity", result.severity.to_string()),
                KeyValue::new("Impact Factor", format_percent(result.impact_factor)),
                KeyValue::new("Holdings", eval.portfolio.holding_count().to_string()),
                KeyValue::money("Baseline Value", result.total_baseline),
                KeyValue::money("Stressed Value", result.total_stressed),
                KeyValue::new("Projected Loss", format_loss_delta(result.loss, result.loss_pct)),
            ];
            print_output(&summary, format)?;

            print_header("Holdings");
            print_output(&holding_rows(&eval), format)?;

            if let Some(worst) = result.hardest_hit() {
                print_info(&format!(
                    "Hardest hit: {} ({} {} score, shock {})",
                    worst.ticker,
                    result.scenario.dimension().code(),
                    worst.score,
                    format_percent(worst.shock)
                ));
            }

            if args.chart {
                print_header("Baseline vs Stressed");
                println!("{}", render_bar_chart(result.total_baseline, result.total_stressed));
                print_divider();
            }
        }
        OutputFormat::Json => print_json(&report(&eval))?,
        OutputFormat::Csv => print_output(&holding_rows(&eval), format)?,
        OutputFormat::Minimal => println!("{:.2}", result.total_stressed),
    }

    Ok(())
}
