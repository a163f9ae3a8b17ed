//! Stress impact calculations.
//!
//! Applies a single-factor ESG scenario to baseline holding values. Every
//! ticker is stressed independently; there is no cross-holding or
//! diversification effect.

use super::scenarios::EsgScenario;
use crate::analytics::{calculate_totals, StressTotals};
use crate::types::{Severity, ValueMap};
use crate::{Portfolio, PortfolioError, PortfolioResult};
use esg_stress_traits::reference_data::MAX_ESG_SCORE;
use esg_stress_traits::{EsgDimension, EsgScoreSet, EsgScores, Ticker};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Risk exposure implied by an ESG sub-score.
///
/// ```text
/// exposure = 1 - score / 100
/// ```
///
/// A score of 100 yields zero exposure, a score of 0 full exposure.
#[must_use]
pub fn risk_exposure(score: u8) -> f64 {
    1.0 - f64::from(score) / f64::from(MAX_ESG_SCORE)
}

/// Fractional value reduction for a holding.
///
/// ```text
/// shock = impact_factor × exposure
/// ```
///
/// Clamped to [0, 1] so a stressed value can never go negative or exceed
/// its baseline, whatever the coefficients.
#[must_use]
pub fn shock(impact_factor: f64, exposure: f64) -> f64 {
    (impact_factor * exposure).clamp(0.0, 1.0)
}

/// Value after applying a shock: `baseline × (1 - shock)`.
#[must_use]
pub fn stressed_value(baseline: f64, shock: f64) -> f64 {
    baseline * (1.0 - shock)
}

/// Per-holding stress detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingStress {
    /// Ticker symbol.
    pub ticker: Ticker,

    /// All three sub-scores, for display.
    pub scores: EsgScores,

    /// Sub-score on the scenario's dimension.
    pub score: u8,

    /// Risk exposure (0-1).
    pub risk_exposure: f64,

    /// Applied shock (0-1).
    pub shock: f64,

    /// Value before stress.
    pub baseline_value: f64,

    /// Value after stress.
    pub stressed_value: f64,
}

impl HoldingStress {
    /// Value lost on this holding.
    #[must_use]
    pub fn loss(&self) -> f64 {
        self.baseline_value - self.stressed_value
    }
}

/// Joins baseline values to their scores, failing before any arithmetic
/// if a ticker is unscored or carries an out-of-range sub-score.
fn join_scores<'a>(
    baseline: impl Iterator<Item = (&'a Ticker, f64)>,
    scores: &EsgScoreSet,
) -> PortfolioResult<Vec<(&'a Ticker, f64, EsgScores)>> {
    baseline
        .map(|(ticker, value)| {
            let Some(s) = scores.get(ticker.as_str()).copied() else {
                warn!(%ticker, "no ESG scores for ticker");
                return Err(PortfolioError::missing_score(ticker.as_str()));
            };
            if let Some(dim) = EsgDimension::ALL
                .into_iter()
                .find(|d| s.get(*d) > MAX_ESG_SCORE)
            {
                return Err(PortfolioError::InvalidScore {
                    ticker: ticker.to_string(),
                    dimension: dim.name().to_string(),
                    score: s.get(dim),
                });
            }
            Ok((ticker, value, s))
        })
        .collect()
}

/// Stresses each baseline value under a scenario.
///
/// Returns a map with the same key set as `baseline`.
///
/// # Errors
///
/// - [`PortfolioError::MissingScore`] if a ticker has no scores
/// - [`PortfolioError::InvalidScore`] if a sub-score exceeds 100
pub fn apply_stress(
    baseline: &ValueMap,
    scores: &EsgScoreSet,
    scenario: EsgScenario,
    severity: Severity,
) -> PortfolioResult<ValueMap> {
    Ok(stress_holdings(baseline.iter().map(|(t, v)| (t, *v)), scores, scenario, severity)?
        .into_iter()
        .map(|h| (h.ticker, h.stressed_value))
        .collect())
}

/// Stresses an ordered sequence of (ticker, baseline) pairs, keeping detail.
fn stress_holdings<'a>(
    baseline: impl Iterator<Item = (&'a Ticker, f64)>,
    scores: &EsgScoreSet,
    scenario: EsgScenario,
    severity: Severity,
) -> PortfolioResult<Vec<HoldingStress>> {
    let joined = join_scores(baseline, scores)?;

    let dimension = scenario.dimension();
    let impact_factor = scenario.impact_factor(severity);

    Ok(joined
        .into_iter()
        .map(|(ticker, baseline_value, all)| {
            let score = all.get(dimension);
            let exposure = risk_exposure(score);
            let shock = shock(impact_factor, exposure);

            HoldingStress {
                ticker: ticker.clone(),
                scores: all,
                score,
                risk_exposure: exposure,
                shock,
                baseline_value,
                stressed_value: stressed_value(baseline_value, shock),
            }
        })
        .collect())
}

/// Result of a stress test on a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressResult {
    /// Scenario applied.
    pub scenario: EsgScenario,

    /// Severity applied.
    pub severity: Severity,

    /// Base coefficient × severity.
    pub impact_factor: f64,

    /// Per-holding detail, in portfolio order.
    pub holdings: Vec<HoldingStress>,

    /// Sum of baseline values.
    pub total_baseline: f64,

    /// Sum of stressed values.
    pub total_stressed: f64,

    /// Absolute loss.
    pub loss: f64,

    /// Loss as percentage of baseline.
    pub loss_pct: f64,
}

impl StressResult {
    /// Stressed value per ticker.
    #[must_use]
    pub fn stressed_values(&self) -> ValueMap {
        self.holdings
            .iter()
            .map(|h| (h.ticker.clone(), h.stressed_value))
            .collect()
    }

    /// Baseline value per ticker.
    #[must_use]
    pub fn baseline_values(&self) -> ValueMap {
        self.holdings
            .iter()
            .map(|h| (h.ticker.clone(), h.baseline_value))
            .collect()
    }

    /// Detail for one ticker.
    #[must_use]
    pub fn holding(&self, ticker: &str) -> Option<&HoldingStress> {
        self.holdings.iter().find(|h| h.ticker.as_str() == ticker)
    }

    /// Holding with the largest absolute loss.
    #[must_use]
    pub fn hardest_hit(&self) -> Option<&HoldingStress> {
        self.holdings
            .iter()
            .max_by(|a, b| a.loss().total_cmp(&b.loss()))
    }

    /// Aggregate figures only.
    #[must_use]
    pub fn totals(&self) -> StressTotals {
        StressTotals {
            total_baseline: self.total_baseline,
            total_stressed: self.total_stressed,
            loss: self.loss,
            loss_pct: self.loss_pct,
        }
    }

    /// Returns true if the scenario destroyed any value.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.loss > 0.0
    }
}

/// Runs a stress scenario on a portfolio.
///
/// # Example
///
/// ```ignore
/// use esg_stress_portfolio::prelude::*;
///
/// let result = run_stress_test(&portfolio, &scores, EsgScenario::GovernanceScandal, Severity::MAX)?;
/// println!("Loss: {:.2}%", result.loss_pct);
/// ```
///
/// # Errors
///
/// Fails on missing or invalid scores and on a zero baseline total.
pub fn run_stress_test(
    portfolio: &Portfolio,
    scores: &EsgScoreSet,
    scenario: EsgScenario,
    severity: Severity,
) -> PortfolioResult<StressResult> {
    let holdings = stress_holdings(
        portfolio
            .holdings
            .iter()
            .map(|h| (&h.ticker, h.baseline_value)),
        scores,
        scenario,
        severity,
    )?;

    let baseline: ValueMap = holdings
        .iter()
        .map(|h| (h.ticker.clone(), h.baseline_value))
        .collect();
    let stressed: ValueMap = holdings
        .iter()
        .map(|h| (h.ticker.clone(), h.stressed_value))
        .collect();
    let totals = calculate_totals(&baseline, &stressed)?;

    debug!(
        scenario = scenario.id(),
        severity = severity.value(),
        total_baseline = totals.total_baseline,
        total_stressed = totals.total_stressed,
        loss_pct = totals.loss_pct,
        "stress test complete"
    );

    Ok(StressResult {
        scenario,
        severity,
        impact_factor: scenario.impact_factor(severity),
        holdings,
        total_baseline: totals.total_baseline,
        total_stressed: totals.total_stressed,
        loss: totals.loss,
        loss_pct: totals.loss_pct,
    })
}

/// Runs several scenarios at one severity.
///
/// # Errors
///
/// Fails on the first scenario that fails.
pub fn run_stress_scenarios(
    portfolio: &Portfolio,
    scores: &EsgScoreSet,
    scenarios: &[EsgScenario],
    severity: Severity,
) -> PortfolioResult<Vec<StressResult>> {
    scenarios
        .iter()
        .map(|s| run_stress_test(portfolio, scores, *s, severity))
        .collect()
}

/// Runs one scenario at every severity from 1 to 5.
///
/// # Errors
///
/// Fails on the first severity that fails.
pub fn run_severity_ladder(
    portfolio: &Portfolio,
    scores: &EsgScoreSet,
    scenario: EsgScenario,
) -> PortfolioResult<Vec<StressResult>> {
    Severity::all()
        .map(|sev| run_stress_test(portfolio, scores, scenario, sev))
        .collect()
}

/// The result with the largest loss.
#[must_use]
pub fn worst_case(results: &[StressResult]) -> Option<&StressResult> {
    results.iter().max_by(|a, b| a.loss.total_cmp(&b.loss))
}

/// The result with the smallest loss.
#[must_use]
pub fn best_case(results: &[StressResult]) -> Option<&StressResult> {
    results.iter().min_by(|a, b| a.loss.total_cmp(&b.loss))
}

/// Summary of stress test results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressSummary {
    /// Number of results summarized.
    pub result_count: usize,

    /// Worst-case loss.
    pub worst_loss: f64,

    /// Worst-case loss percentage.
    pub worst_loss_pct: f64,

    /// Worst-case scenario.
    pub worst_scenario: EsgScenario,

    /// Worst-case severity.
    pub worst_severity: Severity,

    /// Best-case loss.
    pub best_loss: f64,

    /// Best-case loss percentage.
    pub best_loss_pct: f64,

    /// Best-case scenario.
    pub best_scenario: EsgScenario,

    /// Best-case severity.
    pub best_severity: Severity,

    /// Average loss.
    pub avg_loss: f64,

    /// Average loss percentage.
    pub avg_loss_pct: f64,
}

/// Creates a summary of stress test results.
#[must_use]
pub fn summarize_results(results: &[StressResult]) -> Option<StressSummary> {
    let worst = worst_case(results)?;
    let best = best_case(results)?;

    let n = results.len() as f64;
    let avg_loss = results.iter().map(|r| r.loss).sum::<f64>() / n;
    let avg_loss_pct = results.iter().map(|r| r.loss_pct).sum::<f64>() / n;

    Some(StressSummary {
        result_count: results.len(),
        worst_loss: worst.loss,
        worst_loss_pct: worst.loss_pct,
        worst_scenario: worst.scenario,
        worst_severity: worst.severity,
        best_loss: best.loss,
        best_loss_pct: best.loss_pct,
        best_scenario: best.scenario,
        best_severity: best.severity,
        avg_loss,
        avg_loss_pct,
    })
}
