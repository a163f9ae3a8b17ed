//! Property-based tests for stress invariants.
//!
//! These tests verify the properties that must hold for every scenario,
//! severity and score on the documented scales:
//! - Stressed value stays within [0, baseline]
//! - Stressed value never rises with severity
//! - Stressed value never falls as the ESG score improves
//! - A perfect score leaves the value untouched
//! - Per-holding stressed values sum to the reported total

use esg_stress_portfolio::prelude::*;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn scenario() -> impl Strategy<Value = EsgScenario> {
    prop::sample::select(EsgScenario::ALL.to_vec())
}

fn severity() -> impl Strategy<Value = Severity> {
    (1u8..=5).prop_map(|v| Severity::new(v).unwrap())
}

fn score() -> impl Strategy<Value = u8> {
    0u8..=100
}

fn baseline() -> impl Strategy<Value = f64> {
    1.0f64..1e9
}

/// Generates a portfolio of 1-25 holdings with prices and scores.
fn portfolio_inputs() -> impl Strategy<Value = (Vec<(String, f64, EsgScores)>, f64)> {
    (
        prop::collection::vec(
            (1.0f64..5_000.0, score(), score(), score()),
            1..25,
        ),
        1_000.0f64..10_000_000.0,
    )
        .prop_map(|(rows, investment)| {
            let rows = rows
                .into_iter()
                .enumerate()
                .map(|(i, (price, e, s, g))| (format!("T{i:03}"), price, EsgScores::new(e, s, g)))
                .collect();
            (rows, investment)
        })
}

fn stressed_one(
    scenario: EsgScenario,
    severity: Severity,
    score: u8,
    baseline: f64,
) -> f64 {
    let impact = scenario.impact_factor(severity);
    esg_stress_portfolio::stressed_value(
        baseline,
        esg_stress_portfolio::shock(impact, esg_stress_portfolio::risk_exposure(score)),
    )
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn property_stressed_within_bounds(
        scenario in scenario(),
        severity in severity(),
        score in score(),
        baseline in baseline(),
    ) {
        let stressed = stressed_one(scenario, severity, score, baseline);
        prop_assert!(stressed >= 0.0);
        prop_assert!(stressed <= baseline);
    }

    #[test]
    fn property_unclamped_shock_never_exceeds_one(
        scenario in scenario(),
        severity in severity(),
        score in score(),
    ) {
        // Bounds hold at the documented coefficients without relying on the clamp.
        let raw = scenario.impact_factor(severity) * esg_stress_portfolio::risk_exposure(score);
        prop_assert!((0.0..=1.0).contains(&raw));
    }

    #[test]
    fn property_monotonic_in_severity(
        scenario in scenario(),
        score in score(),
        baseline in baseline(),
        lo in 1u8..=5,
        hi in 1u8..=5,
    ) {
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        let at_lo = stressed_one(scenario, Severity::new(lo).unwrap(), score, baseline);
        let at_hi = stressed_one(scenario, Severity::new(hi).unwrap(), score, baseline);
        prop_assert!(at_hi <= at_lo);
    }

    #[test]
    fn property_monotonic_in_score(
        scenario in scenario(),
        severity in severity(),
        baseline in baseline(),
        a in score(),
        b in score(),
    ) {
        let (lo, hi) = (a.min(b), a.max(b));
        let at_lo = stressed_one(scenario, severity, lo, baseline);
        let at_hi = stressed_one(scenario, severity, hi, baseline);
        prop_assert!(at_hi >= at_lo);
    }

    #[test]
    fn property_perfect_score_is_exact(
        scenario in scenario(),
        severity in severity(),
        baseline in baseline(),
    ) {
        prop_assert_eq!(stressed_one(scenario, severity, 100, baseline), baseline);
    }

    #[test]
    fn property_totals_match_holdings(
        (rows, investment) in portfolio_inputs(),
        scenario in scenario(),
        severity in severity(),
    ) {
        let mut prices = PriceTable::new();
        let mut scores = EsgScoreSet::new();
        let mut tickers = Vec::new();
        for (symbol, price, s) in &rows {
            let ticker = Ticker::new(symbol).unwrap();
            prices.insert(ticker.clone(), *price);
            scores.insert(ticker.clone(), *s);
            tickers.push(ticker);
        }

        let portfolio = Portfolio::equal_weight(&tickers, investment, &prices).unwrap();
        let result = run_stress_test(&portfolio, &scores, scenario, severity).unwrap();

        let sum_stressed: f64 = result.holdings.iter().map(|h| h.stressed_value).sum();
        let tolerance = 1e-9 * investment.max(1.0);
        prop_assert!((sum_stressed - result.total_stressed).abs() <= tolerance);
        prop_assert!((result.total_baseline - investment).abs() <= tolerance);
        prop_assert!((result.loss - (result.total_baseline - result.total_stressed)).abs() <= tolerance);
        prop_assert!(result.total_stressed <= result.total_baseline);
        prop_assert!((0.0..=100.0).contains(&result.loss_pct));
    }

    #[test]
    fn property_weights_sum_to_one(
        (rows, investment) in portfolio_inputs(),
    ) {
        let tickers: Vec<Ticker> = rows.iter().map(|(s, _, _)| Ticker::new(s).unwrap()).collect();
        let prices: PriceTable = rows
            .iter()
            .map(|(s, p, _)| (Ticker::new(s).unwrap(), *p))
            .collect();

        let portfolio = Portfolio::equal_weight(&tickers, investment, &prices).unwrap();
        prop_assert!((portfolio.total_weight() - 1.0).abs() < 1e-9);

        let expected = investment / tickers.len() as f64;
        for h in &portfolio.holdings {
            prop_assert!((h.baseline_value - expected).abs() <= 1e-9 * expected);
        }
    }
}
