//! End-to-end stress evaluation against live collaborators.
//!
//! tickers → prices/scores → baseline values → stressed values → totals.
//! Every call fetches fresh data; nothing is cached between evaluations.

use crate::stress::{run_stress_test, EsgScenario, StressResult};
use crate::types::Severity;
use crate::{Portfolio, PortfolioError, PortfolioResult};
use esg_stress_traits::{normalize_tickers, DataProviders, EsgScoreSet, PriceTable, Ticker};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Inputs of a single stress evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressRequest {
    /// Normalized, de-duplicated tickers in input order.
    pub tickers: Vec<Ticker>,

    /// Total investment, spread equally over the tickers.
    pub investment: f64,

    /// Scenario to apply.
    pub scenario: EsgScenario,

    /// Severity to apply.
    pub severity: Severity,
}

impl StressRequest {
    /// Creates a validated request.
    ///
    /// # Errors
    ///
    /// - [`PortfolioError::NoTickers`] if `tickers` is empty after de-duplication
    /// - [`PortfolioError::InvalidInvestment`] if `investment` is not positive and finite
    pub fn new(
        tickers: Vec<Ticker>,
        investment: f64,
        scenario: EsgScenario,
        severity: Severity,
    ) -> PortfolioResult<Self> {
        let tickers = normalize_tickers(tickers.iter().map(Ticker::as_str));
        if tickers.is_empty() {
            return Err(PortfolioError::NoTickers);
        }
        if !investment.is_finite() || investment <= 0.0 {
            return Err(PortfolioError::InvalidInvestment { value: investment });
        }

        Ok(Self {
            tickers,
            investment,
            scenario,
            severity,
        })
    }

    /// Creates a request from raw user input.
    ///
    /// `tickers` is a comma-separated list; `scenario` is any identifier
    /// accepted by [`EsgScenario::from_str`](std::str::FromStr).
    ///
    /// # Errors
    ///
    /// As [`StressRequest::new`], plus [`PortfolioError::UnknownScenario`] and
    /// [`PortfolioError::InvalidSeverity`].
    pub fn parse(
        tickers: &str,
        investment: f64,
        scenario: &str,
        severity: i64,
    ) -> PortfolioResult<Self> {
        let tickers = esg_stress_traits::parse_ticker_list(tickers);
        if tickers.is_empty() {
            return Err(PortfolioError::NoTickers);
        }
        let scenario: EsgScenario = scenario.parse()?;
        let severity = Severity::try_from(severity)?;
        Self::new(tickers, investment, scenario, severity)
    }
}

/// Prices and scores fetched for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Latest price per requested ticker.
    pub prices: PriceTable,

    /// ESG scores per requested ticker.
    pub scores: EsgScoreSet,
}

/// Fetches prices and scores, checking both cover every ticker.
///
/// # Errors
///
/// - [`PortfolioError::NoTickers`] for an empty list
/// - [`PortfolioError::PriceUnavailable`] if the source returns nothing or
///   omits any ticker
/// - [`PortfolioError::MissingScore`] if the provider omits any ticker
/// - [`PortfolioError::Source`] if a collaborator fails
pub fn fetch_snapshot(
    tickers: &[Ticker],
    providers: &DataProviders,
) -> PortfolioResult<MarketSnapshot> {
    if tickers.is_empty() {
        return Err(PortfolioError::NoTickers);
    }

    let prices = providers.prices.get_prices(tickers)?;
    if prices.is_empty() {
        warn!(count = tickers.len(), "price source returned no data");
        return Err(PortfolioError::price_unavailable(tickers));
    }
    let unpriced = prices.missing(tickers);
    if !unpriced.is_empty() {
        warn!(missing = unpriced.len(), "price source omitted tickers");
        return Err(PortfolioError::price_unavailable(unpriced));
    }

    let scores = providers.scores.get_scores(tickers)?;
    if let Some(ticker) = scores.missing(tickers).first() {
        return Err(PortfolioError::missing_score(ticker.as_str()));
    }

    debug!(
        tickers = tickers.len(),
        price_source = ?providers.prices.source_type(),
        score_source = ?providers.scores.source_type(),
        "market snapshot fetched"
    );

    Ok(MarketSnapshot {
        prices: prices.restricted_to(tickers),
        scores,
    })
}

/// Everything produced by one evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressEvaluation {
    /// The request evaluated.
    pub request: StressRequest,

    /// Data used.
    pub snapshot: MarketSnapshot,

    /// Equal-weighted baseline portfolio.
    pub portfolio: Portfolio,

    /// Stress outcome.
    pub result: StressResult,
}

impl StressEvaluation {
    /// Re-stresses the same portfolio and scores under another scenario.
    ///
    /// # Errors
    ///
    /// See [`run_stress_test`].
    pub fn restress(
        &self,
        scenario: EsgScenario,
        severity: Severity,
    ) -> PortfolioResult<StressResult> {
        run_stress_test(&self.portfolio, &self.snapshot.scores, scenario, severity)
    }
}

/// Runs a full stress evaluation.
///
/// # Errors
///
/// Any error from [`fetch_snapshot`], portfolio construction or
/// [`run_stress_test`]. No partial results are returned.
pub fn evaluate(
    request: &StressRequest,
    providers: &DataProviders,
) -> PortfolioResult<StressEvaluation> {
    let snapshot = fetch_snapshot(&request.tickers, providers)?;
    let portfolio = Portfolio::equal_weight(&request.tickers, request.investment, &snapshot.prices)?;
    let result = run_stress_test(
        &portfolio,
        &snapshot.scores,
        request.scenario,
        request.severity,
    )?;

    info!(
        scenario = request.scenario.id(),
        severity = request.severity.value(),
        holdings = portfolio.holding_count(),
        loss_pct = result.loss_pct,
        "stress evaluation complete"
    );

    Ok(StressEvaluation {
        request: request.clone(),
        snapshot,
        portfolio,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_stress_traits::{EsgScoreProvider, EsgScores, PriceSource, SourceType, TraitError};
    use std::sync::Arc;

    struct FixedPrices(PriceTable);

    impl PriceSource for FixedPrices {
        fn source_type(&self) -> SourceType {
            SourceType::Manual
        }

        fn get_prices(&self, tickers: &[Ticker]) -> Result<PriceTable, TraitError> {
            Ok(self.0.restricted_to(tickers))
        }
    }

    struct FixedScores(EsgScoreSet);

    impl EsgScoreProvider for FixedScores {
        fn source_type(&self) -> SourceType {
            SourceType::Manual
        }

        fn get_scores(&self, _tickers: &[Ticker]) -> Result<EsgScoreSet, TraitError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenPrices;

    impl PriceSource for BrokenPrices {
        fn source_type(&self) -> SourceType {
            SourceType::Snapshot
        }

        fn get_prices(&self, _tickers: &[Ticker]) -> Result<PriceTable, TraitError> {
            Err(TraitError::ConnectionFailed("upstream down".into()))
        }
    }

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    fn providers() -> DataProviders {
        let prices = PriceTable::new()
            .with_price(t("AAPL"), 100.0)
            .with_price(t("MSFT"), 400.0);
        let scores = EsgScoreSet::new()
            .with_scores(t("AAPL"), EsgScores::new(60, 70, 50))
            .with_scores(t("MSFT"), EsgScores::new(80, 75, 90));
        DataProviders::new(Arc::new(FixedPrices(prices)), Arc::new(FixedScores(scores)))
    }

    #[test]
    fn test_parse_request() {
        let req = StressRequest::parse(" aapl, msft ,aapl", 100_000.0, "Governance Scandal (G)", 3)
            .unwrap();
        assert_eq!(req.tickers, vec![t("AAPL"), t("MSFT")]);
        assert_eq!(req.scenario, EsgScenario::GovernanceScandal);
        assert_eq!(req.severity.value(), 3);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            StressRequest::parse(" , ", 1_000.0, "g", 3),
            Err(PortfolioError::NoTickers)
        ));
        assert!(matches!(
            StressRequest::parse("AAPL", 1_000.0, "Asteroid", 3),
            Err(PortfolioError::UnknownScenario { .. })
        ));
        assert!(matches!(
            StressRequest::parse("AAPL", 1_000.0, "g", 7),
            Err(PortfolioError::InvalidSeverity { value: 7 })
        ));
        assert!(matches!(
            StressRequest::parse("AAPL", -1.0, "g", 2),
            Err(PortfolioError::InvalidInvestment { .. })
        ));
    }

    #[test]
    fn test_evaluate() {
        let req = StressRequest::parse("AAPL", 10_000.0, "g", 5).unwrap();
        let eval = evaluate(&req, &providers()).unwrap();

        assert_eq!(eval.portfolio.holding_count(), 1);
        assert_eq!(eval.result.total_stressed, 5_000.0);
        assert_eq!(eval.result.loss_pct, 50.0);
        assert_eq!(eval.snapshot.prices.len(), 1);
    }

    #[test]
    fn test_restress() {
        let req = StressRequest::parse("AAPL,MSFT", 100_000.0, "e", 1).unwrap();
        let eval = evaluate(&req, &providers()).unwrap();

        let harsher = eval
            .restress(EsgScenario::ClimatePolicyShock, Severity::MAX)
            .unwrap();
        assert!(harsher.total_stressed < eval.result.total_stressed);
    }

    #[test]
    fn test_partial_prices_abort() {
        let req = StressRequest::parse("AAPL,NVDA", 10_000.0, "s", 2).unwrap();
        let err = evaluate(&req, &providers()).unwrap_err();
        assert!(matches!(err, PortfolioError::PriceUnavailable { ref tickers } if tickers == "NVDA"));
    }

    #[test]
    fn test_empty_prices_abort() {
        let req = StressRequest::parse("ZZZZ,YYYY", 10_000.0, "s", 2).unwrap();
        let err = evaluate(&req, &providers()).unwrap_err();
        assert!(matches!(err, PortfolioError::PriceUnavailable { ref tickers } if tickers == "ZZZZ, YYYY"));
    }

    #[test]
    fn test_missing_scores_abort() {
        let prices = PriceTable::new().with_price(t("AAPL"), 10.0);
        let providers = DataProviders::new(
            Arc::new(FixedPrices(prices)),
            Arc::new(FixedScores(EsgScoreSet::new())),
        );
        let req = StressRequest::parse("AAPL", 10_000.0, "s", 2).unwrap();

        let err = evaluate(&req, &providers).unwrap_err();
        assert!(matches!(err, PortfolioError::MissingScore { .. }));
    }

    #[test]
    fn test_source_failure_propagates() {
        let providers = DataProviders::new(
            Arc::new(BrokenPrices),
            Arc::new(FixedScores(EsgScoreSet::new())),
        );
        let req = StressRequest::parse("AAPL", 10_000.0, "s", 2).unwrap();

        let err = evaluate(&req, &providers).unwrap_err();
        assert!(matches!(err, PortfolioError::Source(TraitError::ConnectionFailed(_))));
    }
}
