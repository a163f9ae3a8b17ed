//! End-to-end tests for the `esg-stress` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A scratch directory with price and score files for a small portfolio.
fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("prices.csv"),
        "ticker,price\nAAPL,100\nMSFT,400\nTSLA,250\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("scores.csv"),
        "ticker,e_score,s_score,g_score\nAAPL,90,90,50\nMSFT,80,70,100\nTSLA,60,30,40\n",
    )
    .unwrap();
    dir
}

fn esg_stress(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("esg-stress").unwrap();
    cmd.current_dir(dir)
        .env_remove("ESG_STRESS_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_scenarios_lists_all_three() {
    let dir = tempfile::tempdir().unwrap();
    esg_stress(dir.path())
        .arg("scenarios")
        .assert()
        .success()
        .stdout(predicate::str::contains("Climate Policy Shock (E)"))
        .stdout(predicate::str::contains("Labor Strike / Social Unrest (S)"))
        .stdout(predicate::str::contains("Governance Scandal (G)"));
}

#[test]
fn test_run_single_stock_minimal() {
    let dir = workspace();
    esg_stress(dir.path())
        .args([
            "--format", "minimal", "run", "--tickers", "aapl", "--investment", "10000",
            "--scenario", "governance", "--severity", "5", "--prices", "prices.csv",
            "--scores", "scores.csv",
        ])
        .assert()
        .success()
        .stdout("5000.00\n");
}

#[test]
fn test_run_table_output() {
    let dir = workspace();
    esg_stress(dir.path())
        .args([
            "run", "--tickers", "AAPL", "--investment", "10000", "--scenario",
            "Governance Scandal (G)", "--severity", "5", "--prices", "prices.csv", "--scores",
            "scores.csv", "--chart",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$5,000.00 (-50.00%)"))
        .stdout(predicate::str::contains("Baseline vs Stressed"))
        .stdout(predicate::str::contains("10000.00"));
}

#[test]
fn test_run_json_totals() {
    let dir = workspace();
    let output = esg_stress(dir.path())
        .args([
            "--format", "json", "run", "--tickers", "AAPL,MSFT,TSLA", "--investment", "90000",
            "--scenario", "social", "--severity", "2", "--prices", "prices.csv", "--scores",
            "scores.csv",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let holdings = report["holdings"].as_array().unwrap();
    assert_eq!(holdings.len(), 3);

    // impact 0.2; shocks 0.02, 0.06, 0.14 on 30,000 each
    let total = report["total_stressed"].as_f64().unwrap();
    assert!((total - (29_400.0 + 28_200.0 + 25_800.0)).abs() < 1e-6);
    let sum: f64 = holdings
        .iter()
        .map(|h| h["stressed_value"].as_f64().unwrap())
        .sum();
    assert!((sum - total).abs() < 1e-9);
    assert_eq!(report["scenario"], "labor-strike-social-unrest");
}

#[test]
fn test_run_csv_rows() {
    let dir = workspace();
    esg_stress(dir.path())
        .args([
            "--format", "csv", "run", "--tickers", "TSLA,AAPL", "--prices", "prices.csv",
            "--scores", "scores.csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ticker,price,e,s,g,base,stressed\nTSLA,"));
}

#[test]
fn test_run_without_prices_fails() {
    let dir = tempfile::tempdir().unwrap();
    esg_stress(dir.path())
        .args(["run", "--tickers", "AAPL"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not fetch data. Check tickers."));
}

#[test]
fn test_run_unknown_ticker_fails() {
    let dir = workspace();
    esg_stress(dir.path())
        .args(["run", "--tickers", "AAPL,ZZZZ", "--prices", "prices.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not fetch data. Check tickers."))
        .stderr(predicate::str::contains("ZZZZ"));
}

#[test]
fn test_run_empty_tickers_is_no_op() {
    let dir = workspace();
    esg_stress(dir.path())
        .args(["run", "--tickers", " , ", "--prices", "prices.csv"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No tickers given"));
}

#[test]
fn test_run_empty_tickers_wins_over_bad_scenario() {
    let dir = workspace();
    esg_stress(dir.path())
        .args(["run", "--tickers", " , ", "--scenario", "tax", "--severity", "9"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No tickers given"));
}

#[test]
fn test_run_unknown_scenario_fails() {
    let dir = workspace();
    esg_stress(dir.path())
        .args(["run", "--scenario", "tax", "--prices", "prices.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown scenario: 'tax'"));
}

#[test]
fn test_run_bad_severity_fails() {
    let dir = workspace();
    esg_stress(dir.path())
        .args(["run", "--severity", "9", "--prices", "prices.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid severity 9"));
}

#[test]
fn test_run_with_mock_scores_is_deterministic() {
    let dir = workspace();
    let run = || {
        esg_stress(dir.path())
            .args([
                "--format", "minimal", "run", "--tickers", "AAPL,MSFT,TSLA", "--prices",
                "prices.csv", "--seed", "7",
            ])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_config_file_is_discovered() {
    let dir = workspace();
    fs::write(
        dir.path().join("esg-stress.toml"),
        r#"
tickers = ["AAPL"]
investment = 10000.0
scenario = "g"
severity = 5

[data]
prices = "prices.csv"
scores = "scores.csv"
"#,
    )
    .unwrap();

    esg_stress(dir.path())
        .args(["--format", "minimal", "run"])
        .assert()
        .success()
        .stdout("5000.00\n");
}

#[test]
fn test_invalid_config_fails() {
    let dir = workspace();
    fs::write(dir.path().join("custom.toml"), "severity = 0\n").unwrap();

    esg_stress(dir.path())
        .args(["--config", "custom.toml", "scenarios"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("severity"));
}

#[test]
fn test_sweep_by_severity_json() {
    let dir = workspace();
    let output = esg_stress(dir.path())
        .args([
            "--format", "json", "sweep", "--by", "severity", "--tickers", "AAPL", "--investment",
            "10000", "--scenario", "governance", "--prices", "prices.csv", "--scores", "scores.csv",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["by"], "severity");
    assert_eq!(report["results"].as_array().unwrap().len(), 5);
    assert_eq!(report["summary"]["worst_severity"], 5);
    assert!((report["summary"]["worst_loss"].as_f64().unwrap() - 5_000.0).abs() < 1e-6);
}

#[test]
fn test_sweep_by_scenario_table() {
    let dir = workspace();
    esg_stress(dir.path())
        .args([
            "sweep", "--tickers", "AAPL,TSLA", "--prices", "prices.csv", "--scores",
            "scores.csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Worst Case"))
        .stdout(predicate::str::contains("Average Loss"));
}
