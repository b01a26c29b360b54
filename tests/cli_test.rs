use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const COUNTRIES: &str = r#"{
    "Freedonia": {
        "population": 5000000,
        "male_pyramid_data": [8, 7, 7, 6, 5, 5, 4, 3, 2, 1.5, 1.5],
        "female_pyramid_data": [8, 7, 7, 6, 5, 5, 4, 3, 2, 1.5, 1.5],
        "gdp_per_capita": 12000,
        "life_expectancy": 70,
        "urbanization": 60,
        "birth_rate": 20.0,
        "death_rate": 10.0
    },
    "Sylvania": {
        "population": 800000,
        "male_pyramid_data": [5, 5, 5, 5, 5, 5, 5, 5, 5, 3, 2],
        "female_pyramid_data": [5, 5, 5, 5, 5, 5, 5, 5, 5, 3, 2],
        "gdp_per_capita": 52000,
        "life_expectancy": 82,
        "urbanization": 85,
        "birth_rate": 9.0,
        "death_rate": 9.5,
        "migration_rate": 2.0
    }
}"#;

/// Change models that always predict a zero percent change.
const HOLD_CONFIG: &str = r#"
[models.change.birth]
intercept = 0.0
coefficients = [0.0, 0.0, 0.0]

[models.change.death]
intercept = 0.0
coefficients = [0.0, 0.0, 0.0]

[models.change.migration]
intercept = 0.0
coefficients = [0.0, 0.0, 0.0]
"#;

fn write_countries(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("countries.json");
    std::fs::write(&path, COUNTRIES).unwrap();
    path
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("projector.toml");
    std::fs::write(&path, content).unwrap();
    path
}

fn cmd() -> Command {
    Command::cargo_bin("pop-projector").unwrap()
}

// --- indicators ---

#[test]
fn test_indicators_heuristic_table() {
    cmd()
        .args([
            "indicators",
            "--population",
            "1000000",
            "--gdp",
            "9000",
            "--life",
            "72",
            "--urban",
            "55",
            "--horizon",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Indicator Projection: 10 years"))
        .stdout(predicate::str::contains("2030"))
        .stdout(predicate::str::contains("1,060,000"))
        .stdout(predicate::str::contains("1,123,600"))
        .stdout(predicate::str::contains("heuristic only"));
}

#[test]
fn test_indicators_json() {
    cmd()
        .args([
            "indicators",
            "--population",
            "1000000",
            "--gdp",
            "9000",
            "--life",
            "72",
            "--urban",
            "55",
            "--horizon",
            "5",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"indicators\""))
        .stdout(predicate::str::contains("\"population\": 1060000"));
}

#[test]
fn test_indicators_from_country() {
    let dir = TempDir::new().unwrap();
    let countries = write_countries(&dir);

    cmd()
        .args([
            "indicators",
            "--countries",
            countries.to_str().unwrap(),
            "--country",
            "FREEDONIA",
            "--gdp-scenario",
            "high",
            "--horizon",
            "20",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("5,000,000"))
        .stdout(predicate::str::contains("2045"))
        .stdout(predicate::str::contains("high / medium / medium"));
}

#[test]
fn test_indicators_missing_inputs() {
    cmd()
        .args(["indicators", "--population", "1000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--gdp is required"));
}

#[test]
fn test_indicators_horizon_over_limit() {
    cmd()
        .args([
            "indicators",
            "--population",
            "1000000",
            "--gdp",
            "9000",
            "--life",
            "72",
            "--urban",
            "55",
            "--horizon",
            "500",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum"));
}

#[test]
fn test_unknown_scenario_logged_at_debug() {
    cmd()
        .args([
            "--log-level",
            "debug",
            "indicators",
            "--population",
            "1000000",
            "--gdp",
            "9000",
            "--life",
            "72",
            "--urban",
            "55",
            "--horizon",
            "5",
            "--gdp-scenario",
            "boom",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown scenario name"))
        .stdout(predicate::str::contains("medium / medium / medium"));
}

// --- rates ---

#[test]
fn test_rates_without_models_fails() {
    cmd()
        .args([
            "rates",
            "--population",
            "1000000",
            "--birth-rate",
            "20",
            "--death-rate",
            "10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Predictions unavailable"));
}

#[test]
fn test_rates_with_config_models() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, HOLD_CONFIG);

    cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "rates",
            "--population",
            "1000000",
            "--birth-rate",
            "20",
            "--death-rate",
            "10",
            "--migration-rate",
            "0",
            "--years",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rate Projection: 2 years"))
        .stdout(predicate::str::contains("1,010,000"))
        .stdout(predicate::str::contains("1,020,100"));
}

#[test]
fn test_rates_from_country_json() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, HOLD_CONFIG);
    let countries = write_countries(&dir);

    cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "rates",
            "--countries",
            countries.to_str().unwrap(),
            "--country",
            "freedonia",
            "--years",
            "1",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"rates\""))
        .stdout(predicate::str::contains("\"population\": 5050000"));
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "max_horizon_years = \"soon\"");

    cmd()
        .args(["--config", config.to_str().unwrap(), "scenarios"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TOML error"));
}

// --- country / pyramid ---

#[test]
fn test_country_summary() {
    let dir = TempDir::new().unwrap();
    let countries = write_countries(&dir);

    cmd()
        .args([
            "country",
            "--countries",
            countries.to_str().unwrap(),
            "--country",
            "Sylvania",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Country: sylvania"))
        .stdout(predicate::str::contains("800,000"))
        .stdout(predicate::str::contains("Population Pyramid - 2025"))
        .stdout(predicate::str::contains("Total: 100.0%"));
}

#[test]
fn test_unknown_country() {
    let dir = TempDir::new().unwrap();
    let countries = write_countries(&dir);

    cmd()
        .args([
            "country",
            "--countries",
            countries.to_str().unwrap(),
            "--country",
            "Atlantis",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Country not found: Atlantis"));
}

#[test]
fn test_pyramid_projection() {
    let dir = TempDir::new().unwrap();
    let countries = write_countries(&dir);

    cmd()
        .args([
            "pyramid",
            "--countries",
            countries.to_str().unwrap(),
            "--country",
            "freedonia",
            "--years",
            "20",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Age Pyramid Projection: freedonia"))
        .stdout(predicate::str::contains("Population Pyramid - 2045"));
}

#[test]
fn test_pyramid_years_past_calendar_range() {
    let dir = TempDir::new().unwrap();
    let countries = write_countries(&dir);

    for years in ["2147483000", "3000000000"] {
        cmd()
            .args([
                "pyramid",
                "--countries",
                countries.to_str().unwrap(),
                "--country",
                "freedonia",
                "--years",
                years,
            ])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("not a valid calendar year"))
            .stderr(predicate::str::contains("panicked").not());
    }
}

#[test]
fn test_config_seed_year_out_of_range() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "seed_year = 2147483647");

    cmd()
        .args(["--config", config.to_str().unwrap(), "scenarios"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_pyramid_json() {
    let dir = TempDir::new().unwrap();
    let countries = write_countries(&dir);

    cmd()
        .args([
            "pyramid",
            "--countries",
            countries.to_str().unwrap(),
            "--country",
            "freedonia",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"male\""))
        .stdout(predicate::str::contains("\"female\""));
}

#[test]
fn test_missing_countries_file() {
    cmd()
        .args([
            "country",
            "--countries",
            "nonexistent.json",
            "--country",
            "freedonia",
        ])
        .assert()
        .failure();
}

// --- scenarios / general ---

#[test]
fn test_scenarios_table() {
    cmd()
        .arg("scenarios")
        .assert()
        .success()
        .stdout(predicate::str::contains("stagnant"))
        .stdout(predicate::str::contains("decline"));
}

#[test]
fn test_no_subcommand() {
    cmd().assert().failure();
}

#[test]
fn test_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pop-projector"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}
