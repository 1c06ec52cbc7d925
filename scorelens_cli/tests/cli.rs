use assert_cmd::Command;
use predicates::prelude::*;

fn analyzer() -> Command {
    let mut cmd = Command::cargo_bin("score-analyzer").unwrap();
    cmd.env_remove("LANGFUSE_PUBLIC_KEY")
        .env_remove("LANGFUSE_SECRET_KEY")
        .env_remove("LANGFUSE_HOST")
        .env_remove("SCORELENS_CONFIG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    analyzer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list-scores"))
        .stdout(predicate::str::contains("regression"))
        .stdout(predicate::str::contains("distribution"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_missing_credentials() {
    analyzer()
        .args(["summary", "--score-name", "accuracy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LANGFUSE_PUBLIC_KEY"));
}

#[test]
fn test_missing_secret_key() {
    analyzer()
        .env("LANGFUSE_PUBLIC_KEY", "pk-lf-test")
        .args(["list-scores"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LANGFUSE_SECRET_KEY"));
}

#[test]
fn test_score_name_required() {
    analyzer()
        .args(["summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--score-name"));
}

#[test]
fn test_invalid_granularity_rejected() {
    analyzer()
        .args(["trend", "--score-name", "accuracy", "--granularity", "year"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("year"));
}

#[test]
fn test_invalid_dimension_rejected() {
    analyzer()
        .args(["compare", "--score-name", "accuracy", "--dimension", "user"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_format_rejected() {
    analyzer()
        .args(["--format", "xml", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format: xml"));
}

#[test]
fn test_check_without_credentials() {
    analyzer()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Langfuse Setup Check"))
        .stdout(predicate::str::contains("NOT SET"))
        .stdout(predicate::str::contains("https://cloud.langfuse.com (default)"))
        .stdout(predicate::str::contains("Setup incomplete"));
}

#[test]
fn test_check_with_credentials() {
    analyzer()
        .env("LANGFUSE_PUBLIC_KEY", "pk-lf-1234567890abcdef")
        .env("LANGFUSE_SECRET_KEY", "sk-lf-1234567890abcdef")
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("pk-lf-1234..."))
        .stdout(predicate::str::contains("Ready to connect to Langfuse!"))
        .stdout(predicate::str::contains("abcdef").not());
}

#[test]
fn test_check_json() {
    let output = analyzer()
        .args(["check", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["missing"].as_array().unwrap().len(), 2);
    assert_eq!(report["environment"][2]["name"], "LANGFUSE_HOST");
}

#[test]
fn test_probe_requires_credentials() {
    analyzer()
        .args(["check", "--probe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot test connection"));
}

#[test]
fn test_unreachable_host() {
    analyzer()
        .env("LANGFUSE_PUBLIC_KEY", "pk-lf-test")
        .env("LANGFUSE_SECRET_KEY", "sk-lf-test")
        .env("LANGFUSE_HOST", "http://127.0.0.1:1")
        .args(["summary", "--score-name", "accuracy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP error"));
}

#[test]
fn test_config_file_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scorelens.yaml");
    std::fs::write(
        &path,
        "langfuse:\n  public_key: pk-lf-from-file\n  secret_key: sk-lf-from-file\n",
    )
    .unwrap();

    analyzer()
        .args(["--config", path.to_str().unwrap(), "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready to connect to Langfuse!"));
}

#[test]
fn test_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scorelens.toml");
    std::fs::write(
        &path,
        "[regression]\nregression_pct = 30.0\nmedium_pct = 10.0\nhigh_pct = 20.0\n",
    )
    .unwrap();

    analyzer()
        .args(["--config", path.to_str().unwrap(), "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("regression thresholds"));
}

#[test]
fn test_day_count_out_of_range() {
    analyzer()
        .env("LANGFUSE_PUBLIC_KEY", "pk-lf-test")
        .env("LANGFUSE_SECRET_KEY", "sk-lf-test")
        .env("LANGFUSE_HOST", "http://127.0.0.1:1")
        .args(["summary", "--score-name", "accuracy", "--days", "4294967295"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("day count out of range"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_baseline_days_out_of_range() {
    analyzer()
        .env("LANGFUSE_PUBLIC_KEY", "pk-lf-test")
        .env("LANGFUSE_SECRET_KEY", "sk-lf-test")
        .env("LANGFUSE_HOST", "http://127.0.0.1:1")
        .args(["regression", "--score-name", "accuracy", "--baseline-days", "4294967295"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("day count out of range"));
}
