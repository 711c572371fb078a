//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn invoicectl() -> Command {
    let mut cmd = Command::cargo_bin("invoicectl").unwrap();
    // Keep the developer's own config and .env out of the picture
    cmd.env("HOME", std::env::temp_dir())
        .env_remove("DATABASE_URL")
        .env_remove("INVOICECTL_BIND")
        .env_remove("INVOICECTL_EMPTY_RESULTS");
    cmd
}

#[test]
fn test_top_level_help_lists_commands() {
    invoicectl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("fetch"));
}

#[test]
fn test_serve_help() {
    invoicectl()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--cors-permissive"))
        .stdout(predicate::str::contains("--bind"));
}

#[test]
fn test_seed_help() {
    invoicectl()
        .args(["seed", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--fixtures"));
}

#[test]
fn test_fetch_invoices_help() {
    invoicectl()
        .args(["fetch", "invoices", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"))
        .stdout(predicate::str::contains("--page"));
}

#[test]
fn test_fetch_rejects_unknown_panel() {
    invoicectl()
        .args(["fetch", "customers"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_completions_bash() {
    invoicectl()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("invoicectl"));
}

#[test]
fn test_seed_without_database_url_fails_cleanly() {
    invoicectl()
        .current_dir(std::env::temp_dir())
        .arg("seed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_missing_config_file_is_reported() {
    invoicectl()
        .args(["--config", "/nonexistent/invoicectl.toml", "fetch", "cards"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
