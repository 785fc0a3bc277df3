use assert_cmd::Command;
use predicates::prelude::*;

fn chatio() -> Command {
    let mut cmd = Command::cargo_bin("chatio").unwrap();
    cmd.env_remove("DATABASE_URL");
    cmd
}

#[test]
fn test_cli_help() {
    chatio()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chat backend with semantic message search"));
}

#[test]
fn test_cli_lists_subcommands() {
    chatio().arg("--help").assert().success().stdout(
        predicate::str::contains("serve")
            .and(predicate::str::contains("search"))
            .and(predicate::str::contains("backfill"))
            .and(predicate::str::contains("probe")),
    );
}

#[test]
fn test_cli_serve_help() {
    chatio().arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_cli_backfill_help_shows_defaults() {
    chatio()
        .args(["backfill", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("batch-size").and(predicate::str::contains("100")));
}

#[test]
fn test_cli_search_requires_query() {
    chatio().arg("search").assert().failure().stderr(predicate::str::contains("<QUERY>"));
}

#[test]
fn test_cli_rejects_non_numeric_threshold() {
    chatio()
        .args(["search", "deploy", "--threshold", "high"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold"));
}

#[test]
fn test_cli_search_without_database_url_fails() {
    chatio()
        .args(["search", "deploy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL"));
}

#[test]
fn test_cli_probe_without_database_url_fails() {
    chatio().arg("probe").assert().failure().stderr(predicate::str::contains("DATABASE_URL"));
}
