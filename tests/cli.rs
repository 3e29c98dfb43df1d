//! Binary-level tests of the command-line interface

use assert_cmd::Command;
use predicates::prelude::*;

/// Unreachable server, so any request that slips through fails with exit 3
const DEAD_URL: &str = "http://127.0.0.1:9/MapServer";

fn arqual() -> Command {
    let mut cmd = Command::cargo_bin("arqual").unwrap();
    cmd.env("ARQUAL_BASE_URL", DEAD_URL).env_remove("ARQUAL_PAGE_SIZE");
    cmd
}

#[test]
fn test_version() {
    for flag in ["-v", "--version"] {
        arqual()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
            .stdout(predicate::str::contains("https://qualar.apambiente.pt"));
    }
}

#[test]
fn test_help_lists_commands_and_options() {
    arqual()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stations"))
        .stdout(predicate::str::contains("indexes"))
        .stdout(predicate::str::contains("alerts"))
        .stdout(predicate::str::contains("--datemin"))
        .stdout(predicate::str::contains("--station"))
        .stdout(predicate::str::contains("arqual indexes -s 3072 -d 2020-04-17"));
}

#[test]
fn test_help_wins_over_invalid_input() {
    arqual()
        .args(["indexes", "-h", "-d", "not-a-date"])
        .assert()
        .success();
}

#[test]
fn test_help_after_invalid_value() {
    arqual()
        .args(["indexes", "-d", "bad", "-h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--datemin"));
}

#[test]
fn test_version_after_unknown_command() {
    arqual()
        .args(["foo", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_missing_command() {
    arqual().assert().code(2);
}

#[test]
fn test_unknown_command() {
    arqual()
        .arg("get_stations")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("get_stations"));
}

#[test]
fn test_indexes_without_station() {
    arqual()
        .args(["indexes", "-d", "2020-04-17"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--station"));
}

#[test]
fn test_malformed_date() {
    arqual()
        .args(["indexes", "-s", "3072", "-d", "2020-13-01"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("2020-13-01"));
}

#[test]
fn test_conflicting_date_flags() {
    arqual()
        .args(["alerts", "-d", "2020-04-17", "--datemin", "2020-04-10"])
        .assert()
        .code(2);
}

#[test]
fn test_stations_rejects_station_filter() {
    arqual()
        .args(["stations", "-s", "3072"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("stations"));
}

#[test]
fn test_unreachable_server() {
    arqual()
        .args(["stations", "-d", "2020-04-17"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: Network error"));
}
