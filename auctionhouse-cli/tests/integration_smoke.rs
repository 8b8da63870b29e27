//! Smoke tests to verify command wiring (no database needed)

use assert_cmd::Command;
use predicates::prelude::*;

fn auctionctl() -> Command {
    Command::cargo_bin("auctionctl").unwrap()
}

#[test]
fn test_top_level_help_lists_commands() {
    auctionctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("delete-auction"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn test_serve_help() {
    auctionctl()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1:5000"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_delete_auction_help() {
    auctionctl()
        .arg("delete-auction")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exact auction name"));
}

#[test]
fn test_delete_auction_requires_name() {
    auctionctl()
        .arg("delete-auction")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<NAME>"));
}

#[test]
fn test_seed_help() {
    auctionctl()
        .arg("seed")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo dataset"));
}

#[test]
fn test_unknown_command_fails() {
    auctionctl().arg("auction-party").assert().failure();
}
