//! Cross-cutting CLI tests (help, version, error handling)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help() {
    cargo_bin_cmd!("tagdown")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tagdown renders a small markup dialect"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("tagdown")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("tagdown")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    cargo_bin_cmd!("tagdown")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_render_help() {
    cargo_bin_cmd!("tagdown")
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RENDERING RULES"));
}

#[test]
fn test_batch_requires_files() {
    cargo_bin_cmd!("tagdown")
        .arg("batch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_missing_input_file() {
    cargo_bin_cmd!("tagdown")
        .args(["render", "does-not-exist.md"])
        .assert()
        .failure();
}
