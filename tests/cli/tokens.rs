//! Tokens subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_tokens_stdin() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("tagdown")
        .current_dir(temp_dir.path())
        .arg("tokens")
        .write_stdin("a _b_ c_1")
        .assert()
        .success()
        .stdout(
            "0 text \"a \"\n\
             2 delimiter \"_\" em opening\n\
             3 text \"b\"\n\
             4 delimiter \"_\" em closing\n\
             5 text \" c\"\n\
             7 delimiter \"_\" em closing\n\
             8 text \"1\"\n",
        );
}

#[test]
fn test_tokens_escaped() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("tagdown")
        .current_dir(temp_dir.path())
        .arg("tokens")
        .write_stdin(r"\__x__")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 delimiter \"__\" strong fake escaped"));
}

#[test]
fn test_tokens_empty_input() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("tagdown")
        .current_dir(temp_dir.path())
        .arg("tokens")
        .write_stdin("")
        .assert()
        .success()
        .stdout("");
}
