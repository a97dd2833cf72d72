//! Batch subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_batch_writes_next_to_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.md");
    let second = temp_dir.path().join("second.md");
    fs::write(&first, "_one_").unwrap();
    fs::write(&second, "__two__").unwrap();

    cargo_bin_cmd!("tagdown")
        .current_dir(temp_dir.path())
        .args(["batch", "first.md", "second.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered first.md -> first.html"))
        .stdout(predicate::str::contains("Rendered second.md -> second.html"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("first.html")).unwrap(),
        "<em>one</em>"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("second.html")).unwrap(),
        "<strong>two</strong>"
    );
}

#[test]
fn test_batch_out_dir() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("page.md");
    let out_dir = temp_dir.path().join("site");
    fs::write(&input, "~~old~~ new").unwrap();

    cargo_bin_cmd!("tagdown")
        .current_dir(temp_dir.path())
        .args([
            "batch",
            input.to_str().unwrap(),
            "--out-dir",
            out_dir.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(out_dir.join("page.html")).unwrap(),
        "<strike>old</strike> new"
    );
}

#[test]
fn test_batch_reports_failures() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("ok.md"), "_fine_").unwrap();

    cargo_bin_cmd!("tagdown")
        .current_dir(temp_dir.path())
        .args(["batch", "ok.md", "missing.md"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Rendered ok.md -> ok.html"))
        .stderr(predicate::str::contains("missing.md"))
        .stderr(predicate::str::contains("1 of 2 file(s) failed"));

    assert!(temp_dir.path().join("ok.html").is_file());
}

#[test]
fn test_batch_refuses_to_overwrite_input() {
    let temp_dir = TempDir::new().unwrap();
    let page = temp_dir.path().join("page.html");
    fs::write(&page, "_keep_ original").unwrap();

    cargo_bin_cmd!("tagdown")
        .current_dir(temp_dir.path())
        .args(["batch", "page.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("would overwrite the input"))
        .stderr(predicate::str::contains("1 of 1 file(s) failed"));

    cargo_bin_cmd!("tagdown")
        .current_dir(temp_dir.path())
        .args(["batch", "page.html", "--out-dir", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("would overwrite the input"));

    assert_eq!(fs::read_to_string(&page).unwrap(), "_keep_ original");
}
