//! Render subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_render_stdin() {
    let temp_dir = TempDir::new().unwrap();

    cargo_bin_cmd!("tagdown")
        .current_dir(temp_dir.path())
        .arg("render")
        .write_stdin("a __b _c_ d__ e")
        .assert()
        .success()
        .stdout("a <strong>b <em>c</em> d</strong> e");
}

#[test]
fn test_render_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("notes.md");
    fs::write(&test_file, "Keep ~~this~~ and c_12_3\n").unwrap();

    cargo_bin_cmd!("tagdown")
        .args(["render", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("Keep <strike>this</strike> and c_12_3\n");
}

#[test]
fn test_render_to_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("notes.md");
    let out_file = temp_dir.path().join("out.html");
    fs::write(&test_file, "_a_ b").unwrap();

    cargo_bin_cmd!("tagdown")
        .args([
            "render",
            test_file.to_str().unwrap(),
            "--output",
            out_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered"));

    assert_eq!(fs::read_to_string(&out_file).unwrap(), "<em>a</em> b");
}

#[test]
fn test_render_discovers_config() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("docs");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        temp_dir.path().join("tagdown.toml"),
        "[tags]\n\"==\" = \"mark\"\n",
    )
    .unwrap();
    let test_file = nested.join("page.md");
    fs::write(&test_file, "a ==b== _c_").unwrap();

    cargo_bin_cmd!("tagdown")
        .args(["render", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("a <mark>b</mark> _c_");
}

#[test]
fn test_render_explicit_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("custom.toml");
    fs::write(&config_file, "[tags]\n\"*\" = \"em\"\n").unwrap();

    cargo_bin_cmd!("tagdown")
        .current_dir(temp_dir.path())
        .args(["render", "--config", config_file.to_str().unwrap()])
        .write_stdin("*a* _b_")
        .assert()
        .success()
        .stdout("<em>a</em> _b_");
}

#[test]
fn test_render_invalid_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("broken.toml");
    fs::write(&config_file, "[tags]\n\"ab\" = \"em\"\n").unwrap();

    cargo_bin_cmd!("tagdown")
        .current_dir(temp_dir.path())
        .args(["render", "--config", config_file.to_str().unwrap()])
        .write_stdin("text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidInput"));
}
