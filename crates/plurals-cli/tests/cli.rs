use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ENGLISH: &str = "one: i = 1 and v = 0 @integer 1; \
    other: @integer 0, 2~16, 100, 1000, … @decimal 0.0~1.5, 10.0, …";

fn plurals() -> Command {
    let mut cmd = Command::cargo_bin("plurals").unwrap();
    cmd.env_remove("PLURALS_RULES_FILE")
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

fn write_rules(dir: &TempDir, name: &str, rules: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, rules).unwrap();
    path
}

// =========================================================================
// check
// =========================================================================

#[test]
fn check_accepts_valid_file() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(&dir, "en.txt", ENGLISH);

    plurals()
        .arg("check")
        .arg(&path)
        .arg("--samples")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"))
        .stdout(predicate::str::contains("one, other"));
}

#[test]
fn check_reports_syntax_error() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(&dir, "bad.txt", "one: n is 1; one: n is 2");

    plurals()
        .arg("check")
        .arg(&path)
        .assert()
        .code(exitcode::DATAERR)
        .stderr(predicate::str::contains("duplicate keyword 'one'"));
}

#[test]
fn check_reports_sample_mismatch() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(&dir, "mismatch.txt", "one: n is 1 @integer 1, 2");

    plurals()
        .arg("check")
        .arg(&path)
        .arg("--samples")
        .assert()
        .code(exitcode::DATAERR)
        .stderr(predicate::str::contains(
            "2 is listed under 'one' @integer but selects 'other'",
        ));
}

#[test]
fn check_ignores_samples_without_flag() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(&dir, "mismatch.txt", "one: n is 1 @integer 1, 2");

    plurals().arg("check").arg(&path).assert().success();
}

#[test]
fn check_json_reports_each_file() {
    let dir = TempDir::new().unwrap();
    let good = write_rules(&dir, "good.txt", ENGLISH);
    let bad = write_rules(&dir, "bad.txt", "other: n is 1");

    let output = plurals()
        .arg("check")
        .arg(&good)
        .arg(&bad)
        .arg("--json")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(exitcode::DATAERR));

    let reports: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports[0]["valid"], true);
    assert_eq!(reports[0]["keywords"], serde_json::json!(["one", "other"]));
    assert_eq!(reports[1]["valid"], false);
    assert!(reports[1]["error"]
        .as_str()
        .unwrap()
        .contains("'other' must not have a condition"));
}

#[test]
fn check_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    plurals()
        .arg("check")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read rule file"));
}

// =========================================================================
// select
// =========================================================================

#[test]
fn select_prints_table() {
    plurals()
        .args(["select", "--rules", "one: i = 1 and v = 0", "1", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keyword"))
        .stdout(predicate::str::contains("one"))
        .stdout(predicate::str::contains("other"));
}

#[test]
fn select_json_distinguishes_visible_digits() {
    let output = plurals()
        .args(["select", "--rules", "one: i = 1 and v = 0", "--json", "1", "1.0", "-1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let selections: Value = serde_json::from_slice(&output.stdout).unwrap();
    let keywords: Vec<&str> = selections
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["keyword"].as_str().unwrap())
        .collect();
    assert_eq!(keywords, ["one", "other", "one"]);
    assert_eq!(selections[1]["operands"]["v"], 1);
}

#[test]
fn select_with_fraction_digits() {
    let output = plurals()
        .args([
            "select",
            "--rules",
            "one: i = 1 and v = 0",
            "--fraction-digits",
            "2",
            "--json",
            "1",
        ])
        .output()
        .unwrap();
    let selections: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(selections[0]["keyword"], "other");
    assert_eq!(selections[0]["operands"]["v"], 2);
}

#[test]
fn select_compact_literal() {
    let rules = "many: e = 0 and i != 0 and i % 1000000 = 0 and v = 0 or e != 0..5";
    let output = plurals()
        .args(["select", "--rules", rules, "--json", "1c6", "1c3"])
        .output()
        .unwrap();
    let selections: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(selections[0]["keyword"], "many");
    assert_eq!(selections[1]["keyword"], "other");
}

#[test]
fn select_reads_rule_file_from_env() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(&dir, "en.txt", ENGLISH);

    plurals()
        .env("PLURALS_RULES_FILE", &path)
        .args(["select", "--json", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"keyword\": \"one\""));
}

#[test]
fn select_reads_rule_file() {
    let dir = TempDir::new().unwrap();
    let path = write_rules(&dir, "en.txt", ENGLISH);

    plurals()
        .arg("select")
        .arg("--file")
        .arg(&path)
        .args(["--json", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"keyword\": \"other\""));
}

#[test]
fn select_rejects_bad_literal() {
    plurals()
        .args(["select", "--rules", "one: n is 1", "1", "abc"])
        .assert()
        .code(exitcode::DATAERR)
        .stderr(predicate::str::contains("invalid decimal literal 'abc'"));
}

#[test]
fn select_rejects_bad_rules() {
    plurals()
        .args(["select", "--rules", "one: n iz 1", "1"])
        .assert()
        .code(exitcode::DATAERR)
        .stderr(predicate::str::contains("unknown word 'iz'"));
}

#[test]
fn select_requires_rules() {
    plurals().args(["select", "1"]).assert().failure();
}

// =========================================================================
// keywords
// =========================================================================

#[test]
fn keywords_lists_other_last() {
    let output = plurals()
        .args([
            "keywords",
            "--rules",
            "other: @integer 0; one: n is 1; few: n in 2..4",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let keywords: Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = keywords
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k["keyword"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["one", "few", "other"]);
    assert_eq!(keywords[1]["condition"], "n = 2..4");
    assert_eq!(keywords[2]["integer_samples"], "0");
}

#[test]
fn keywords_table_shows_samples() {
    plurals()
        .args(["keywords", "--rules", ENGLISH])
        .assert()
        .success()
        .stdout(predicate::str::contains("@integer"))
        .stdout(predicate::str::contains("i = 1 and v = 0"));
}
