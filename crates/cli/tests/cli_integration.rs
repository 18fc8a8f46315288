//! CLI integration tests for the `cartrule` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes, stdout
//! content, and stderr content. Context files are written with `tempfile`.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn cartrule() -> Command {
    cargo_bin_cmd!("cartrule")
}

/// Write a standard line-item context to a temp dir, returning its path.
fn write_context(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("context.json");
    fs::write(
        &path,
        serde_json::json!({
            "quantity": 1,
            "custom": { "bundleId": null },
            "product": { "id": "p1", "key": "DemoX" },
            "variant": { "sku": "verified-seat", "key": "SKU-100" },
            "attributes": { "mode": "verified" },
        })
        .to_string(),
    )
    .expect("write context");
    path
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    cartrule()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cart discount predicate engine"));
}

// ──────────────────────────────────────────────
// 2. parse
// ──────────────────────────────────────────────

#[test]
fn parse_prints_rendered_expression() {
    cartrule()
        .args(["parse", "quantity = 1 and attributes.mode = \"verified\""])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "quantity = 1 and attributes.mode = \"verified\"",
        ));
}

#[test]
fn parse_json_prints_expression_tree() {
    cartrule()
        .args(["--output", "json", "parse", "quantity = 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compare"));
}

#[test]
fn parse_syntax_error_exits_1() {
    cartrule()
        .args(["parse", "quantity = "])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("syntax error at column"));
}

// ──────────────────────────────────────────────
// 3. eval
// ──────────────────────────────────────────────

#[test]
fn eval_prints_true() {
    let dir = TempDir::new().unwrap();
    let ctx = write_context(&dir);
    cartrule()
        .args(["eval", "attributes.mode = \"verified\""])
        .arg("--context")
        .arg(&ctx)
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));
}

#[test]
fn eval_prints_false() {
    let dir = TempDir::new().unwrap();
    let ctx = write_context(&dir);
    cartrule()
        .args(["eval", "attributes.mode = \"honor\""])
        .arg("--context")
        .arg(&ctx)
        .assert()
        .success()
        .stdout(predicate::str::contains("false"));
}

#[test]
fn eval_json_output() {
    let dir = TempDir::new().unwrap();
    let ctx = write_context(&dir);
    cartrule()
        .args(["--output", "json", "eval", "quantity = 1"])
        .arg("--context")
        .arg(&ctx)
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"result\":true}"));
}

#[test]
fn eval_missing_attribute_exits_1() {
    // Eager and: the missing right-hand attribute fails the whole call
    // even though quantity = 2 is already false.
    let dir = TempDir::new().unwrap();
    let ctx = write_context(&dir);
    cartrule()
        .args(["eval", "quantity = 2 and attributes.level = \"gold\""])
        .arg("--context")
        .arg(&ctx)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("context path does not resolve"));
}

#[test]
fn eval_missing_context_file_exits_1() {
    cartrule()
        .args(["eval", "quantity = 1", "--context", "no-such-file.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error reading file"));
}

#[test]
fn eval_trace_plain_annotates_nodes() {
    let dir = TempDir::new().unwrap();
    let ctx = write_context(&dir);
    cartrule()
        .args([
            "eval",
            "quantity = 1 and attributes.mode = \"honor\"",
            "--trace",
            "--plain",
        ])
        .arg("--context")
        .arg(&ctx)
        .assert()
        .success()
        .stdout(predicate::str::contains("[T] quantity = 1"))
        .stdout(predicate::str::contains("[F] attributes.mode = \"honor\""));
}

#[test]
fn eval_coercion_flag_changes_verdict() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("flags.json");
    fs::write(
        &path,
        serde_json::json!({ "attributes": { "licensed": 1 } }).to_string(),
    )
    .unwrap();

    cartrule()
        .args(["eval", "attributes.licensed = true"])
        .arg("--context")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("false"));

    cartrule()
        .args([
            "eval",
            "attributes.licensed = true",
            "--coerce-bool-literals",
        ])
        .arg("--context")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));
}
