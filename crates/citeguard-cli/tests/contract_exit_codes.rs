#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const ALLOW_ANSWER: &str = "Alpha is first [C1]. Beta follows alpha [C2].";
const ALLOW_CHUNKS: &str = r#"[
  {"id": "C1", "text": "Alpha is first in the series."},
  {"id": "C2", "text": "Beta follows alpha in the sequence."}
]"#;

const PERCENT_ANSWER: &str = "Uptime is 99% [C1].";
const PERCENT_CHUNKS: &str = r#"[{"chunk_index": 1, "text": "Uptime is 98%."}]"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn check(answer: &Path, chunks: &Path) -> Command {
    let mut cmd = Command::cargo_bin("citeguard").unwrap();
    cmd.arg("check")
        .arg("--answer")
        .arg(answer)
        .arg("--chunks")
        .arg(chunks)
        .env_remove("CITEGUARD_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let out = cmd.output().unwrap();
    serde_json::from_slice(&out.stdout).expect("stdout must be a JSON result")
}

#[test]
fn contract_allow_exits_zero_with_json_result() {
    let dir = tempdir().unwrap();
    let answer = write(dir.path(), "answer.txt", ALLOW_ANSWER);
    let chunks = write(dir.path(), "chunks.json", ALLOW_CHUNKS);

    check(&answer, &chunks).assert().success().code(0);

    let v = stdout_json(&mut check(&answer, &chunks));
    assert_eq!(v["status"], "ALLOW");
    assert_eq!(v["total_claims"], 2);
    assert_eq!(v["supported_claims"], 2);
    assert!(v["reasons"].as_array().unwrap().is_empty());
    assert_eq!(v["debug"]["citations"], serde_json::json!(["C1", "C2"]));
}

#[test]
fn contract_warn_exits_zero() {
    let dir = tempdir().unwrap();
    let answer = write(dir.path(), "answer.txt", PERCENT_ANSWER);
    let chunks = write(dir.path(), "chunks.json", PERCENT_CHUNKS);

    let mut cmd = check(&answer, &chunks);
    cmd.arg("--semantic");
    cmd.assert().code(0);

    let mut cmd = check(&answer, &chunks);
    cmd.arg("--semantic");
    let v = stdout_json(&mut cmd);
    assert_eq!(v["status"], "WARN");
    assert_eq!(v["reasons"][0]["code"], "SEMANTIC_SUPPORT_WEAK");
}

#[test]
fn contract_block_exits_two_and_withholds_answer_in_text_mode() {
    let dir = tempdir().unwrap();
    let answer = write(dir.path(), "answer.txt", "All data is accurate and complete.");
    let chunks = write(dir.path(), "chunks.json", "[]");

    check(&answer, &chunks)
        .args(["--format", "text"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("BLOCKED: NO_CITATIONS"));
}

#[test]
fn contract_text_mode_prefixes_warning() {
    let dir = tempdir().unwrap();
    let answer = write(dir.path(), "answer.txt", PERCENT_ANSWER);
    let chunks = write(dir.path(), "chunks.json", PERCENT_CHUNKS);

    check(&answer, &chunks)
        .args(["--format", "text", "--semantic"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with(
            "WARNING: answer may be incompletely grounded (SEMANTIC_SUPPORT_WEAK)\n",
        ))
        .stdout(predicate::str::contains(PERCENT_ANSWER));
}

#[test]
fn contract_text_mode_allow_echoes_answer() {
    let dir = tempdir().unwrap();
    let answer = write(dir.path(), "answer.txt", ALLOW_ANSWER);
    let chunks = write(dir.path(), "chunks.json", ALLOW_CHUNKS);

    check(&answer, &chunks)
        .args(["--format", "text"])
        .assert()
        .code(0)
        .stdout(ALLOW_ANSWER);
}

#[test]
fn contract_prompt_payload_shape_is_accepted() {
    let dir = tempdir().unwrap();
    let answer = write(dir.path(), "answer.txt", ALLOW_ANSWER);
    let payload = format!(r#"{{"question": "q", "retrieved_chunks": {ALLOW_CHUNKS}}}"#);
    let chunks = write(dir.path(), "payload.json", &payload);

    let v = stdout_json(&mut check(&answer, &chunks));
    assert_eq!(v["status"], "ALLOW");
}

#[test]
fn contract_answer_from_stdin() {
    let dir = tempdir().unwrap();
    let chunks = write(dir.path(), "chunks.json", ALLOW_CHUNKS);

    check(Path::new("-"), &chunks)
        .write_stdin(ALLOW_ANSWER)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"status\": \"ALLOW\""));
}

#[test]
fn contract_config_enables_extension_and_cli_can_disable_it() {
    let dir = tempdir().unwrap();
    let answer = write(dir.path(), "answer.txt", PERCENT_ANSWER);
    let chunks = write(dir.path(), "chunks.json", PERCENT_CHUNKS);
    let config = write(
        dir.path(),
        "guardrails.yaml",
        "extensions:\n  semantic_support_check: true\n",
    );

    let mut cmd = check(&answer, &chunks);
    cmd.arg("--config").arg(&config);
    assert_eq!(stdout_json(&mut cmd)["status"], "WARN");

    let mut cmd = check(&answer, &chunks);
    cmd.arg("--config")
        .arg(&config)
        .args(["--semantic", "--disable-extensions"]);
    assert_eq!(stdout_json(&mut cmd)["status"], "ALLOW");
}

#[test]
fn contract_malformed_chunk_is_input_error() {
    let dir = tempdir().unwrap();
    let answer = write(dir.path(), "answer.txt", ALLOW_ANSWER);
    let chunks = write(dir.path(), "chunks.json", r#"[{"id": "C1", "text": "a"}, 42]"#);

    check(&answer, &chunks)
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("fatal:"))
        .stderr(predicate::str::contains("retrieved_chunks[1]"));
}

#[test]
fn contract_unknown_config_key_is_input_error() {
    let dir = tempdir().unwrap();
    let answer = write(dir.path(), "answer.txt", ALLOW_ANSWER);
    let chunks = write(dir.path(), "chunks.json", ALLOW_CHUNKS);
    let config = write(dir.path(), "guardrails.yaml", "thresholds:\n  min_density: 0.5\n");

    check(&answer, &chunks)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn contract_missing_answer_file_is_input_error() {
    let dir = tempdir().unwrap();
    let chunks = write(dir.path(), "chunks.json", ALLOW_CHUNKS);

    check(&dir.path().join("nope.txt"), &chunks)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("failed to read answer"));
}

#[test]
fn contract_usage_error_is_not_block() {
    Command::cargo_bin("citeguard")
        .unwrap()
        .args(["check", "--no-such-flag"])
        .assert()
        .code(1);
}

#[test]
fn contract_explain_codes_lists_every_code() {
    let assert = Command::cargo_bin("citeguard")
        .unwrap()
        .arg("explain-codes")
        .assert()
        .code(0);
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    for code in [
        "NO_CITATIONS",
        "MAPPING_FAILED",
        "UNSUPPORTED_CLAIMS",
        "LOW_CITATION_DENSITY",
        "PARTIAL_COVERAGE",
        "CITATION_DEDUP_DOMINANCE",
        "SEMANTIC_SUPPORT_WEAK",
        "UNSUPPORTED_EXPLICIT_CLAIM",
        "CLAIM_CITATION_MISMATCH",
    ] {
        assert!(out.contains(code), "missing {code}");
    }
    assert_eq!(out.lines().count(), 9);
}
