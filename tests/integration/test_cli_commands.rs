use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn mdtransform(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mdtransform").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("MDTRANSFORM_LOG")
        .env_remove("MDTRANSFORM_VERBOSE")
        .env_remove("MDTRANSFORM_DIAGRAM_STYLE");
    cmd
}

#[test]
fn test_formats_lists_builtins_in_order() {
    let dir = TempDir::new().unwrap();
    let output = mdtransform(&dir).arg("formats").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(names, vec!["markdown", "plaintext", "paragraphs", "bytes"]);
}

#[test]
fn test_formats_json() {
    let dir = TempDir::new().unwrap();
    let output = mdtransform(&dir)
        .args(["formats", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[2]["name"], "paragraphs");
    assert_eq!(value[2]["file_format"], "json");
    assert_eq!(value[2]["targets"], serde_json::json!(["plaintext", "markdown"]));
}

#[test]
fn test_targets_and_route() {
    let dir = TempDir::new().unwrap();
    mdtransform(&dir)
        .args(["targets", "plaintext"])
        .assert()
        .success()
        .stdout("paragraphs\nbytes\n");
    mdtransform(&dir)
        .args(["route", "bytes", "markdown"])
        .assert()
        .success()
        .stdout("bytes -> plaintext -> paragraphs -> markdown\n");
}

#[test]
fn test_unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    mdtransform(&dir)
        .args(["route", "markdown", "docx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'docx'"));
}

#[test]
fn test_transform_from_stdin() {
    let dir = TempDir::new().unwrap();
    mdtransform(&dir)
        .args(["transform", "--from", "markdown", "--to", "paragraphs"])
        .write_stdin("# Notes\n\nSome **bold** text\n")
        .assert()
        .success()
        .stdout("[\n  \"Notes\",\n  \"Some bold text\"\n]\n");
}

#[test]
fn test_transform_verbose_traces_on_stderr() {
    let dir = TempDir::new().unwrap();
    mdtransform(&dir)
        .args([
            "transform",
            "--from",
            "markdown",
            "--via",
            "bytes",
            "--to",
            "plaintext",
            "--verbose",
        ])
        .write_stdin("_hi_")
        .assert()
        .success()
        .stdout("hi\n")
        .stderr(predicate::str::contains("destination=bytes"))
        .stderr(predicate::str::contains("<binary: 2 bytes>"));
}

#[test]
fn test_transform_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.md");
    let output = dir.path().join("doc.bin");
    fs::write(&input, "*x*").unwrap();

    mdtransform(&dir)
        .args(["transform", "--from", "markdown", "--to", "bytes", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout("");
    assert_eq!(fs::read(&output).unwrap(), b"x");
}

#[test]
fn test_diagram_style_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("mdtransform.toml"),
        "[transform]\ndiagram_style = \"mermaid\"\n",
    )
    .unwrap();
    mdtransform(&dir)
        .arg("diagram")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("graph LR\n"));
    mdtransform(&dir)
        .args(["diagram", "--style", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph {"));
}

#[test]
fn test_invalid_param_is_rejected_by_clap() {
    let dir = TempDir::new().unwrap();
    mdtransform(&dir)
        .args(["transform", "--from", "markdown", "--to", "plaintext", "--param", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn test_transform_roundtrip_emits_source_format() {
    let dir = TempDir::new().unwrap();
    mdtransform(&dir)
        .env("MDTRANSFORM_LOG", "info")
        .args([
            "transform",
            "--from",
            "plaintext",
            "--to",
            "paragraphs",
            "--roundtrip",
        ])
        .write_stdin("alpha\nstill alpha\n\nbeta")
        .assert()
        .success()
        .stdout("alpha\nstill alpha\n\nbeta\n")
        .stderr(predicate::str::contains("roundtrip preserved the input"));
}

#[test]
fn test_transform_roundtrip_reports_lossy_conversion() {
    let dir = TempDir::new().unwrap();
    mdtransform(&dir)
        .args([
            "transform",
            "--from",
            "markdown",
            "--to",
            "paragraphs",
            "--roundtrip",
        ])
        .write_stdin("**bold** claim")
        .assert()
        .success()
        .stdout("bold claim\n")
        .stderr(predicate::str::contains("roundtrip result differs from the input"));
}
