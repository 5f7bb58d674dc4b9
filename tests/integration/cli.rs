#![allow(missing_docs)]

use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

fn write_log(lines: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(lines.as_bytes()).unwrap();
    file
}

fn bench_cmd() -> Command {
    Command::cargo_bin("marea-bench").unwrap()
}

#[test]
fn unknown_benchmark_is_a_fatal_config_error() {
    let file = write_log("0 1 1.0 10\n");
    let assert = bench_cmd()
        .args(["foo", file.path().to_str().unwrap(), "1", "1", "1"])
        .assert()
        .failure();

    let output = assert.get_output();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
    // No batch was inserted, so no stats block reached stdout.
    assert!(output.stdout.is_empty());
}

#[test]
fn wrong_argument_count_exits_nonzero() {
    bench_cmd().args(["components"]).assert().failure();
}

#[test]
fn non_positive_counts_are_rejected() {
    let file = write_log("0 1 1.0 10\n");
    let path = file.path().to_str().unwrap();
    for args in [
        ["components", path, "0", "1", "1"],
        ["components", path, "1", "0", "1"],
        ["components", path, "1", "1", "-2"],
    ] {
        bench_cmd().args(args).assert().failure();
    }
}

#[test]
fn missing_input_file_is_fatal() {
    bench_cmd()
        .args(["components", "/nonexistent/edges.el", "1", "1", "1"])
        .assert()
        .failure();
}

#[test]
fn triangle_run_reports_structural_stats() {
    let file = write_log("# undirected\n0 1 1.0 10\n1 2 1.0 20\n2 0 1.0 30\n");
    let assert = bench_cmd()
        .args(["components", file.path().to_str().unwrap(), "1", "1", "1"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let stats: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("one stats block on stdout");
    assert_eq!(stats["num_vertices"], 3);
    assert!(stats["num_edges"].as_i64().unwrap() >= 3);
    assert_eq!(stats["num_filtered_edges"], 6);
}
