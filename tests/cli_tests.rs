//! End-to-end tests of the `xmatch` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn write_catalog(suffix: &str, content: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::with_suffix(suffix).expect("Failed to create temp file");
    temp.write_all(content.as_bytes())
        .expect("Failed to write catalog");
    temp.flush().expect("Failed to flush catalog");
    temp
}

fn xmatch() -> Command {
    Command::cargo_bin("xmatch").expect("Binary should be built")
}

#[test]
fn test_help_lists_subcommands() {
    xmatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("match"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("Fulcrum").not());
}

#[test]
fn test_match_text_output() {
    let a = write_catalog(".tsv", "x\ty\tz\n0\t0\t0\n");
    let b = write_catalog(".tsv", "x\ty\tz\n0\t0\t0\n10\t10\t0\n");

    xmatch()
        .args(["match"])
        .arg(a.path())
        .arg(b.path())
        .args(["--xy-lim", "1", "--z-lim", "1", "--show-unmatched"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cross-match Results"))
        .stdout(predicate::str::contains("Matched: 1"))
        .stdout(predicate::str::contains("Unmatched in B: 1"));
}

#[test]
fn test_match_json_output() {
    let a = write_catalog(".csv", "x,y,z\n0,0,0\n5,5,5\n");
    let b = write_catalog(".csv", "x,y,z\n0.5,0,0\n0.3,0,0\n");

    let output = xmatch()
        .args(["match", "--format", "json"])
        .arg(a.path())
        .arg(b.path())
        .args(["--xy-lim", "1", "--z-lim", "1"])
        .output()
        .expect("Failed to run xmatch");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be JSON");
    assert_eq!(json["result"]["matched_a"], serde_json::json!([0]));
    assert_eq!(json["result"]["matched_b"], serde_json::json!([1]));
    assert_eq!(json["result"]["unmatched_a"], serde_json::json!([1]));
    assert_eq!(json["result"]["unmatched_b"], serde_json::json!([0]));
    assert_eq!(json["config"]["frame"], "cartesian");
}

#[test]
fn test_match_tsv_output() {
    let a = write_catalog(".tsv", "0\t0\t0\n2\t2\t2\n");
    let b = write_catalog(".tsv", "2\t2.5\t2\n");

    xmatch()
        .args(["match", "-f", "tsv"])
        .arg(a.path())
        .arg(b.path())
        .args(["--xy-lim", "1", "--z-lim", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("idx_a\tidx_b\td2d\td3d\n"))
        .stdout(predicate::str::contains("1\t0\t0.5\t0\n"));
}

#[test]
fn test_match_spherical_frame() {
    let a = write_catalog(".csv", "ra,dec,vel\n187.7,12.4,1300\n");
    let b = write_catalog(".csv", "ra,dec,vel\n187.7,12.4,1310\n");

    xmatch()
        .args(["match", "--frame", "spherical"])
        .arg(a.path())
        .arg(b.path())
        .args(["--xy-lim", "0.01", "--z-lim", "100", "-f", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0\t0\t0\t10\n"));
}

#[test]
fn test_unsupported_frame_is_rejected() {
    xmatch()
        .args([
            "match",
            "missing_a.tsv",
            "missing_b.tsv",
            "--xy-lim",
            "1",
            "--z-lim",
            "1",
            "--frame",
            "equatorial",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported frame 'equatorial'"));
}

#[test]
fn test_frame_name_must_be_lowercase() {
    xmatch()
        .args([
            "match",
            "missing_a.tsv",
            "missing_b.tsv",
            "--xy-lim",
            "1",
            "--z-lim",
            "1",
            "--frame",
            "Spherical",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported frame 'Spherical'"));
}

#[test]
fn test_missing_limits_are_rejected_before_reading() {
    xmatch()
        .args(["match", "missing_a.tsv", "missing_b.tsv", "--xy-lim", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--z-lim is required"));
}

#[test]
fn test_config_file_with_override() {
    let a = write_catalog(".tsv", "0\t0\t0\n");
    let b = write_catalog(".tsv", "0.5\t0\t0\n");
    let config = write_catalog(
        ".json",
        r#"{"xy_lim": 0.1, "z_lim": 1.0, "frame": "cartesian"}"#,
    );

    // The config limit alone rejects the pair
    xmatch()
        .args(["match", "-f", "tsv"])
        .arg(a.path())
        .arg(b.path())
        .arg("--config")
        .arg(config.path())
        .assert()
        .success()
        .stdout("idx_a\tidx_b\td2d\td3d\n");

    // A wider limit on the command line wins
    xmatch()
        .args(["match", "-f", "tsv"])
        .arg(a.path())
        .arg(b.path())
        .arg("--config")
        .arg(config.path())
        .args(["--xy-lim", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0\t0\t0.5\t0\n"));
}

#[test]
fn test_config_file_with_unsupported_frame() {
    let config = write_catalog(
        ".json",
        r#"{"xy_lim": 1.0, "z_lim": 1.0, "frame": "galactic"}"#,
    );

    xmatch()
        .args(["match", "a.tsv", "b.tsv", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported frame 'galactic'"));
}

#[test]
fn test_invalid_catalog_reports_line() {
    let a = write_catalog(".csv", "x,y,z\n0,0,0\n1,oops,1\n");
    let b = write_catalog(".csv", "0,0,0\n");

    xmatch()
        .args(["match"])
        .arg(a.path())
        .arg(b.path())
        .args(["--xy-lim", "1", "--z-lim", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_match_from_stdin() {
    let b = write_catalog(".tsv", "0\t0\t0\n");

    xmatch()
        .args(["match", "-", "-f", "tsv"])
        .arg(b.path())
        .args(["--xy-lim", "1", "--z-lim", "1"])
        .write_stdin("x\ty\tz\n0.2\t0\t0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("0\t0\t0.2\t0\n"));
}

#[test]
fn test_search_text_output() {
    let b = write_catalog(".tsv", "0.5\t0\t0\n0.3\t0\t0\n");

    xmatch()
        .args(["search"])
        .arg(b.path())
        .args(["--point", "0,0,0", "--xy-lim", "1", "--z-lim", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Match: index 1"))
        .stdout(predicate::str::contains("Candidates within limits: 2"));
}

#[test]
fn test_search_no_match_json() {
    let b = write_catalog(".tsv", "5\t5\t0\n");

    let output = xmatch()
        .args(["search", "--format", "json"])
        .arg(b.path())
        .args(["--point", "-1,0,0", "--xy-lim", "1", "--z-lim", "1"])
        .output()
        .expect("Failed to run xmatch");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be JSON");
    assert!(json["match"].is_null());
    assert_eq!(json["point"], serde_json::json!([-1.0, 0.0, 0.0]));
}

#[test]
fn test_search_rejects_bad_point() {
    let b = write_catalog(".tsv", "0\t0\t0\n");

    xmatch()
        .args(["search"])
        .arg(b.path())
        .args(["--point", "1,2", "--xy-lim", "1", "--z-lim", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("three comma-separated"));
}
