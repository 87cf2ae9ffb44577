#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("rota-cli").unwrap()
}

#[test]
fn generate_prints_grid() {
    cli()
        .args(["generate", "--workers", "18", "--shifts", "3", "--min-per-shift", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OP18"))
        .stderr(predicate::str::contains("warning").not());
}

#[test]
fn generate_fails_without_enough_workers() {
    cli()
        .args(["generate", "--workers", "5", "--shifts", "3", "--min-per-shift", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient workers"));
}

#[test]
fn generate_requires_parameters() {
    cli()
        .args(["generate", "--workers", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required without --config"));
}

#[test]
fn shortfall_exits_with_warning_code() {
    let dir = tempdir().unwrap();
    let report = dir.path().join("report.csv");
    cli()
        .args([
            "generate",
            "--workers",
            "2",
            "--shifts",
            "1",
            "--min-per-shift",
            "2",
            "--weeks",
            "3",
            "--pattern",
            "6",
            "--quiet",
            "--report-csv",
        ])
        .arg(&report)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("warning: week 3 Sun"));
    assert!(std::fs::read_to_string(&report)
        .unwrap()
        .contains("shortfall,,3,Sun,0,2,0"));
}

#[test]
fn exported_roster_passes_check() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("roster.json");
    let csv = dir.path().join("roster.csv");
    cli()
        .args(["generate", "--workers", "18", "--shifts", "3", "--min-per-shift", "3", "--quiet"])
        .arg("--out-json")
        .arg(&json)
        .arg("--out-csv")
        .arg(&csv)
        .args(["--start-date", "2025-10-06"])
        .assert()
        .success();

    assert!(std::fs::read_to_string(&csv)
        .unwrap()
        .starts_with("worker,base_shift,2025-10-06"));

    cli()
        .arg("check")
        .arg("--roster")
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));
}

#[test]
fn check_reports_undercovered_roster() {
    let dir = tempdir().unwrap();
    let json = dir.path().join("roster.json");
    cli()
        .args([
            "generate",
            "--workers",
            "2",
            "--shifts",
            "1",
            "--min-per-shift",
            "2",
            "--weeks",
            "3",
            "--pattern",
            "6",
            "--quiet",
        ])
        .arg("--out-json")
        .arg(&json)
        .assert()
        .code(2);

    cli()
        .arg("check")
        .arg("--roster")
        .arg(&json)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Found 1 conflict(s)"))
        .stderr(predicate::str::contains("shift 0 short by 2"));
}

#[test]
fn patterns_command() {
    cli()
        .args(["patterns", "--hours", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10h: 5,4,4,4"));

    cli()
        .arg("patterns")
        .assert()
        .success()
        .stdout(predicate::str::contains("8h: 6,5,5,5"))
        .stdout(predicate::str::contains("12h: 4,3,4,3"));
}
