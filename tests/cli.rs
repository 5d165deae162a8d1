//! End-to-end checks against the built `bsd` binary.

use std::path::Path;
use std::process::{Command, Output};

const ENV_VARS: [&str; 5] = [
    "BSD_BANK_NAME",
    "BSD_CAPITAL_ADEQUACY",
    "BSD_NON_PERFORMING_LOANS",
    "BSD_LOAN_TO_DEPOSIT",
    "BSD_NET_INTEREST_MARGIN",
];

/// Run `bsd` in `dir` with a clean metric environment.
fn bsd(dir: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bsd"));
    cmd.args(args).current_dir(dir).env("RUST_LOG", "warn");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.output().unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

#[test]
fn score_defaults_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let out = bsd(dir.path(), &["score", "-b", "Acme"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Overall Stability Score: 84.79"), "{text}");
    assert!(text.contains("Status: Stable"));
    assert!(text.contains("Acme is performing well."));
}

#[test]
fn score_worst_case_is_unstable() {
    let dir = tempfile::tempdir().unwrap();
    let out = bsd(
        dir.path(),
        &[
            "score",
            "--capital-adequacy",
            "0",
            "--non-performing-loans",
            "15",
            "--loan-to-deposit",
            "120",
            "--net-interest-margin",
            "0",
        ],
    );
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Overall Stability Score: 0.00"), "{text}");
    assert!(text.contains("Status: Unstable"));
    assert!(text.contains("Your Bank is in a critical condition."));
}

#[test]
fn environment_supplies_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_bsd"))
        .args(["score", "--format", "json"])
        .current_dir(dir.path())
        .env("BSD_BANK_NAME", "Env Bank")
        .env("BSD_CAPITAL_ADEQUACY", "8")
        .env("BSD_NON_PERFORMING_LOANS", "0")
        .env("BSD_LOAN_TO_DEPOSIT", "80")
        .env("BSD_NET_INTEREST_MARGIN", "5")
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["bank_name"], "Env Bank");
    assert_eq!(json["result"]["score"].as_f64().unwrap(), 100.0);
    assert_eq!(json["result"]["status"], "stable");
}

#[test]
fn dotenv_file_supplies_bank_name() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "BSD_BANK_NAME=Dotenv Bank\n").unwrap();
    let out = bsd(dir.path(), &["score"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Bank: Dotenv Bank"));
}

#[test]
fn nan_input_exits_with_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = bsd(dir.path(), &["score", "--net-interest-margin", "NaN"]);
    assert_eq!(out.status.code(), Some(2));
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("Net Interest Margin"), "{err}");
}

#[test]
fn tui_rejects_nan_before_taking_the_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("tui.log");
    let out = bsd(
        dir.path(),
        &[
            "tui",
            "--net-interest-margin",
            "NaN",
            "--log-file",
            log.to_str().unwrap(),
        ],
    );
    assert_eq!(out.status.code(), Some(2));
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("Net Interest Margin"), "{err}");
    // No alternate-screen escape codes were written.
    assert!(out.stdout.is_empty());
}

#[test]
fn out_of_range_input_is_clamped_with_warning() {
    let dir = tempfile::tempdir().unwrap();
    let out = bsd(dir.path(), &["score", "--loan-to-deposit", "200"]);
    assert!(out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("clamped"), "{err}");
    assert!(stdout(&out).contains("120.0%"));
}

#[test]
fn export_then_show_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("acme.json");
    let report_arg = report.to_str().unwrap();

    let out = bsd(
        dir.path(),
        &["score", "-b", "Acme", "--loan-to-deposit", "95", "--export", report_arg],
    );
    assert!(out.status.success());
    assert!(report.exists());

    let shown = bsd(dir.path(), &["show", "--report", report_arg]);
    assert!(shown.status.success());
    let scored = stdout(&out);
    let text = stdout(&shown);
    assert!(text.starts_with("Generated: "));
    let score_line = scored
        .lines()
        .find(|l| l.starts_with("Overall Stability Score"))
        .unwrap();
    assert!(text.contains(score_line));
}

#[test]
fn show_prints_the_recorded_recommendation() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("acme.json");
    let report_arg = report.to_str().unwrap();

    let out = bsd(dir.path(), &["score", "-b", "Acme", "--export", report_arg]);
    assert!(out.status.success());

    let mut record: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    record["recommendation"]["message"] = "Reviewed by the risk desk.".into();
    std::fs::write(&report, serde_json::to_string_pretty(&record).unwrap()).unwrap();

    let shown = bsd(dir.path(), &["show", "--report", report_arg]);
    assert!(shown.status.success());
    let text = stdout(&shown);
    assert!(text.contains("[ok] Reviewed by the risk desk."), "{text}");
    assert!(!text.contains("Acme is performing well."));
}

#[test]
fn show_missing_report_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = bsd(dir.path(), &["show", "--report", "missing.json"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn sweep_prints_table() {
    let dir = tempfile::tempdir().unwrap();
    let out = bsd(dir.path(), &["sweep", "--metric", "loan-to-deposit", "--points", "8"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("Sensitivity: Loan-to-Deposit"));
    assert!(text.contains("120.00"));
}
