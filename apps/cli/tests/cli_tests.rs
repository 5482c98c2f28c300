//! 命令行端到端测试

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("mech-cli").unwrap()
}

#[test]
fn test_real_mode_rejected() {
    cli()
        .args(["run", "--mode", "real", "--cycles", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("real"));
}

#[test]
fn test_run_record_inspect_replay() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("shoot.mlog");
    let log_arg = log.to_str().unwrap();

    cli()
        .args([
            "run", "--mode", "sim", "--cycles", "200", "--fast", "--scenario", "shoot",
            "--distance", "2.0", "--record", log_arg,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ 序列完成"))
        .stdout(predicate::str::contains("Shooter/CalculatedSpeed_RPM"));

    cli()
        .args(["inspect", log_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("scenario=shoot"))
        .stdout(predicate::str::contains("模式:       sim"));

    cli()
        .args(["replay", log_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ 回放完成"))
        .stdout(predicate::str::contains("Shooter/At-Target-Speed"));
}

#[test]
fn test_shoot_from_table_end() {
    cli()
        .args(["run", "--cycles", "250", "--fast", "--scenario", "shoot", "--distance", "3.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ 序列完成"));
}

#[test]
fn test_unknown_override_fails() {
    cli()
        .args(["run", "--cycles", "1", "--fast", "--set", "No/Such/Key=1"])
        .assert()
        .failure();
}

#[test]
fn test_inspect_missing_log() {
    cli().args(["inspect", "/nonexistent/run.mlog"]).assert().failure();
}
