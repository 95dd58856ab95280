use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn kitfab(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kitfab").expect("kitfab binary");
    cmd.current_dir(dir.path())
        .env_remove("KITFAB_STEAM_ID")
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kitfab.toml");
    fs::write(&path, "[batch]\nconcurrency = 0\n").unwrap();

    kitfab(&dir)
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value for concurrency"));
}

#[test]
fn validate_fails_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    kitfab(&dir)
        .args(["config", "validate", "-c", "absent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn config_init_writes_a_valid_file() {
    let dir = tempfile::tempdir().unwrap();

    kitfab(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join("kitfab.toml").exists());

    kitfab(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config file is valid"));

    kitfab(&dir).args(["config", "init"]).assert().failure();
}

#[test]
fn parts_lists_the_default_table() {
    let dir = tempfile::tempdir().unwrap();

    kitfab(&dir)
        .arg("parts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Battle-Worn Robot KB-808"))
        .stdout(predicate::str::contains("Pristine Robot Brainstorm Bulb"));
}

#[test]
fn parts_json_output_is_parseable() {
    let dir = tempfile::tempdir().unwrap();

    let output = kitfab(&dir).args(["--json", "parts"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value = stdout
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .find(|value: &serde_json::Value| value["command"] == "parts")
        .expect("parts payload");
    assert_eq!(value["parts"].as_array().map(Vec::len), Some(10));
}

#[test]
fn config_show_reports_fixed_key_rate() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("kitfab.toml"),
        "default_account = \"76561198000000000\"\n[pricing]\nkey_rate = 59.11\n",
    )
    .unwrap();

    kitfab(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("59.11 ref"))
        .stdout(predicate::str::contains("76561198000000000"));
}

#[test]
fn analyze_without_account_fails_when_not_interactive() {
    let dir = tempfile::tempdir().unwrap();

    kitfab(&dir)
        .args(["analyze", "--choice", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("default_account"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    kitfab(&dir).arg("trade").assert().failure();
}
