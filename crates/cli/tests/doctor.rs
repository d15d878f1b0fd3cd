use assert_cmd::prelude::*;
use predicates::prelude::*;
use regex::Regex;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn normalize_paths(s: &str) -> String {
    let re = Regex::new(r#"(?m)^(path|source): .*$"#).unwrap();
    re.replace_all(s, "$1: <CFG>").to_string()
}

#[test]
fn doctor_snapshot_default_profile() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");

    let toml = r#"
version = 1
profile = "default"

[profiles.default]
timezone = "Asia/Seoul"
week_start = "monday"
daily_auto = "thirty-day"
"#;
    write_file(&cfg, toml);

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("skb"))
        .args(["doctor", "--config", cfg.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK   skb doctor"));

    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let norm = normalize_paths(&out);

    insta::assert_snapshot!("doctor_default_profile", norm);
}

#[test]
fn doctor_profile_override() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    write_file(
        &cfg,
        r#"
version = 1

[profiles.default]
timezone = "UTC"

[profiles.seoul]
timezone = "Asia/Seoul"
"#,
    );

    Command::new(assert_cmd::cargo::cargo_bin!("skb"))
        .args(["--config", cfg.to_str().unwrap(), "--profile", "seoul", "doctor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("profile: seoul"))
        .stdout(predicate::str::contains("timezone: Asia/Seoul"));
}

#[test]
fn doctor_uses_defaults_without_config_file() {
    let tmp = tempdir().unwrap();
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("skb"));
    cmd.env("XDG_CONFIG_HOME", tmp.path()); // empty dir → no config
    cmd.arg("doctor");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("source: (built-in defaults)"))
        .stdout(predicate::str::contains("timezone: UTC"))
        .stdout(predicate::str::contains("week_start: sunday"));
}

#[test]
fn doctor_fails_when_explicit_config_missing() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("nope.toml");
    Command::new(assert_cmd::cargo::cargo_bin!("skb"))
        .args(["doctor", "--config", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL skb doctor"))
        .stdout(predicate::str::contains("config file not found"));
}

#[test]
fn doctor_fails_on_unknown_timezone() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    write_file(&cfg, "version = 1\n[profiles.default]\ntimezone = \"Mars/Olympus\"\n");

    Command::new(assert_cmd::cargo::cargo_bin!("skb"))
        .args(["doctor", "--config", cfg.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("unknown timezone 'Mars/Olympus'"));
}
