//! Usage and configuration behavior through the binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Config home containing `atunc/config.toml` with `content`, at both the
/// XDG location and the macOS one
fn config_home(content: &str) -> TempDir {
    let home = TempDir::new().unwrap();
    for base in [home.path().to_path_buf(), home.path().join("Library/Application Support")] {
        let dir = base.join("atunc");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), content).unwrap();
    }
    home
}

fn atunc(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("atunc").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("ATUNC_LOG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn usage_exit_code_is_configurable() {
    let home = config_home("usage_exit_code = 64\n");

    atunc(&home)
        .assert()
        .code(64)
        .stdout(predicate::str::contains("--list-devices"));
}

#[test]
fn malformed_device_id_prints_reason_and_usage() {
    let home = TempDir::new().unwrap();

    atunc(&home)
        .args(["--device-id", "mic", "--output-path", "out.wav"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("mic"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn unknown_flag_uses_configured_code() {
    let home = config_home("usage_exit_code = 2\n");

    atunc(&home)
        .arg("--record-forever")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("--output-path"));
}

#[test]
fn broken_config_file_falls_back_to_defaults() {
    let home = config_home("usage_exit_code = \"loud\"\n");

    atunc(&home).assert().code(0);
}

#[test]
fn bad_config_entry_falls_back_alone() {
    let home = config_home("usage_exit_code = 64\nbuffer_frames = 0\n");

    atunc(&home)
        .assert()
        .code(64)
        .stderr(predicate::str::contains("buffer_frames"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();

    atunc(&home)
        .args(["config", "set", "buffer_frames", "512"])
        .assert()
        .success();

    atunc(&home)
        .args(["config", "get", "buffer_frames"])
        .assert()
        .success()
        .stdout(predicate::str::diff("512\n"));
}

#[test]
fn config_set_rejects_zero_buffer() {
    let home = TempDir::new().unwrap();

    atunc(&home)
        .args(["config", "set", "buffer_frames", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("buffer_frames"));
}

#[test]
fn config_init_twice_fails() {
    let home = TempDir::new().unwrap();

    atunc(&home).args(["config", "init"]).assert().success();
    atunc(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
