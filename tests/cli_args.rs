//! Tests for CLI argument parsing and startup errors, run against the binary.

use std::io::Write;
use std::process::Command;

fn gemrag_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gemrag"))
}

#[test]
fn test_help_lists_options() {
    let output = gemrag_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--prompt"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--offline"));
}

#[test]
fn test_version_flag() {
    let output = gemrag_cmd()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_config_file_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = gemrag_cmd()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Failed to read config file"));
}

#[test]
fn test_invalid_config_exits_with_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[gemini]\ntimeout_seconds = 0\n").unwrap();

    let output = gemrag_cmd()
        .arg("--config")
        .arg(file.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Config validation failed"));
}

#[test]
fn test_missing_api_key_exits_with_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[gemini]\napi_key_env = \"GEMRAG_TEST_UNSET_KEY\"\n")
        .unwrap();

    let output = gemrag_cmd()
        .arg("--config")
        .arg(file.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("GEMRAG_TEST_UNSET_KEY")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("API key"));
    assert!(stderr.contains("GEMRAG_TEST_UNSET_KEY"));
}
