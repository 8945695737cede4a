//! Integration tests that run the rpmgen binary: exit codes, notices and
//! log file output.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn rpmgen(temp_dir: &TempDir) -> Command {
    let config_home = temp_dir.path().join("config-home");
    fs::create_dir_all(&config_home).unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rpmgen"));
    cmd.env("XDG_CONFIG_HOME", config_home.as_os_str())
        .env_remove("RPMGEN_LOG")
        .env_remove("RPMGEN_LOG_OUTPUT")
        .env_remove("RPMGEN_LOG_FORMAT")
        .arg("--workspace")
        .arg(temp_dir.path());
    cmd
}

#[test]
fn test_logs_written_to_requested_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("logs").join("rpmgen.log");

    let output = rpmgen(&temp_dir)
        .args(["--log-output", "file", "--log-format", "json", "--log-file"])
        .arg(&log_file)
        .arg("schema")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "rpmgen schema should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(schema["version"], "rpm-response/1");

    let logs = fs::read_to_string(&log_file).unwrap();
    let first = logs.lines().next().unwrap();
    let entry: serde_json::Value = serde_json::from_str(first).unwrap();
    assert_eq!(entry["fields"]["message"], "rpmgen starting");
}

#[test]
fn test_missing_dimension_exits_with_notice() {
    let temp_dir = TempDir::new().unwrap();

    let output = rpmgen(&temp_dir)
        .args(["--quiet", "validate", "--set", "schoolName=SD Negeri 2"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Pilih minimal satu dimensi lulusan."));
}

#[test]
fn test_generate_without_api_key_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();

    let output = rpmgen(&temp_dir)
        .env_remove("API_KEY")
        .env_remove("GEMINI_API_KEY")
        .args(["--quiet", "generate", "--dimension", "Kreativitas"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Konfigurasi tidak valid"));
}

#[test]
fn test_invalid_config_file_exits_with_notice() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("rpmgen.toml");
    fs::write(&config_file, "[logging]\nformat = \"xml\"\n").unwrap();

    let output = rpmgen(&temp_dir)
        .arg("--quiet")
        .arg("--config")
        .arg(&config_file)
        .arg("schema")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Konfigurasi tidak valid"));
    assert!(stderr.contains("Invalid log format"));
}
