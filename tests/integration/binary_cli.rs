//! End-to-end tests that spawn the kz binary.
//!
//! Each run gets its own HOME and XDG_CONFIG_HOME so the user's real files are
//! never read or written.

use super::test_utils::KUBECONFIG_YAML;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_kz(test_dir: &Path, args: &[&str]) -> Output {
    let home = test_dir.join("home");
    let config_home = test_dir.join("config");
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&config_home).unwrap();

    Command::new(env!("CARGO_BIN_EXE_kz"))
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", &config_home)
        .env_remove("KUBECONFIG")
        .env_remove("KZ_LOG")
        .env_remove("KZ_LOG_OUTPUT")
        .args(args)
        .output()
        .unwrap()
}

fn write_kubeconfig(test_dir: &Path) -> String {
    let path = test_dir.join("kubeconfig");
    fs::write(&path, KUBECONFIG_YAML).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_switch_context_exit_code_and_output() {
    let temp_dir = TempDir::new().unwrap();
    let kubeconfig = write_kubeconfig(temp_dir.path());

    let output = run_kz(temp_dir.path(), &["--kubeconfig", &kubeconfig, "admin"]);

    assert!(
        output.status.success(),
        "kz admin should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "switched to context dev-admin"
    );
    assert!(fs::read_to_string(&kubeconfig)
        .unwrap()
        .contains("current-context: dev-admin"));
}

#[test]
fn test_failure_exits_one_with_message_on_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let kubeconfig = write_kubeconfig(temp_dir.path());

    let output = run_kz(temp_dir.path(), &["--kubeconfig", &kubeconfig, "staging"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert_eq!(
        String::from_utf8_lossy(&output.stderr).trim(),
        "no contexts matched query 'staging'"
    );
    assert_eq!(fs::read_to_string(&kubeconfig).unwrap(), KUBECONFIG_YAML);
}

#[test]
fn test_tracked_file_defaults_to_home() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_kz(temp_dir.path(), &["ns", "add", "web", "db"]);

    assert!(output.status.success());
    let tracked = fs::read_to_string(temp_dir.path().join("home").join(".kz.yml")).unwrap();
    assert!(tracked.contains("- web"));
    assert!(tracked.contains("- db"));

    let output = run_kz(temp_dir.path(), &["namespace", "list"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "web\ndb");
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let kubeconfig = write_kubeconfig(temp_dir.path());

    let output = run_kz(
        temp_dir.path(),
        &["--verbose", "--kubeconfig", &kubeconfig, "prod"],
    );

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "switched to context prod"
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("Switched context"));
}

#[test]
fn test_version_flag() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_kz(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(kz::VERSION));
}
