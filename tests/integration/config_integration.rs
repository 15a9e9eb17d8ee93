//! Integration tests for config loading and file location resolution.

use super::test_utils::{with_home_env, ScriptedSelector, KUBECONFIG_YAML};
use kz::cli::RunContext;
use kz::config::{ConfigLoader, KzConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_locations_under_home() {
    let test_dir = TempDir::new().unwrap();

    with_home_env(test_dir.path(), |home| {
        let context = RunContext::with_selector(
            ConfigLoader::load(None).unwrap(),
            None,
            Box::new(ScriptedSelector::never()),
        )
        .unwrap();

        assert_eq!(context.kubeconfig_path(), home.join(".kube").join("config"));
        assert_eq!(context.tracked_path(), home.join(".kz.yml"));
    });
}

#[test]
fn test_kubeconfig_env_and_flag() {
    let test_dir = TempDir::new().unwrap();
    let from_env = test_dir.path().join("env-kubeconfig");
    let from_flag = test_dir.path().join("flag-kubeconfig");

    with_home_env(test_dir.path(), |_| {
        std::env::set_var("KUBECONFIG", &from_env);

        let context = RunContext::with_selector(
            KzConfig::default(),
            None,
            Box::new(ScriptedSelector::never()),
        )
        .unwrap();
        assert_eq!(context.kubeconfig_path(), from_env.as_path());

        let context = RunContext::with_selector(
            KzConfig::default(),
            Some(&from_flag),
            Box::new(ScriptedSelector::never()),
        )
        .unwrap();
        assert_eq!(context.kubeconfig_path(), from_flag.as_path());
    });
}

#[test]
fn test_global_config_file_redirects_files() {
    let test_dir = TempDir::new().unwrap();
    let kubeconfig = test_dir.path().join("team-kubeconfig");
    let tracked = test_dir.path().join("team-kz.yml");
    fs::write(&kubeconfig, KUBECONFIG_YAML).unwrap();

    let config_dir = test_dir.path().join("config").join("kz");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        format!(
            "[kube]\nconfig_path = {:?}\n\n[tracked]\npath = {:?}\n",
            kubeconfig.to_string_lossy(),
            tracked.to_string_lossy()
        ),
    )
    .unwrap();

    with_home_env(test_dir.path(), |_| {
        let context = RunContext::new(None, None).unwrap();

        assert_eq!(context.kubeconfig_path(), kubeconfig.as_path());
        assert_eq!(context.tracked_path(), tracked.as_path());
    });
}

#[test]
fn test_invalid_explicit_config_fails_run_context() {
    let test_dir = TempDir::new().unwrap();
    let explicit = test_dir.path().join("kz.toml");
    fs::write(&explicit, "[logging]\nformat = \"yaml\"\n").unwrap();

    with_home_env(test_dir.path(), |_| {
        let err = RunContext::new(None, Some(explicit.clone()))
            .err()
            .expect("invalid logging format should be rejected");
        assert!(err.to_string().contains("Invalid log format"));
    });
}
