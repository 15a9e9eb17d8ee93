//! Integration tests for tracked namespaces and synced contexts.

use super::test_utils::{Fixture, ScriptedSelector, KUBECONFIG_YAML};
use kz::cli::{Commands, CtxCommands, NsCommands};
use kz::error::KzError;

fn ns(fixture: &Fixture, command: NsCommands) -> Result<String, KzError> {
    fixture.context(ScriptedSelector::never()).execute(
        Some(&Commands::Ns {
            command: Some(command),
            query: None,
        }),
        &[],
    )
}

fn ctx(fixture: &Fixture, command: CtxCommands) -> Result<String, KzError> {
    fixture.context(ScriptedSelector::never()).execute(
        Some(&Commands::Ctx {
            command: Some(command),
            query: None,
        }),
        &[],
    )
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_ns_list_without_tracked_file() {
    let fixture = Fixture::new(KUBECONFIG_YAML);

    assert_eq!(ns(&fixture, NsCommands::List).unwrap(), "no namespaces available");
    assert!(!fixture.tracked().exists());
}

#[test]
fn test_ns_add_is_idempotent_and_ordered() {
    let fixture = Fixture::new(KUBECONFIG_YAML);

    let output = ns(&fixture, NsCommands::Add { names: names(&["web", "db"]) }).unwrap();
    assert_eq!(output, "namespace(s) web, db added");
    ns(&fixture, NsCommands::Add { names: names(&["db", "cache", "web"]) }).unwrap();

    assert_eq!(ns(&fixture, NsCommands::List).unwrap(), "web\ndb\ncache");
}

#[test]
fn test_ns_delete_ignores_unknown_names() {
    let fixture = Fixture::new(KUBECONFIG_YAML);
    fixture.write_tracked("namespaces:\n- web\n- db\n- cache\n");

    let output = ns(&fixture, NsCommands::Delete { names: names(&["db", "missing"]) }).unwrap();

    assert_eq!(output, "namespace(s) db, missing deleted");
    assert_eq!(ns(&fixture, NsCommands::List).unwrap(), "web\ncache");
}

#[test]
fn test_ns_add_requires_names() {
    let fixture = Fixture::new(KUBECONFIG_YAML);

    let err = ns(&fixture, NsCommands::Add { names: Vec::new() }).unwrap_err();
    assert_eq!(err.to_string(), "no namespaces provided");

    let err = ns(&fixture, NsCommands::Delete { names: Vec::new() }).unwrap_err();
    assert!(matches!(err, KzError::Validation(_)));
    assert!(!fixture.tracked().exists());
}

#[test]
fn test_ctx_sync_records_kubeconfig_contexts() {
    let fixture = Fixture::new(KUBECONFIG_YAML);
    fixture.write_tracked("namespaces:\n- web\n");

    assert_eq!(ctx(&fixture, CtxCommands::Sync).unwrap(), "3 contexts synced");
    assert_eq!(ctx(&fixture, CtxCommands::List).unwrap(), "dev\ndev-admin\nprod");
    assert_eq!(ns(&fixture, NsCommands::List).unwrap(), "web");
}

#[test]
fn test_ctx_sync_does_not_touch_kubeconfig() {
    let fixture = Fixture::new(KUBECONFIG_YAML);

    ctx(&fixture, CtxCommands::Sync).unwrap();

    assert_eq!(fixture.read_kubeconfig(), KUBECONFIG_YAML);
    assert!(fixture.read_tracked().contains("dev-admin"));
}

#[test]
fn test_ctx_list_before_sync() {
    let fixture = Fixture::new(KUBECONFIG_YAML);

    assert_eq!(ctx(&fixture, CtxCommands::List).unwrap(), "no contexts available");
}
