//! Shared test utilities for integration tests
//!
//! Fixture directories with a kubeconfig and tracked settings file, a scripted
//! selector, and serialized access to HOME / XDG environment variables.

use kz::cli::RunContext;
use kz::config::KzConfig;
use kz::error::KzError;
use kz::selector::Selector;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize HOME / XDG environment variable access across all tests
static HOME_ENV_MUTEX: Mutex<()> = Mutex::new(());

pub const KUBECONFIG_YAML: &str = r#"apiVersion: v1
clusters:
- cluster:
    server: https://dev.example.com
  name: dev-cluster
contexts:
- context:
    cluster: dev-cluster
    namespace: default
    user: dev-user
  name: dev
- context:
    cluster: dev-cluster
    user: dev-user
  name: dev-admin
- context:
    cluster: prod-cluster
    user: prod-user
  name: prod
current-context: prod
kind: Config
preferences: {}
users:
- name: dev-user
  user:
    token: abc
x-custom-extension: keep-me
"#;

/// Temp directory holding `kubeconfig` and `kz.yml`.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new(kubeconfig: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("kubeconfig"), kubeconfig).unwrap();
        Self { dir }
    }

    pub fn kubeconfig(&self) -> PathBuf {
        self.dir.path().join("kubeconfig")
    }

    pub fn tracked(&self) -> PathBuf {
        self.dir.path().join("kz.yml")
    }

    pub fn write_tracked(&self, yaml: &str) {
        fs::write(self.tracked(), yaml).unwrap();
    }

    pub fn read_kubeconfig(&self) -> String {
        fs::read_to_string(self.kubeconfig()).unwrap()
    }

    pub fn read_tracked(&self) -> String {
        fs::read_to_string(self.tracked()).unwrap()
    }

    /// Load the kubeconfig through the library.
    pub fn document(&self) -> kz::kubeconfig::AccessDocument {
        kz::kubeconfig::load(&self.kubeconfig()).unwrap()
    }

    /// Run context over the fixture files with the given selector.
    pub fn context(&self, selector: ScriptedSelector) -> RunContext {
        let mut config = KzConfig::default();
        config.tracked.path = Some(self.tracked());
        RunContext::with_selector(config, Some(&self.kubeconfig()), Box::new(selector)).unwrap()
    }

    /// Run a root-form invocation (`kz <args...>`).
    pub fn run_root(&self, selector: ScriptedSelector, args: &[&str]) -> Result<String, KzError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.context(selector).execute(None, &args)
    }
}

/// Selector answering with a fixed choice and recording every prompt.
#[derive(Clone, Default)]
pub struct ScriptedSelector {
    answer: Option<String>,
    seen: Rc<RefCell<Vec<(String, Vec<String>)>>>,
}

impl ScriptedSelector {
    /// Selector that fails the test if it is ever asked.
    pub fn never() -> Self {
        Self::default()
    }

    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            seen: Rc::default(),
        }
    }

    pub fn prompts(&self) -> Vec<(String, Vec<String>)> {
        self.seen.borrow().clone()
    }
}

impl Selector for ScriptedSelector {
    fn present_choices(&self, prompt: &str, options: &[String]) -> Result<String, KzError> {
        self.seen
            .borrow_mut()
            .push((prompt.to_string(), options.to_vec()));
        match self.answer {
            Some(ref answer) => Ok(answer.clone()),
            None => panic!("selector should not be invoked, got options {:?}", options),
        }
    }
}

/// Run `f` with HOME pointing at `<test_dir>/home`, XDG_CONFIG_HOME at
/// `<test_dir>/config` and KUBECONFIG unset; the previous values are restored.
pub fn with_home_env<F, R>(test_dir: &Path, f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let _guard = HOME_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

    let keys = ["HOME", "XDG_CONFIG_HOME", "KUBECONFIG"];
    let saved: Vec<_> = keys.iter().map(|k| (*k, std::env::var_os(k))).collect();

    let home = test_dir.join("home");
    fs::create_dir_all(&home).unwrap();
    std::env::set_var("HOME", &home);
    std::env::set_var("XDG_CONFIG_HOME", test_dir.join("config"));
    std::env::remove_var("KUBECONFIG");

    let result = f(&home);

    for (key, value) in saved {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
    result
}
