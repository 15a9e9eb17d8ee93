//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::config::{paths, ConfigLoader, KzConfig};
use crate::error::KzError;
use crate::kubeconfig::{FileKubeConfig, KubeConfigStore};
use crate::release::GithubGateway;
use crate::selector::{Selector, TerminalSelector};
use crate::switch::SwitchEngine;
use crate::tracked::{FileTrackedStore, TrackedSettings, TrackedStore};
use crate::update::{release_arch, UpdateEngine};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cli::parse::{Commands, CtxCommands, NsCommands};
use crate::cli::presentation::format_name_list;

/// Runtime context for CLI execution: resolved file locations, config and the selector.
pub struct RunContext {
    kube: FileKubeConfig,
    tracked: FileTrackedStore,
    selector: Box<dyn Selector>,
    config: KzConfig,
}

impl RunContext {
    /// Create run context from the optional `--kubeconfig` and `--config` flags.
    pub fn new(kubeconfig: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self, KzError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Self::with_selector(config, kubeconfig.as_deref(), Box::new(TerminalSelector))
    }

    /// Create run context from an already loaded config and a custom selector.
    pub fn with_selector(
        config: KzConfig,
        kubeconfig: Option<&Path>,
        selector: Box<dyn Selector>,
    ) -> Result<Self, KzError> {
        let kube_path = paths::kubeconfig_path(kubeconfig, &config)?;
        let tracked_path = paths::tracked_path(&config)?;
        debug!(
            kubeconfig = %kube_path.display(),
            tracked = %tracked_path.display(),
            "Resolved file locations"
        );

        Ok(Self {
            kube: FileKubeConfig::new(kube_path),
            tracked: FileTrackedStore::new(tracked_path),
            selector,
            config,
        })
    }

    pub fn kubeconfig_path(&self) -> &Path {
        self.kube.path()
    }

    pub fn tracked_path(&self) -> &Path {
        self.tracked.path()
    }

    fn engine(&self) -> SwitchEngine<'_> {
        SwitchEngine::new(&self.kube, &self.tracked, self.selector.as_ref())
    }

    /// Execute a CLI command via the single route table. `args` are the root
    /// positionals, used when no subcommand is given.
    pub fn execute(&self, command: Option<&Commands>, args: &[String]) -> Result<String, KzError> {
        match command {
            None => self.engine().switch_from_args(args).map(|o| o.to_string()),
            Some(Commands::Ctx {
                command: Some(command),
                ..
            }) => self.handle_ctx_command(command),
            Some(Commands::Ctx { command: None, query }) => self
                .engine()
                .switch_context(query.as_deref().unwrap_or(""))
                .map(|o| o.to_string()),
            Some(Commands::Ns {
                command: Some(command),
                ..
            }) => self.handle_ns_command(command),
            Some(Commands::Ns { command: None, query }) => self
                .engine()
                .switch_namespace(query.as_deref().unwrap_or(""))
                .map(|o| o.to_string()),
            Some(Commands::Update) => self.handle_update(),
        }
    }

    fn handle_ctx_command(&self, command: &CtxCommands) -> Result<String, KzError> {
        match command {
            CtxCommands::Sync => self.handle_ctx_sync(),
            CtxCommands::List => {
                let settings = self.tracked.load()?;
                Ok(format_name_list(&settings.contexts, "no contexts available"))
            }
        }
    }

    fn handle_ctx_sync(&self) -> Result<String, KzError> {
        let document = self.kube.load()?;
        let mut settings = self.tracked.load()?;
        settings.contexts = document.context_names();
        self.tracked.save(&settings)?;

        info!(count = settings.contexts.len(), "Synced contexts");
        Ok(format!("{} contexts synced", settings.contexts.len()))
    }

    fn handle_ns_command(&self, command: &NsCommands) -> Result<String, KzError> {
        match command {
            NsCommands::Add { names } => {
                self.update_namespaces(names, |settings| settings.add_namespaces(names))?;
                Ok(format!("namespace(s) {} added", names.join(", ")))
            }
            NsCommands::Delete { names } => {
                self.update_namespaces(names, |settings| settings.delete_namespaces(names))?;
                Ok(format!("namespace(s) {} deleted", names.join(", ")))
            }
            NsCommands::List => {
                let settings = self.tracked.load()?;
                Ok(format_name_list(&settings.namespaces, "no namespaces available"))
            }
        }
    }

    fn update_namespaces<F>(&self, names: &[String], apply: F) -> Result<(), KzError>
    where
        F: FnOnce(&mut TrackedSettings),
    {
        if names.is_empty() {
            return Err(KzError::Validation("no namespaces provided".to_string()));
        }
        let mut settings = self.tracked.load()?;
        apply(&mut settings);
        self.tracked.save(&settings)?;
        Ok(())
    }

    fn handle_update(&self) -> Result<String, KzError> {
        let settings = &self.config.update;
        let gateway = GithubGateway::new(
            settings.api_base_url.as_str(),
            settings.repository.as_str(),
            settings.timeout(),
        )?;

        let current = std::env::current_exe().map_err(|e| {
            KzError::Replace(format!("failed to locate current executable: {}", e))
        })?;
        let current = std::fs::canonicalize(&current).unwrap_or(current);
        let engine = UpdateEngine::new(&gateway, release_arch(), current)
            .with_executable_name(settings.executable_name.as_str());

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| KzError::Gateway(format!("Failed to create runtime: {}", e)))?;
        let outcome = rt.block_on(engine.update_from(crate::VERSION))?;
        Ok(outcome.to_string())
    }
}

