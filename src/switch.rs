//! Context and namespace switching.
//!
//! Each entry point follows the same shape: resolve the partial query against
//! the known names, ask the selector when the query is ambiguous, apply a single
//! mutation to the kubeconfig and save it once. Nothing is written unless every
//! step before the save succeeded.

use crate::error::KzError;
use crate::kubeconfig::{AccessDocument, KubeConfigStore};
use crate::matcher::matching;
use crate::selector::Selector;
use crate::tracked::TrackedStore;
use std::fmt;
use tracing::{debug, info, instrument};

/// Placeholder context query meaning "keep the current context".
pub const KEEP_CURRENT_CONTEXT: &str = "-";

const CONTEXT_PROMPT: &str = "Please select a context";
const NAMESPACE_PROMPT: &str = "Please select a namespace";

/// What a successful switch changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    Context(String),
    Namespace(String),
    ContextAndNamespace { context: String, namespace: String },
}

impl fmt::Display for SwitchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchOutcome::Context(context) => write!(f, "switched to context {}", context),
            SwitchOutcome::Namespace(namespace) => write!(f, "switched to namespace {}", namespace),
            SwitchOutcome::ContextAndNamespace { context, namespace } => {
                write!(f, "switched to context {}, namespace {}", context, namespace)
            }
        }
    }
}

/// Resolves partial names and persists the resulting kubeconfig change.
pub struct SwitchEngine<'a> {
    kube: &'a dyn KubeConfigStore,
    tracked: &'a dyn TrackedStore,
    selector: &'a dyn Selector,
}

impl<'a> SwitchEngine<'a> {
    pub fn new(
        kube: &'a dyn KubeConfigStore,
        tracked: &'a dyn TrackedStore,
        selector: &'a dyn Selector,
    ) -> Self {
        Self {
            kube,
            tracked,
            selector,
        }
    }

    /// Root command dispatch over positional arguments.
    ///
    /// No arguments is an error, one argument switches context, two or more
    /// switch context and namespace (honoring the `-` placeholder).
    pub fn switch_from_args<S: AsRef<str>>(&self, args: &[S]) -> Result<SwitchOutcome, KzError> {
        match args {
            [] => Err(KzError::Validation("context name query is required".to_string())),
            [context] => self.switch_context(context.as_ref()),
            [context, namespace, ..] => {
                self.switch_context_and_namespace(context.as_ref(), namespace.as_ref())
            }
        }
    }

    /// Switch the current context to the one matching `query`.
    #[instrument(skip(self))]
    pub fn switch_context(&self, query: &str) -> Result<SwitchOutcome, KzError> {
        require_query(query, "context name query is required")?;

        let mut document = self.kube.load()?;
        let context = self.resolve_context(&document, query)?;

        document.set_current_context(&context)?;
        self.kube.save(&document)?;

        info!(context = %context, "Switched context");
        Ok(SwitchOutcome::Context(context))
    }

    /// Switch the namespace of the current context.
    ///
    /// A query matching no tracked namespace is used verbatim.
    #[instrument(skip(self))]
    pub fn switch_namespace(&self, query: &str) -> Result<SwitchOutcome, KzError> {
        require_query(query, "namespace name query is required")?;

        let mut document = self.kube.load()?;
        let namespace = self.resolve_namespace(query)?;

        document.set_namespace_of_current_context(&namespace)?;
        self.kube.save(&document)?;

        info!(namespace = %namespace, "Switched namespace");
        Ok(SwitchOutcome::Namespace(namespace))
    }

    /// Switch context and namespace together with a single save.
    ///
    /// A context query of `-` leaves the context alone and only switches the
    /// namespace.
    #[instrument(skip(self))]
    pub fn switch_context_and_namespace(
        &self,
        context_query: &str,
        namespace_query: &str,
    ) -> Result<SwitchOutcome, KzError> {
        if context_query == KEEP_CURRENT_CONTEXT {
            return self.switch_namespace(namespace_query);
        }

        require_query(context_query, "context name query is required")?;
        require_query(namespace_query, "namespace name query is required")?;

        let mut document = self.kube.load()?;
        let context = self.resolve_context(&document, context_query)?;
        let namespace = self.resolve_namespace(namespace_query)?;

        document.set_context_and_namespace(&context, &namespace)?;
        self.kube.save(&document)?;

        info!(context = %context, namespace = %namespace, "Switched context and namespace");
        Ok(SwitchOutcome::ContextAndNamespace { context, namespace })
    }

    /// Strict: a query matching no context is an error.
    fn resolve_context(&self, document: &AccessDocument, query: &str) -> Result<String, KzError> {
        let candidates = matching(query, &document.context_names());
        debug!(query, candidates = candidates.len(), "Resolved context candidates");

        match candidates.len() {
            0 => Err(KzError::NoMatch(query.to_string())),
            1 => Ok(candidates.into_iter().next().unwrap_or_default()),
            _ => self.selector.present_choices(CONTEXT_PROMPT, &candidates),
        }
    }

    /// Lenient: a query matching no tracked namespace resolves to itself.
    fn resolve_namespace(&self, query: &str) -> Result<String, KzError> {
        let candidates = self.tracked.load()?.namespaces_matching(query);
        debug!(query, candidates = candidates.len(), "Resolved namespace candidates");

        match candidates.len() {
            0 => Ok(query.to_string()),
            1 => Ok(candidates.into_iter().next().unwrap_or_default()),
            _ => self.selector.present_choices(NAMESPACE_PROMPT, &candidates),
        }
    }
}

fn require_query(query: &str, message: &str) -> Result<(), KzError> {
    if query.is_empty() {
        return Err(KzError::Validation(message.to_string()));
    }
    Ok(())
}
