//! In-memory kubeconfig document.
//!
//! Only the parts kz mutates are typed: the context list, each context's
//! namespace and the current context. Everything else is carried through
//! untouched so a load followed by a save never loses data.

use crate::error::DocumentError;
use crate::persist::null_as_default;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

/// Cluster-access configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessDocument {
    #[serde(
        rename = "apiVersion",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    api_version: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    clusters: Option<Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    contexts: Vec<ContextEntry>,

    #[serde(
        rename = "current-context",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    current_context: Option<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    kind: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    preferences: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    users: Option<Value>,

    #[serde(flatten)]
    extra: Mapping,
}

/// Named context entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: ContextSettings,

    pub name: String,

    #[serde(flatten)]
    extra: Mapping,
}

/// The `context:` body of an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(flatten)]
    extra: Mapping,
}

/// A key that is present keeps its value, explicit `null` included.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|name| !name.is_empty()))
}

impl ContextEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            context: ContextSettings::default(),
            name: name.into(),
            extra: Mapping::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.context.namespace = Some(namespace.into());
        self
    }
}

impl AccessDocument {
    /// Build a document from context entries, e.g. for tests or a fresh file.
    pub fn from_contexts(contexts: Vec<ContextEntry>) -> Self {
        Self {
            contexts,
            ..Self::default()
        }
    }

    /// Parse YAML content. Blank content is an empty document.
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let document: AccessDocument =
            serde_yaml::from_str(content).map_err(|e| e.to_string())?;

        let mut seen = HashSet::new();
        for entry in &document.contexts {
            if !seen.insert(entry.name.as_str()) {
                return Err(format!("duplicate context name '{}'", entry.name));
            }
        }

        if let Some(current) = document.current_context.as_deref() {
            if !document.context_exists(current) {
                tracing::warn!(
                    current_context = current,
                    "current-context does not reference a defined context"
                );
            }
        }

        Ok(document)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Context names in document order.
    pub fn context_names(&self) -> Vec<String> {
        self.contexts.iter().map(|c| c.name.clone()).collect()
    }

    pub fn context_exists(&self, name: &str) -> bool {
        self.contexts.iter().any(|c| c.name == name)
    }

    pub fn current_context(&self) -> Option<&str> {
        self.current_context.as_deref()
    }

    /// Namespace configured for the named context, if any.
    pub fn namespace_of(&self, name: &str) -> Option<&str> {
        self.contexts
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| c.context.namespace.as_deref())
    }

    pub fn set_current_context(&mut self, name: &str) -> Result<(), DocumentError> {
        if !self.context_exists(name) {
            return Err(DocumentError::NotFound(name.to_string()));
        }
        self.current_context = Some(name.to_string());
        Ok(())
    }

    /// Set the namespace of whichever context is current.
    ///
    /// Fails without modifying anything when no current context is set.
    pub fn set_namespace_of_current_context(&mut self, namespace: &str) -> Result<(), DocumentError> {
        let current = self
            .current_context
            .as_deref()
            .ok_or_else(|| DocumentError::NoCurrentContext(namespace.to_string()))?;
        let entry = self
            .contexts
            .iter_mut()
            .find(|c| c.name == current)
            .ok_or_else(|| DocumentError::NotFound(current.to_string()))?;
        entry.context.namespace = Some(namespace.to_string());
        Ok(())
    }

    /// Make `name` current and set its namespace in one step.
    pub fn set_context_and_namespace(&mut self, name: &str, namespace: &str) -> Result<(), DocumentError> {
        let entry = self
            .contexts
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| DocumentError::NotFound(name.to_string()))?;
        entry.context.namespace = Some(namespace.to_string());
        self.current_context = Some(name.to_string());
        Ok(())
    }
}
