//! Typing generation.
//!
//! A [`GenerationEngine`] turns the module set into named text buffers.
//! The pipeline forwards its inputs unchanged and writes its output as is.

mod typescript;

#[cfg(test)]
mod typescript_tests;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::resolve::ModuleSet;

pub use typescript::{TypingsEngine, ts_type_name};

/// Output file name to generated text, in generation order.
pub type OutputUnits = IndexMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("type '{0}' has no usable output file name")]
    InvalidFileName(String),
    #[error("{0}")]
    Engine(String),
}

/// Generates typings for a module set.
pub trait GenerationEngine {
    fn generate(
        &self,
        modules: &ModuleSet,
        scope: &NamespaceScope,
        external_types: &[ExternalType],
    ) -> Result<OutputUnits, GenerateError>;
}

/// Root namespace of the caller's project.
///
/// Types in the root namespace or below it are owned by the project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceScope {
    root: String,
}

impl NamespaceScope {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into().trim().to_string(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn owns(&self, namespace: &str) -> bool {
        if self.root.is_empty() {
            return true;
        }
        namespace == self.root
            || namespace
                .strip_prefix(self.root.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
    }

    /// `full_name` with the root prefix removed, if it is in scope.
    pub fn relative<'n>(&self, full_name: &'n str) -> Option<&'n str> {
        if self.root.is_empty() {
            return Some(full_name);
        }
        full_name
            .strip_prefix(self.root.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
    }
}

/// A type known to the caller but absent from every module.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExternalType {
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(default)]
    pub fields: Vec<ExternalField>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExternalField {
    pub name: String,
    #[serde(rename = "Type")]
    pub type_name: String,
}

impl ExternalType {
    pub fn new(namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn full_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{ns}.{}", self.name),
            _ => self.name.clone(),
        }
    }
}
