//! Builds the module set for a run.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use tracing::{debug, info};
use typesmith_core::to_host_path;

use crate::loader::{LoadError, LoadedModule, ModuleId, ModuleLoader};

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no modules configured")]
    NoModules,
    #[error("module file not found: {}", .path.display())]
    ModuleNotFound { path: PathBuf },
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Ordered, duplicate-free modules: self modules first, then caller modules
/// in configured order.
#[derive(Clone, Debug, Default)]
pub struct ModuleSet {
    modules: Vec<LoadedModule>,
    self_count: usize,
}

impl ModuleSet {
    /// Merge both lists. The first module with a given [`ModuleId`] wins.
    pub fn new(
        self_modules: impl IntoIterator<Item = LoadedModule>,
        caller_modules: impl IntoIterator<Item = LoadedModule>,
    ) -> Self {
        let mut seen: IndexSet<ModuleId> = IndexSet::new();
        let mut modules = Vec::new();

        for module in self_modules {
            if seen.insert(module.id().clone()) {
                modules.push(module);
            }
        }
        let self_count = modules.len();

        for module in caller_modules {
            if seen.insert(module.id().clone()) {
                modules.push(module);
            } else {
                debug!(module = %module.id(), "skipping duplicate module");
            }
        }

        Self {
            modules,
            self_count,
        }
    }

    pub fn self_modules(&self) -> &[LoadedModule] {
        &self.modules[..self.self_count]
    }

    pub fn caller_modules(&self) -> &[LoadedModule] {
        &self.modules[self.self_count..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedModule> {
        self.modules.iter()
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.iter().any(|m| m.id() == id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<'a> IntoIterator for &'a ModuleSet {
    type Item = &'a LoadedModule;
    type IntoIter = std::slice::Iter<'a, LoadedModule>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.iter()
    }
}

/// Result of resolving the configured module paths.
#[derive(Debug)]
pub struct Resolution {
    pub modules: ModuleSet,
    /// Directory of the first configured module.
    pub base_dir: PathBuf,
}

/// Resolves configured module paths through a [`ModuleLoader`].
pub struct ModuleSetResolver<'a, L> {
    loader: &'a L,
}

impl<'a, L: ModuleLoader> ModuleSetResolver<'a, L> {
    pub fn new(loader: &'a L) -> Self {
        Self { loader }
    }

    /// Load every configured path in order and merge with `self_modules`.
    ///
    /// Relative paths are taken from the current directory. Stops at the
    /// first missing or unloadable module.
    pub fn resolve(
        &self,
        paths: &[String],
        self_modules: &[LoadedModule],
    ) -> Result<Resolution, ResolveError> {
        if paths.is_empty() {
            return Err(ResolveError::NoModules);
        }

        let mut caller = Vec::with_capacity(paths.len());
        let mut base_dir = None;
        for raw in paths {
            let path = absolute_module_path(raw)?;
            if !path.is_file() {
                return Err(ResolveError::ModuleNotFound { path });
            }
            if base_dir.is_none() {
                base_dir = Some(path.parent().map(Path::to_path_buf).unwrap_or_default());
            }
            caller.push(self.loader.load(&path)?);
        }

        let modules = ModuleSet::new(self_modules.iter().cloned(), caller);
        info!(
            modules = modules.len(),
            self_modules = modules.self_modules().len(),
            "resolved module set"
        );
        Ok(Resolution {
            modules,
            base_dir: base_dir.unwrap_or_default(),
        })
    }
}

fn absolute_module_path(raw: &str) -> Result<PathBuf, ResolveError> {
    let host = to_host_path(raw);
    std::path::absolute(&host).map_err(|_| ResolveError::ModuleNotFound { path: host })
}
