//! Module loading.
//!
//! A [`ModuleLoader`] turns a module file into a [`LoadedModule`]: an owned,
//! fully enumerated snapshot of the module's public types. Two strategies
//! exist:
//!
//! - [`StaticLoader`] reads the file into the heap and keeps every loaded
//!   module in a [`ModuleSpace`] for the loader's lifetime.
//! - [`IsolatedLoader`] maps the file inside a disposable [`LoadContext`]
//!   that is released as soon as enumeration finishes.
//!
//! [`DefaultLoader`] picks one at compile time through the `isolated-load`
//! feature.

mod isolated;
mod static_load;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;
use typesmith_module::{EnumerationError, Module, ModuleError, TypeInfo};

pub use isolated::{IsolatedLoader, LoadContext};
pub use static_load::{ModuleSpace, StaticLoader};

/// Loader selected by the `isolated-load` feature.
#[cfg(feature = "isolated-load")]
pub type DefaultLoader = IsolatedLoader;

/// Loader selected by the `isolated-load` feature.
#[cfg(not(feature = "isolated-load"))]
pub type DefaultLoader = StaticLoader;

/// Loads module files.
///
/// Callers check that `path` exists first.
pub trait ModuleLoader {
    fn load(&self, path: &Path) -> Result<LoadedModule, LoadError>;
}

/// Module identity: two loads with the same id are the same module.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId {
    pub name: String,
    pub version: u32,
}

impl ModuleId {
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    pub fn of(module: &Module) -> Self {
        Self::new(module.name(), module.version())
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.name, self.version)
    }
}

/// Where a module came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleOrigin {
    File(PathBuf),
    /// Compiled into the tool.
    Builtin,
}

#[derive(Debug)]
struct ModuleData {
    id: ModuleId,
    origin: ModuleOrigin,
    types: Vec<TypeInfo>,
}

/// Handle to a loaded module. Clones share the same data.
#[derive(Clone, Debug)]
pub struct LoadedModule(Arc<ModuleData>);

impl LoadedModule {
    /// Wrap enumerated types. Non-public types are dropped.
    pub fn new(id: ModuleId, origin: ModuleOrigin, types: Vec<TypeInfo>) -> Self {
        let types = types.into_iter().filter(|ty| ty.public).collect();
        Self(Arc::new(ModuleData { id, origin, types }))
    }

    pub fn id(&self) -> &ModuleId {
        &self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.id.name
    }

    pub fn origin(&self) -> &ModuleOrigin {
        &self.0.origin
    }

    pub fn is_builtin(&self) -> bool {
        self.0.origin == ModuleOrigin::Builtin
    }

    /// Public types in module order.
    pub fn types(&self) -> &[TypeInfo] {
        &self.0.types
    }

    /// Whether both handles point at the same loaded data.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Module load failure. Always fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Some type entries could not be listed; the module is unusable.
    #[error(
        "couldn't list types in module file {}:\n{}",
        .path.display(),
        .causes.join("\n")
    )]
    Enumeration { path: PathBuf, causes: Vec<String> },
    #[error("couldn't load module file {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ModuleError,
    },
}

impl LoadError {
    /// Collect the distinct failure messages, in first-seen order.
    pub fn enumeration(path: &Path, err: &EnumerationError) -> Self {
        let causes: IndexSet<String> = err.failures.iter().map(ToString::to_string).collect();
        Self::Enumeration {
            path: path.to_path_buf(),
            causes: causes.into_iter().collect(),
        }
    }

    pub fn load(path: &Path, source: ModuleError) -> Self {
        Self::Load {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Enumeration { path, .. } | Self::Load { path, .. } => path,
        }
    }
}
