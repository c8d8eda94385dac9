//! Loading through a disposable, memory-mapped context.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use typesmith_module::{EnumerationError, Module, ModuleError, TypeInfo};

use super::{LoadError, LoadedModule, ModuleId, ModuleLoader, ModuleOrigin};

#[cfg(test)]
thread_local! {
    static LIVE_CONTEXTS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// A module file mapped for the duration of one load.
///
/// Types are enumerated into owned values while the context is alive;
/// dropping the context unmaps the file.
#[derive(Debug)]
pub struct LoadContext {
    path: PathBuf,
    module: Module,
}

impl LoadContext {
    pub fn open(path: &Path) -> Result<Self, ModuleError> {
        let module = Module::map_path(path)?;
        #[cfg(test)]
        LIVE_CONTEXTS.with(|live| live.set(live.get() + 1));
        trace!(path = %path.display(), "opened load context");
        Ok(Self {
            path: path.to_path_buf(),
            module,
        })
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn enumerate(&self) -> Result<Vec<TypeInfo>, EnumerationError> {
        self.module.enumerate_types()
    }

    /// Contexts currently open on this thread.
    #[cfg(test)]
    pub(crate) fn live() -> usize {
        LIVE_CONTEXTS.with(std::cell::Cell::get)
    }
}

impl Drop for LoadContext {
    fn drop(&mut self) {
        #[cfg(test)]
        LIVE_CONTEXTS.with(|live| live.set(live.get().saturating_sub(1)));
        trace!(path = %self.path.display(), "released load context");
    }
}

/// Loads each module in its own [`LoadContext`]. Nothing is cached.
#[derive(Clone, Copy, Debug, Default)]
pub struct IsolatedLoader;

impl IsolatedLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ModuleLoader for IsolatedLoader {
    fn load(&self, path: &Path) -> Result<LoadedModule, LoadError> {
        let context = LoadContext::open(path).map_err(|e| LoadError::load(path, e))?;
        let id = ModuleId::of(context.module());
        let types = context
            .enumerate()
            .map_err(|e| LoadError::enumeration(path, &e))?;
        drop(context);

        debug!(
            path = %path.display(),
            module = %id,
            types = types.len(),
            "loaded module"
        );
        Ok(LoadedModule::new(
            id,
            ModuleOrigin::File(path.to_path_buf()),
            types,
        ))
    }
}
