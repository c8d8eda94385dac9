//! Heap loading with a shared module space.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use typesmith_module::Module;

use super::{LoadError, LoadedModule, ModuleId, ModuleLoader, ModuleOrigin};

/// Modules loaded so far, keyed by canonical path.
///
/// Entries are never evicted.
#[derive(Debug, Default)]
pub struct ModuleSpace {
    modules: RefCell<HashMap<PathBuf, LoadedModule>>,
}

impl ModuleSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<LoadedModule> {
        self.modules.borrow().get(path).cloned()
    }

    fn insert(&self, path: PathBuf, module: LoadedModule) {
        self.modules.borrow_mut().insert(path, module);
    }

    pub fn len(&self) -> usize {
        self.modules.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.borrow().is_empty()
    }
}

/// Reads module files into memory and keeps them in a [`ModuleSpace`].
#[derive(Debug, Default)]
pub struct StaticLoader {
    space: ModuleSpace,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn space(&self) -> &ModuleSpace {
        &self.space
    }
}

impl ModuleLoader for StaticLoader {
    fn load(&self, path: &Path) -> Result<LoadedModule, LoadError> {
        let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if let Some(module) = self.space.get(&key) {
            debug!(path = %key.display(), "module already loaded");
            return Ok(module);
        }

        let module = Module::from_path(&key).map_err(|e| LoadError::load(path, e))?;
        let types = module
            .enumerate_types()
            .map_err(|e| LoadError::enumeration(path, &e))?;
        let origin = ModuleOrigin::File(key.clone());
        let loaded = LoadedModule::new(ModuleId::of(&module), origin, types);

        debug!(
            path = %key.display(),
            module = %loaded.id(),
            types = loaded.types().len(),
            "loaded module"
        );
        self.space.insert(key, loaded.clone());
        Ok(loaded)
    }
}
