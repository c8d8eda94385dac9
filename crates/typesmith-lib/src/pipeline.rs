//! The server typings step: configuration, module set, generation, output.

use std::path::{Path, PathBuf};

use tracing::info;
use typesmith_core::to_host_path;

use crate::config::{ConfigError, ProjectConfig};
use crate::engine::{
    ExternalType, GenerateError, GenerationEngine, NamespaceScope, TypingsEngine,
};
use crate::loader::{DefaultLoader, LoadedModule, ModuleLoader};
use crate::resolve::{ModuleSetResolver, ResolveError};
use crate::self_modules::self_modules;
use crate::sync::{ExtensionFilter, OutputEncoding, OutputSynchronizer, SyncError, SyncReport};

/// Output directory when the configuration names none.
pub const DEFAULT_OUT_DIR: &str = "Imports/ServerTypings";

/// Files owned by the step inside the output directory.
pub const TYPINGS_FILTER: &str = "*.ts";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("typings generation failed: {0}")]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// A validated run, ready to execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRun {
    pub project_dir: PathBuf,
    pub out_dir: PathBuf,
    pub modules: Vec<String>,
    pub scope: NamespaceScope,
}

#[derive(Debug)]
pub struct RunSummary {
    pub out_dir: PathBuf,
    /// Directory of the first configured module.
    pub base_dir: PathBuf,
    pub module_count: usize,
    pub self_module_count: usize,
    pub report: SyncReport,
}

/// Generates server typings for a project.
pub struct ServerTypings<L = DefaultLoader, E = TypingsEngine> {
    loader: L,
    engine: E,
    self_modules: Vec<LoadedModule>,
    encoding: OutputEncoding,
}

impl ServerTypings {
    pub fn new() -> Self {
        Self::with_parts(DefaultLoader::default(), TypingsEngine::new())
    }
}

impl Default for ServerTypings {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ModuleLoader, E: GenerationEngine> ServerTypings<L, E> {
    pub fn with_parts(loader: L, engine: E) -> Self {
        Self {
            loader,
            engine,
            self_modules: self_modules(),
            encoding: OutputEncoding::default(),
        }
    }

    /// Replace the built-in self modules.
    pub fn self_modules(mut self, modules: Vec<LoadedModule>) -> Self {
        self.self_modules = modules;
        self
    }

    pub fn encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Load and validate the configuration next to `project_file`.
    ///
    /// Nothing is loaded or written yet.
    pub fn prepare(&self, project_file: &Path) -> Result<PreparedRun, ConfigError> {
        let project_dir = match project_file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let settings = ProjectConfig::load(&project_dir)?.server_typings()?;
        let out_dir = project_dir.join(to_host_path(
            settings.out_dir.as_deref().unwrap_or(DEFAULT_OUT_DIR),
        ));

        Ok(PreparedRun {
            project_dir,
            out_dir,
            modules: settings.modules,
            scope: NamespaceScope::new(settings.root_namespace),
        })
    }

    /// Resolve modules, generate and synchronize the output directory.
    ///
    /// Fails before touching the output directory if any module cannot be
    /// loaded or generation fails.
    pub fn execute(
        &self,
        run: &PreparedRun,
        external_types: &[ExternalType],
    ) -> Result<RunSummary, PipelineError> {
        let resolution =
            ModuleSetResolver::new(&self.loader).resolve(&run.modules, &self.self_modules)?;

        let units = self
            .engine
            .generate(&resolution.modules, &run.scope, external_types)?;
        info!(units = units.len(), "generated output units");

        let filter = ExtensionFilter::from_pattern(TYPINGS_FILTER);
        let report = OutputSynchronizer::new(self.encoding).sync(&run.out_dir, &units, &filter)?;
        info!(
            written = report.written.len(),
            unchanged = report.unchanged.len(),
            deleted = report.deleted.len(),
            "synchronized output directory"
        );

        Ok(RunSummary {
            out_dir: run.out_dir.clone(),
            base_dir: resolution.base_dir,
            module_count: resolution.modules.len(),
            self_module_count: resolution.modules.self_modules().len(),
            report,
        })
    }

    pub fn run(
        &self,
        project_file: &Path,
        external_types: &[ExternalType],
    ) -> Result<RunSummary, PipelineError> {
        let run = self.prepare(project_file)?;
        self.execute(&run, external_types)
    }
}
