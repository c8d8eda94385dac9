#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Server typings generation.
//!
//! The pipeline reads `typesmith.json`, loads the configured module files
//! next to the framework's own modules, hands the merged set to a
//! [`GenerationEngine`] and mirrors the generated files into the output
//! directory:
//!
//! ```text
//! config -> ModuleSetResolver -> GenerationEngine -> OutputSynchronizer
//! ```

pub mod config;
pub mod engine;
pub mod loader;
pub mod pipeline;
pub mod resolve;
pub mod self_modules;
pub mod sync;

#[cfg(test)]
mod loader_tests;
#[cfg(test)]
mod self_modules_tests;
#[cfg(test)]
mod sync_tests;
#[cfg(test)]
mod test_utils;

pub use config::{ConfigError, ProjectConfig};
pub use engine::{
    ExternalType, GenerateError, GenerationEngine, NamespaceScope, OutputUnits, TypingsEngine,
};
pub use loader::{DefaultLoader, LoadError, LoadedModule, ModuleId, ModuleLoader};
pub use pipeline::{
    DEFAULT_OUT_DIR, PipelineError, PreparedRun, RunSummary, ServerTypings, TYPINGS_FILTER,
};
pub use resolve::{ModuleSet, ModuleSetResolver, Resolution, ResolveError};
pub use self_modules::{SELF_MODULES, self_modules};
pub use sync::{ExtensionFilter, OutputEncoding, SyncError, SyncReport, sync};
pub use typesmith_core::Colors;
