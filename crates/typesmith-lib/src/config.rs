//! Project configuration (`typesmith.json`).

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "typesmith.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("couldn't read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("couldn't parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("ServerTypings is not configured in typesmith.json")]
    MissingServerTypings,
    #[error("ServerTypings has no modules configured in typesmith.json")]
    NoModules,
    #[error("RootNamespace is not configured in typesmith.json")]
    MissingRootNamespace,
}

/// Parsed `typesmith.json`. Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectConfig {
    pub root_namespace: Option<String>,
    pub server_typings: Option<ServerTypingsConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerTypingsConfig {
    /// Module file paths, `/`-separated.
    #[serde(default)]
    pub modules: Vec<String>,
    pub out_dir: Option<String>,
}

/// Settings the server typings step needs, all present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerTypingsSettings {
    pub root_namespace: String,
    pub modules: Vec<String>,
    /// Trimmed, `None` when blank.
    pub out_dir: Option<String>,
}

impl ProjectConfig {
    /// Read `typesmith.json` from `project_dir`.
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let path = project_dir.join(CONFIG_FILE_NAME);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound { path });
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Check the server typings preconditions, in order: section present,
    /// at least one module, root namespace set.
    pub fn server_typings(&self) -> Result<ServerTypingsSettings, ConfigError> {
        let section = self
            .server_typings
            .as_ref()
            .ok_or(ConfigError::MissingServerTypings)?;
        if section.modules.is_empty() {
            return Err(ConfigError::NoModules);
        }
        let root_namespace = self
            .root_namespace
            .as_deref()
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
            .ok_or(ConfigError::MissingRootNamespace)?;

        Ok(ServerTypingsSettings {
            root_namespace: root_namespace.to_string(),
            modules: section.modules.clone(),
            out_dir: section
                .out_dir
                .as_deref()
                .map(str::trim)
                .filter(|dir| !dir.is_empty())
                .map(str::to_string),
        })
    }
}
