//! Output directory synchronization.
//!
//! Writes output units that differ from what is on disk and removes stale
//! files of the generated type. Everything else in the directory is left
//! alone.
//!
//! Output is flat: unit names are plain file names, so every file a sync
//! writes is one the next sync can reconcile.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::engine::OutputUnits;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// How output text is encoded on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputEncoding {
    /// UTF-8 with a byte-order mark.
    #[default]
    Utf8Bom,
    Utf8,
}

impl OutputEncoding {
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8Bom => {
                let mut bytes = Vec::with_capacity(UTF8_BOM.len() + text.len());
                bytes.extend_from_slice(UTF8_BOM);
                bytes.extend_from_slice(text.as_bytes());
                bytes
            }
            Self::Utf8 => text.as_bytes().to_vec(),
        }
    }
}

/// Selects files by extension, from a `*.ext` pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffix: String,
}

impl ExtensionFilter {
    /// `"*.ts"` and `"ts"` both select `.ts` files.
    pub fn from_pattern(pattern: &str) -> Self {
        let ext = pattern.trim_start_matches('*').trim_start_matches('.');
        Self {
            suffix: format!(".{ext}"),
        }
    }

    /// Case-sensitive. A bare `.ts` does not match.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.len() > self.suffix.len() && file_name.ends_with(&self.suffix)
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

/// What a sync did, by file name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub written: Vec<String>,
    pub unchanged: Vec<String>,
    pub deleted: Vec<String>,
}

impl SyncReport {
    pub fn is_noop(&self) -> bool {
        self.written.is_empty() && self.deleted.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("invalid output file name {0:?}: must be a plain file name")]
    InvalidName(String),
    #[error("couldn't create output directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("couldn't list output directory {}: {source}", .path.display())]
    ReadDir { path: PathBuf, source: io::Error },
    #[error("couldn't write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("couldn't remove stale file {}: {source}", .path.display())]
    Remove { path: PathBuf, source: io::Error },
}

/// Writes output units into a directory it owns for the run.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutputSynchronizer {
    encoding: OutputEncoding,
}

impl OutputSynchronizer {
    pub fn new(encoding: OutputEncoding) -> Self {
        Self { encoding }
    }

    pub fn sync(
        &self,
        dir: &Path,
        units: &OutputUnits,
        filter: &ExtensionFilter,
    ) -> Result<SyncReport, SyncError> {
        if let Some(name) = units.keys().find(|name| !is_plain_file_name(name)) {
            return Err(SyncError::InvalidName(name.clone()));
        }
        fs::create_dir_all(dir).map_err(|source| SyncError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut report = SyncReport::default();
        for (name, text) in units {
            let path = dir.join(name);
            let bytes = self.encoding.encode(text);
            if fs::read(&path).is_ok_and(|existing| existing == bytes) {
                report.unchanged.push(name.clone());
                continue;
            }
            write_file(&path, &bytes)?;
            debug!(file = %name, "wrote output file");
            report.written.push(name.clone());
        }

        let keep: HashSet<&str> = units.keys().map(String::as_str).collect();
        report.deleted = remove_stale(dir, &keep, filter)?;
        Ok(report)
    }
}

/// Sync with the default encoding.
pub fn sync(
    dir: &Path,
    units: &OutputUnits,
    filter: &ExtensionFilter,
) -> Result<SyncReport, SyncError> {
    OutputSynchronizer::default().sync(dir, units, filter)
}

/// A single normal path component with no separator of either style.
fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), SyncError> {
    fs::write(path, bytes).map_err(|source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Delete matching top-level files not in `keep`. Returns sorted names.
fn remove_stale(
    dir: &Path,
    keep: &HashSet<&str>,
    filter: &ExtensionFilter,
) -> Result<Vec<String>, SyncError> {
    let read_err = |source| SyncError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut stale = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if !entry.file_type().map_err(read_err)?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if filter.matches(&name) && !keep.contains(name.as_str()) {
            stale.push(name);
        }
    }
    stale.sort();

    for name in &stale {
        let path = dir.join(name);
        fs::remove_file(&path).map_err(|source| SyncError::Remove { path, source })?;
        debug!(file = %name, "removed stale output file");
    }
    Ok(stale)
}
