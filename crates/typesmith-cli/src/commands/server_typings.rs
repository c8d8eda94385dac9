use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use typesmith_lib::{Colors, ExternalType, RunSummary, ServerTypings};

pub struct ServerTypingsArgs {
    pub project: PathBuf,
    pub external_types: Option<PathBuf>,
    pub color: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ExternalTypesError {
    #[error("couldn't read external types from {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("couldn't parse external types in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn run(args: ServerTypingsArgs) {
    let external_types = match &args.external_types {
        Some(path) => load_external_types(path).unwrap_or_else(|e| fail(e)),
        None => Vec::new(),
    };
    tracing::debug!(count = external_types.len(), "external types");

    let pipeline = ServerTypings::new();
    let prepared = pipeline.prepare(&args.project).unwrap_or_else(|e| fail(e));

    let c = Colors::new(args.color);
    println!(
        "{}Transforming server typings at: {}{}",
        c.cyan,
        prepared.out_dir.display(),
        c.reset
    );

    let summary = pipeline
        .execute(&prepared, &external_types)
        .unwrap_or_else(|e| fail(e));
    print!("{}", render_summary(&summary, c));
}

/// Read a JSON array of external type descriptors.
pub fn load_external_types(path: &Path) -> Result<Vec<ExternalType>, ExternalTypesError> {
    let text = std::fs::read_to_string(path).map_err(|source| ExternalTypesError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ExternalTypesError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn render_summary(summary: &RunSummary, c: Colors) -> String {
    let mut out = String::new();
    for name in &summary.report.written {
        out.push_str(&format!("  {}wrote{} {name}\n", c.green, c.reset));
    }
    for name in &summary.report.deleted {
        out.push_str(&format!("  {}removed{} {name}\n", c.dim, c.reset));
    }
    out.push_str(&format!(
        "{}{} modules ({} self), {} written, {} unchanged, {} removed{}\n",
        c.dim,
        summary.module_count,
        summary.self_module_count,
        summary.report.written.len(),
        summary.report.unchanged.len(),
        summary.report.deleted.len(),
        c.reset
    ));
    out
}

fn fail(err: impl Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
