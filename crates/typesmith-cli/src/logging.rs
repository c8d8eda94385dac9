//! Diagnostic logging to stderr.
//!
//! `TYPESMITH_LOG` takes an `EnvFilter` directive and wins over `-v`.

use tracing_subscriber::EnvFilter;

use crate::cli::ColorChoice;

pub const LOG_ENV: &str = "TYPESMITH_LOG";

/// Level for a `-v` count: warn, info, debug, trace.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init(verbosity: u8, color: ColorChoice) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color.should_colorize_stderr())
        .with_target(false)
        .try_init();
}
