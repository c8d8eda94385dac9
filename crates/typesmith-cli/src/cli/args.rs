//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Project file whose directory holds `typesmith.json` (positional).
pub fn project_arg() -> Arg {
    Arg::new("project")
        .value_name("PROJECT")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Project file; typesmith.json is read from its directory")
}

/// Module file to inspect (positional).
pub fn module_path_arg() -> Arg {
    Arg::new("module_path")
        .value_name("MODULE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Module file (.tsmd)")
}

/// JSON list of external type descriptors (--external-types).
pub fn external_types_arg() -> Arg {
    Arg::new("external_types")
        .long("external-types")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON file listing types known outside the modules")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Log more (-v info, -vv debug, -vvv trace)")
}
