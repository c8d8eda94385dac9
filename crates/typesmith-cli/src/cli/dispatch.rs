//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::dump::DumpArgs;
use crate::commands::self_modules::SelfModulesArgs;
use crate::commands::server_typings::ServerTypingsArgs;

pub struct ServerTypingsParams {
    pub project: PathBuf,
    pub external_types: Option<PathBuf>,
    pub color: ColorChoice,
    pub verbose: u8,
}

impl ServerTypingsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            project: m
                .get_one::<PathBuf>("project")
                .cloned()
                .expect("clap enforces required PROJECT"),
            external_types: m.get_one::<PathBuf>("external_types").cloned(),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<ServerTypingsParams> for ServerTypingsArgs {
    fn from(p: ServerTypingsParams) -> Self {
        Self {
            project: p.project,
            external_types: p.external_types,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub module_path: PathBuf,
    pub color: ColorChoice,
    pub verbose: u8,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: m
                .get_one::<PathBuf>("module_path")
                .cloned()
                .expect("clap enforces required MODULE"),
            color: parse_color(m),
            verbose: m.get_count("verbose"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            module_path: p.module_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct SelfModulesParams {
    pub color: ColorChoice,
}

impl SelfModulesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            color: parse_color(m),
        }
    }
}

impl From<SelfModulesParams> for SelfModulesArgs {
    fn from(p: SelfModulesParams) -> Self {
        Self {
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
