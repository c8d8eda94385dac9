mod cli;
mod commands;
mod logging;

use cli::{DumpParams, SelfModulesParams, ServerTypingsParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("server-typings", m)) => {
            let params = ServerTypingsParams::from_matches(m);
            logging::init(params.verbose, params.color);
            commands::server_typings::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            logging::init(params.verbose, params.color);
            commands::dump::run(params.into());
        }
        Some(("self-modules", m)) => {
            let params = SelfModulesParams::from_matches(m);
            commands::self_modules::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
