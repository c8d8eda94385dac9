//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("typesmith")
        .about("TypeScript typings for server-side types")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(server_typings_command())
        .subcommand(dump_command())
        .subcommand(self_modules_command())
}

/// Generate server typings for a project.
pub fn server_typings_command() -> Command {
    Command::new("server-typings")
        .about("Generate TypeScript typings from the project's modules")
        .after_help(
            r#"EXAMPLES:
  typesmith server-typings MyApp/MyApp.csproj
  typesmith server-typings MyApp/MyApp.csproj --external-types external.json
  TYPESMITH_LOG=debug typesmith server-typings MyApp/MyApp.csproj"#,
        )
        .arg(project_arg())
        .arg(external_types_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Show the contents of a module file.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the types recorded in a module file")
        .arg(module_path_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// List the built-in self modules.
pub fn self_modules_command() -> Command {
    Command::new("self-modules")
        .about("List the framework modules included in every run")
        .arg(color_arg())
}
