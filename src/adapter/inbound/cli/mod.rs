//! CLI module graph and command dispatch.

pub mod analyze;
pub mod command;
pub mod config;
pub mod output;
pub mod parts;
pub mod report;

use std::path::Path;

use self::command::{Cli, Commands, ConfigCommand};
use self::output::OutputMode;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Apply global flags and run the selected command.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(OutputMode::new(cli.json, cli.quiet, cli.verbose, &cli.color));

    match cli.command {
        Commands::Analyze(args) => analyze::execute(&args).await,
        Commands::Parts(arg) => parts::execute(&arg.config),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(arg)) => config::execute_show(&arg.config),
        Commands::Config(ConfigCommand::Validate(arg)) => config::execute_validate(&arg.config),
    }
}

/// Load the config at `path`, falling back to defaults when it does not exist.
#[allow(clippy::result_large_err)]
pub(crate) fn load_config(path: &Path) -> Result<Config> {
    Config::load_or_default(path)
}

/// Start logging, raising the level for each `-v`.
pub(crate) fn init_logging(config: &Config) {
    match output::verbosity() {
        0 => config.init_logging(),
        1 => config.logging.init_with_level("debug"),
        _ => config.logging.init_with_level("trace"),
    }
}
