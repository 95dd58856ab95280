//! Command-line interface definitions.
//!
//! Defines the CLI structure for kitfab using `clap`: analyzing fabricators
//! from an inventory, listing part prices, and managing configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::infrastructure::config::settings::DEFAULT_CONFIG_PATH;

/// Killstreak kit fabricator profitability analyzer
#[derive(Parser, Debug)]
#[command(name = "kitfab")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the kitfab CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze fabricators from an inventory or by name
    Analyze(AnalyzeArgs),

    /// List the configured part prices
    Parts(ConfigPathArg),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `kitfab config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Path to write the configuration file.
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `analyze` subcommand.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Steam ID whose inventory is read (defaults to the configured account).
    #[arg(long = "steam-id", visible_alias = "uid")]
    pub steam_id: Option<String>,

    /// Selection: 0 for all, N for the Nth fabricator, 00 for a custom name.
    #[arg(short = 'c', long)]
    pub choice: Option<String>,

    /// Fabricator name to analyze without reading an inventory.
    #[arg(short = 'f', long)]
    pub fabricator: Option<String>,

    /// Fabricators analyzed at once (overrides config).
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Only list profitable fabricators in the batch summary.
    #[arg(long)]
    pub profitable_only: bool,

    /// Path to the configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}
