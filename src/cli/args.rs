//! Clap argument types.

use clap::Parser;
use std::path::PathBuf;

/// Resolve and inspect environment-driven service settings.
#[derive(Parser, Debug)]
#[command(
    name = "cloud-settings",
    version = cloud_settings::constants::VERSION,
    about = super::ABOUT,
)]
pub struct Cli {
    /// Env file layered under the process environment.
    #[arg(long, global = true, default_value = cloud_settings::constants::ENV_FILENAME)]
    pub env_file: PathBuf,

    /// Do not read any env file.
    #[arg(long, global = true, default_value_t = false, conflicts_with = "env_file")]
    pub no_env_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The env file to load, if any.
    pub fn env_file(&self) -> Option<&PathBuf> {
        (!self.no_env_file).then_some(&self.env_file)
    }
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Print the resolved settings.
    Show(ShowArgs),

    /// Load the settings and report whether they are valid.
    Check,
}

/// Arguments for the `show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Print a single JSON object instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Print the database URL without masking its password.
    #[arg(long, default_value_t = false)]
    pub reveal: bool,
}
