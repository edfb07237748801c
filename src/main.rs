//! cloud-settings — resolve and inspect service settings.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use cloud_settings::config::Settings;
use cloud_settings::env::Env;
use cloud_settings::logging;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Command, ShowArgs};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    logging::init(&settings);
    tracing::debug!(
        app = settings.app_name(),
        production = settings.is_production(),
        "configuration ready"
    );

    match cli.command {
        Command::Show(args) => run_show(&settings, &args),
        Command::Check => run_check(&settings),
    }
}

/// Build the settings once for the whole process.
fn load_settings(cli: &Cli) -> Result<Settings> {
    let _bootstrap = logging::init_bootstrap();

    let mut env = Env::real();
    if let Some(path) = cli.env_file() {
        env = env.with_env_file(path)?;
    }

    Settings::load(&env).context("invalid configuration")
}

/// Print the resolved settings.
fn run_show(settings: &Settings, args: &ShowArgs) -> Result<()> {
    if args.json {
        println!("{}", cli::render_json(settings, args.reveal)?);
    } else {
        cli::print_table(settings, args.reveal);
    }
    Ok(())
}

/// Report that the settings loaded cleanly. Failures never reach here:
/// they surface from `load_settings` and exit non-zero.
fn run_check(settings: &Settings) -> Result<()> {
    use colored::Colorize;

    let mode = if settings.is_production() {
        "production"
    } else {
        "debug"
    };
    println!(
        "  {} configuration is valid ({mode}, binding {})",
        "✔".green().bold(),
        settings.bind_addr(),
    );
    Ok(())
}
