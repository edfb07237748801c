//! CLI command definitions and output rendering.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use anyhow::Result;
use colored::Colorize;

use cloud_settings::config::Settings;

/// Short description shown in `--help`.
pub const ABOUT: &str = "Resolve and inspect environment-driven service settings.";

/// Render settings as a JSON object. `reveal` swaps in the raw database URL.
pub fn render_json(settings: &Settings, reveal: bool) -> Result<String> {
    let mut value = serde_json::to_value(settings)?;
    if reveal {
        value["database_url"] = serde_json::Value::from(settings.database_url());
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Print settings as an aligned, coloured table.
pub fn print_table(settings: &Settings, reveal: bool) {
    let database_url = if reveal {
        settings.database_url().to_string()
    } else {
        settings.redacted_database_url().into_owned()
    };
    let mode = if settings.is_production() {
        "production".green()
    } else {
        "debug".yellow()
    };

    println!("{}", settings.app_name().bold());
    println!("  {}           {}", "mode:".cyan(), mode);
    println!("  {}           {}", "host:".cyan(), settings.host());
    println!("  {}           {}", "port:".cyan(), settings.port());
    println!("  {}           {}", "bind:".cyan(), settings.bind_addr());
    println!("  {}   {}", "database_url:".cyan(), database_url);
    println!("  {} {}", "cloud_provider:".cyan(), settings.cloud_provider());
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloud_settings::env::Env;

    fn settings_with_password() -> Settings {
        Settings::load(&Env::fixed([(
            "DATABASE_URL",
            "postgres://app:topsecret@db:5432/app",
        )]))
        .unwrap()
    }

    #[test]
    fn json_masks_password_by_default() {
        let rendered = render_json(&settings_with_password(), false).unwrap();
        assert!(!rendered.contains("topsecret"));
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["database_url"], "postgres://app:****@db:5432/app");
        assert_eq!(value["is_production"], true);
    }

    #[test]
    fn json_reveal_shows_password() {
        let rendered = render_json(&settings_with_password(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["database_url"], "postgres://app:topsecret@db:5432/app");
    }

    #[test]
    fn print_table_does_not_panic() {
        print_table(&settings_with_password(), false);
        print_table(&settings_with_password(), true);
    }
}
