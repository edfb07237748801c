//! App-wide constants.
//!
//! Centralises the application name, environment variable names, and the
//! built-in defaults so a rename only requires changing this file.

/// Crate version, as reported by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display name of the configured application.
pub const APP_NAME: &str = "FastAPI Cloud Deployment";

/// Env file read from the working directory when no other path is given.
pub const ENV_FILENAME: &str = ".env";

/// Log target prefix used to build the default tracing filter.
pub const LOG_TARGET: &str = "cloud_settings";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_DEBUG: &str = "DEBUG";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_CLOUD_PROVIDER: &str = "CLOUD_PROVIDER";

// ── Defaults (raw strings, coerced like real values) ────────────────

pub const DEFAULT_DEBUG: &str = "False";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "8000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite:///./test.db";
pub const DEFAULT_CLOUD_PROVIDER: &str = "local";
