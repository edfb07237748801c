//! Settings struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. Variables in the primary source (process environment or fixed map)
//! 2. Variables from the env file, if one was layered in
//! 3. Built-in defaults
//!
//! Every field has a default, so loading only fails on values that cannot
//! be coerced. Such failures are meant to stop the process at startup.

use std::borrow::Cow;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

use crate::constants::{
    APP_NAME, DEFAULT_CLOUD_PROVIDER, DEFAULT_DATABASE_URL, DEFAULT_DEBUG, DEFAULT_HOST,
    DEFAULT_PORT, ENV_CLOUD_PROVIDER, ENV_DATABASE_URL, ENV_DEBUG, ENV_HOST, ENV_PORT,
};
use crate::env::Env;

/// Errors during settings loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {var} value {value:?}: expected a port number between 0 and 65535")]
    InvalidPort {
        var: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("{var} is set but is not valid UTF-8")]
    NotUnicode { var: String },

    #[error("failed to load env file {path}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
}

/// Resolved application settings.
///
/// Fields are private: once loaded, a `Settings` value is never changed.
/// Share it by reference or behind an `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    app_name: String,
    debug: bool,
    host: String,
    port: u16,
    database_url: String,
    cloud_provider: String,
}

impl Settings {
    /// Load settings from the given environment source.
    pub fn load(env: &Env) -> Result<Self, ConfigError> {
        let debug = parse_bool(&env.var_or(ENV_DEBUG, DEFAULT_DEBUG)?);
        let port = parse_port(ENV_PORT, &env.var_or(ENV_PORT, DEFAULT_PORT)?)?;

        let settings = Self {
            app_name: APP_NAME.to_string(),
            debug,
            host: env.var_or(ENV_HOST, DEFAULT_HOST)?,
            port,
            database_url: env.var_or(ENV_DATABASE_URL, DEFAULT_DATABASE_URL)?,
            cloud_provider: env.var_or(ENV_CLOUD_PROVIDER, DEFAULT_CLOUD_PROVIDER)?,
        };

        tracing::debug!(
            debug = settings.debug,
            host = %settings.host,
            port = settings.port,
            database_url = %settings.redacted_database_url(),
            cloud_provider = %settings.cloud_provider,
            "settings loaded"
        );

        Ok(settings)
    }

    /// Load settings from the process environment with `path` layered
    /// underneath it. A missing file is ignored.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        let env = Env::real().with_env_file(path)?;
        Self::load(&env)
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Connection string for the storage backend, unredacted.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn cloud_provider(&self) -> &str {
        &self.cloud_provider
    }

    /// Production mode is anything that isn't debug mode.
    pub fn is_production(&self) -> bool {
        !self.debug
    }

    /// `host:port` string for a server to bind to. IPv6 literals are
    /// bracketed.
    pub fn bind_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// The database URL with any password in its userinfo masked.
    pub fn redacted_database_url(&self) -> Cow<'_, str> {
        redact_url_password(&self.database_url)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("app_name", &self.app_name)
            .field("debug", &self.debug)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.redacted_database_url())
            .field("cloud_provider", &self.cloud_provider)
            .finish()
    }
}

impl Serialize for Settings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Settings", 8)?;
        state.serialize_field("app_name", &self.app_name)?;
        state.serialize_field("debug", &self.debug)?;
        state.serialize_field("host", &self.host)?;
        state.serialize_field("port", &self.port)?;
        state.serialize_field("database_url", &self.redacted_database_url())?;
        state.serialize_field("cloud_provider", &self.cloud_provider)?;
        state.serialize_field("is_production", &self.is_production())?;
        state.serialize_field("bind_addr", &self.bind_addr())?;
        state.end()
    }
}

/// Only a case-insensitive `"true"` is true. Whitespace is not trimmed.
fn parse_bool(raw: &str) -> bool {
    raw.to_lowercase() == "true"
}

fn parse_port(var: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|source| ConfigError::InvalidPort {
            var,
            value: raw.to_string(),
            source,
        })
}

fn redact_url_password(url: &str) -> Cow<'_, str> {
    let Some(scheme_end) = url.find("://") else {
        return Cow::Borrowed(url);
    };
    let authority_start = scheme_end + 3;
    let rest = &url[authority_start..];
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());

    let Some(at) = rest[..authority_end].rfind('@') else {
        return Cow::Borrowed(url);
    };
    let userinfo = &rest[..at];
    let Some(colon) = userinfo.find(':') else {
        return Cow::Borrowed(url);
    };

    Cow::Owned(format!(
        "{}{}:****{}",
        &url[..authority_start],
        &userinfo[..colon],
        &rest[at..],
    ))
}
