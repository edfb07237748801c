//! Settings loading and coercion.
//!
//! Resolves the application's settings from an [`Env`](crate::env::Env)
//! source, applying built-in defaults and converting raw strings into
//! typed values.

pub mod loader;

pub use loader::{ConfigError, Settings};
