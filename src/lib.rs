//! cloud-settings — environment-driven settings for cloud-deployed services
//! (library crate).
//!
//! Build one [`Settings`](config::Settings) at process entry and share it by
//! reference:
//!
//! ```no_run
//! use std::path::Path;
//! use cloud_settings::config::Settings;
//! use cloud_settings::env::Env;
//!
//! let env = Env::real().with_env_file(Path::new(".env"))?;
//! let settings = Settings::load(&env)?;
//! println!("binding to {}", settings.bind_addr());
//! # Ok::<(), cloud_settings::config::ConfigError>(())
//! ```

pub mod config;
pub mod constants;
pub mod env;
pub mod logging;
