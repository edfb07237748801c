//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Tests use [`Env::fixed()`] backed by a `HashMap`, eliminating the need for
//! `unsafe` calls to [`std::env::set_var`] / [`std::env::remove_var`].
//!
//! An env file can be layered underneath either source with
//! [`Env::with_env_file()`]. File values only fill gaps: a variable already
//! present in the primary source always wins.
//!
//! `${VAR}` references inside an env file are expanded by `dotenvy` against
//! the real process environment, even when the primary source is
//! [`Env::fixed()`].

use std::collections::HashMap;
use std::env::VarError;
use std::ffi::OsString;
use std::path::Path;

use crate::config::ConfigError;

/// Environment variable reader.
///
/// Wraps lookups so that production code hits `std::env` while tests
/// can supply a controlled set of values.
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, OsString>>,
    file_vars: HashMap<String, String>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self {
            overrides: None,
            file_vars: HashMap::new(),
        }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    ///
    /// Values are `OsString`s so a fixed source can hold non-UTF-8 data,
    /// just like the process environment.
    pub fn fixed(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<OsString>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            file_vars: HashMap::new(),
        }
    }

    /// Layer a dotenv-format file underneath this source.
    ///
    /// A missing file leaves the source unchanged. The process environment
    /// is never modified. When a key repeats, the last assignment wins.
    ///
    /// `${VAR}` substitution reads the real process environment (then
    /// earlier lines of the file), not this source's fixed values.
    pub fn with_env_file(mut self, path: &Path) -> Result<Self, ConfigError> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => {
                tracing::debug!(path = %path.display(), "no env file, skipping");
                return Ok(self);
            }
            Err(e) => {
                return Err(ConfigError::EnvFile {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        for item in iter {
            let (key, value) = item.map_err(|e| ConfigError::EnvFile {
                path: path.to_path_buf(),
                source: e,
            })?;
            self.file_vars.insert(key, value);
        }

        tracing::debug!(
            path = %path.display(),
            count = self.file_vars.len(),
            "loaded env file"
        );
        Ok(self)
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Result<String, VarError> {
        let primary = match &self.overrides {
            Some(map) => match map.get(name) {
                Some(value) => value.clone().into_string().map_err(VarError::NotUnicode),
                None => Err(VarError::NotPresent),
            },
            None => std::env::var(name),
        };
        match primary {
            Err(VarError::NotPresent) => self
                .file_vars
                .get(name)
                .cloned()
                .ok_or(VarError::NotPresent),
            other => other,
        }
    }

    /// Look up a variable, falling back to `default` only when it is absent.
    ///
    /// A variable that is present but not valid UTF-8 is an error, never a
    /// silent default.
    pub fn var_or(&self, name: &str, default: &str) -> Result<String, ConfigError> {
        match self.var(name) {
            Ok(value) => Ok(value),
            Err(VarError::NotPresent) => Ok(default.to_string()),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
                var: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_env_file(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn real_env_reads_cargo_manifest_dir() {
        let env = Env::real();
        assert!(env.var("CARGO_MANIFEST_DIR").is_ok());
    }

    #[test]
    fn fixed_env_returns_set_values() {
        let env = Env::fixed([("FOO", "bar"), ("BAZ", "qux")]);
        assert_eq!(env.var("FOO").unwrap(), "bar");
        assert_eq!(env.var("BAZ").unwrap(), "qux");
    }

    #[test]
    fn fixed_env_returns_not_present_for_missing() {
        let env = Env::fixed(Vec::<(&str, &str)>::new());
        assert!(matches!(env.var("NONEXISTENT"), Err(VarError::NotPresent)));
    }

    #[test]
    fn var_or_uses_default_only_when_absent() {
        let env = Env::fixed([("EMPTY", "")]);
        assert_eq!(env.var_or("EMPTY", "fallback").unwrap(), "");
        assert_eq!(env.var_or("ABSENT", "fallback").unwrap(), "fallback");
    }

    #[cfg(unix)]
    #[test]
    fn var_or_rejects_non_unicode_values() {
        use std::os::unix::ffi::OsStringExt;

        let env = Env::fixed([("PORT", OsString::from_vec(b"80\xff".to_vec()))]);
        assert!(matches!(env.var("PORT"), Err(VarError::NotUnicode(_))));
        match env.var_or("PORT", "8000") {
            Err(ConfigError::NotUnicode { var }) => assert_eq!(var, "PORT"),
            other => panic!("expected NotUnicode error, got {other:?}"),
        }
    }

    #[test]
    fn env_file_fills_missing_values() {
        let (_dir, path) = write_env_file("HOST=127.0.0.1\nPORT=9000\n");
        let env = Env::fixed([("PORT", "7000")]).with_env_file(&path).unwrap();
        assert_eq!(env.var("HOST").unwrap(), "127.0.0.1");
        assert_eq!(env.var("PORT").unwrap(), "7000");
    }

    #[test]
    fn env_file_handles_comments_and_quotes() {
        let (_dir, path) = write_env_file(
            "# deployment settings\nDATABASE_URL=\"postgres://db/app\"\nCLOUD_PROVIDER='aws'\n",
        );
        let env = Env::fixed(Vec::<(&str, &str)>::new())
            .with_env_file(&path)
            .unwrap();
        assert_eq!(env.var("DATABASE_URL").unwrap(), "postgres://db/app");
        assert_eq!(env.var("CLOUD_PROVIDER").unwrap(), "aws");
    }

    #[test]
    fn missing_env_file_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let env = Env::fixed([("HOST", "localhost")])
            .with_env_file(&dir.path().join("absent.env"))
            .unwrap();
        assert_eq!(env.var("HOST").unwrap(), "localhost");
        assert!(matches!(env.var("PORT"), Err(VarError::NotPresent)));
    }

    #[test]
    fn malformed_env_file_is_an_error() {
        let (_dir, path) = write_env_file("THIS IS NOT VALID\n");
        let result = Env::fixed(Vec::<(&str, &str)>::new()).with_env_file(&path);
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile { .. }));
        assert!(err.to_string().contains("env file"));
        // The parser's message belongs to the source chain, not the top level.
        assert!(!err.to_string().contains("parsing line"));
    }

    #[test]
    fn repeated_keys_keep_last_value() {
        let (_dir, path) = write_env_file("PORT=1111\nPORT=2222\n");
        let env = Env::fixed(Vec::<(&str, &str)>::new())
            .with_env_file(&path)
            .unwrap();
        assert_eq!(env.var("PORT").unwrap(), "2222");
    }

    #[test]
    fn env_file_substitution_reads_process_environment() {
        let (_dir, path) = write_env_file("ROOT=${CARGO_MANIFEST_DIR}\n");
        let env = Env::fixed(Vec::<(&str, &str)>::new())
            .with_env_file(&path)
            .unwrap();
        assert_eq!(
            env.var("ROOT").unwrap(),
            std::env::var("CARGO_MANIFEST_DIR").unwrap()
        );
    }
}
