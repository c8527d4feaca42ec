// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI configuration file.
//!
//! Lookup order: `--config`, `$SPECDOC_CONFIG`, `./specdoc.toml`,
//! `<config dir>/specdoc/config.toml`. A file named explicitly must exist;
//! the implicit locations are skipped when absent. With no file at all the
//! defaults apply.

use serde::Deserialize;
use specdoc_migrate::{MigrationConfig, UnversionedPolicy};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name looked up in the working directory.
pub const LOCAL_FILE: &str = "specdoc.toml";

/// Default tracing filter when neither SPECDOC_LOG nor `log` is set.
pub const DEFAULT_LOG: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Policy for documents without `metadata.schema_version`.
    pub unversioned: UnversionedPolicy,
    /// Rotate `.bak` copies before overwriting a document.
    pub backup: bool,
    /// Tracing filter directive.
    pub log: Option<String>,
    /// File the configuration was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unversioned: UnversionedPolicy::default(),
            backup: true,
            log: None,
            source: None,
        }
    }
}

/// Where a config file may come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named by flag or environment; must exist.
    Explicit(PathBuf),
    /// Found in a default location.
    Discovered(PathBuf),
    /// No file; use defaults.
    Defaults,
}

impl Config {
    /// Load configuration from the first matching location.
    pub fn load(flag: Option<&Path>) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let explicit = flag
            .map(Path::to_path_buf)
            .or_else(crate::env::config_path);
        match locate(explicit, &cwd, dirs::config_dir()) {
            ConfigSource::Explicit(path) | ConfigSource::Discovered(path) => Self::from_path(&path),
            ConfigSource::Defaults => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Core runner settings.
    pub fn migration(&self) -> MigrationConfig {
        MigrationConfig::default().with_unversioned(self.unversioned)
    }

    /// Tracing filter: SPECDOC_LOG, then `log`, then [`DEFAULT_LOG`].
    pub fn log_filter(&self) -> String {
        crate::env::log_filter()
            .or_else(|| self.log.clone())
            .unwrap_or_else(|| DEFAULT_LOG.to_string())
    }
}

/// Resolve which config file to read.
///
/// `explicit` wins even when it does not exist, so a typo is reported
/// rather than silently ignored.
pub fn locate(explicit: Option<PathBuf>, cwd: &Path, config_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path);
    }
    let local = cwd.join(LOCAL_FILE);
    if local.is_file() {
        return ConfigSource::Discovered(local);
    }
    if let Some(global) = config_dir.map(|d| d.join("specdoc").join("config.toml")) {
        if global.is_file() {
            return ConfigSource::Discovered(global);
        }
    }
    ConfigSource::Defaults
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
