// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration file
//!
//! Every section is optional. Relative paths are resolved against the
//! directory holding the config file.

use recon_engine::ControllerConfig;
use recon_storage::InformerConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid schedule {name}: {reason}")]
    Schedule { name: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the lock file; no lock is taken when unset
    pub state_dir: Option<PathBuf>,
    /// Log file; logs go to stderr when unset
    pub log_path: Option<PathBuf>,
    pub controller: ControllerConfig,
    pub informer: InformerConfig,
    pub schedule: Vec<ScheduleConfig>,
}

/// A workflow submitted on a fixed interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    pub name: String,
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    pub manifest: PathBuf,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// `name=value` overrides for the workflow's arguments
    #[serde(default)]
    pub parameters: Vec<String>,
}

fn default_namespace() -> String {
    "default".to_string()
}

impl Config {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse and validate config text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for entry in &self.schedule {
            let invalid = |reason: &str| ConfigError::Schedule {
                name: entry.name.clone(),
                reason: reason.to_string(),
            };
            if entry.name.is_empty() {
                return Err(invalid("name is empty"));
            }
            if !names.insert(entry.name.as_str()) {
                return Err(invalid("name is used twice"));
            }
            if entry.interval.is_zero() {
                return Err(invalid("interval must be positive"));
            }
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        if let Some(dir) = self.state_dir.as_mut() {
            resolve(dir);
        }
        if let Some(log) = self.log_path.as_mut() {
            resolve(log);
        }
        for entry in &mut self.schedule {
            resolve(&mut entry.manifest);
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
