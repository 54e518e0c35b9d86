// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration file

use lgship_adapters::WatchConfig;
use lgship_core::Severity;
use lgship_engine::ManagerConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no folders to watch")]
    NoFolders,
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Contents of `lgshipd.toml`
///
/// ```toml
/// folders = ["/var/1c/srvinfo/reg_1541"]
/// pool_size = 4
/// bulk_size = 100
/// read_timeout = "1s"
/// poll_interval = "5s"
/// severity = ["E", "W"]
/// journal = "journal.json"
/// output = "events.jsonl"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory trees to watch
    pub folders: Vec<PathBuf>,
    pub pool_size: usize,
    pub bulk_size: usize,
    #[serde(with = "humantime_serde")]
    pub read_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Export files already present at startup
    pub emit_existing: bool,
    pub extensions: Vec<String>,
    /// Severity codes to forward; empty forwards all
    pub severity: Vec<Severity>,
    /// Shared dictionary instead of each file's own `1Cv8.lgf`
    pub metadata: Option<PathBuf>,
    /// Offset journal; offsets are kept in memory when unset
    pub journal: Option<PathBuf>,
    /// JSON-lines output; stdout when unset
    pub output: Option<PathBuf>,
    /// Daemon log; stderr when unset
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let manager = ManagerConfig::default();
        let watch = WatchConfig::default();
        Self {
            folders: Vec::new(),
            pool_size: manager.pool_size,
            bulk_size: manager.bulk_size,
            read_timeout: manager.read_timeout,
            poll_interval: watch.interval,
            emit_existing: watch.emit_existing,
            extensions: watch.extensions,
            severity: Vec::new(),
            metadata: None,
            journal: None,
            output: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Load and validate a config file
    ///
    /// Relative paths inside the file are resolved against its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let mut config = Self::parse(&content)?;
        if let Some(base) = path.parent() {
            config.resolve(base);
        }
        Ok(config)
    }

    /// Parse and validate TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.folders.is_empty() {
            return Err(ConfigError::NoFolders);
        }
        if self.pool_size == 0 {
            return Err(ConfigError::Invalid("pool_size", "must be at least 1".into()));
        }
        if self.bulk_size == 0 {
            return Err(ConfigError::Invalid("bulk_size", "must be at least 1".into()));
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::Invalid("poll_interval", "must be positive".into()));
        }
        if let Some(unknown) = self.severity.iter().find(|s| matches!(s, Severity::Other(_))) {
            return Err(ConfigError::Invalid("severity", format!("unknown code {}", unknown)));
        }
        Ok(())
    }

    fn resolve(&mut self, base: &Path) {
        let join = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        self.folders.iter_mut().for_each(join);
        self.metadata.iter_mut().for_each(join);
        self.journal.iter_mut().for_each(join);
        self.output.iter_mut().for_each(join);
        self.log_file.iter_mut().for_each(join);
    }

    pub fn manager_config(&self) -> ManagerConfig {
        ManagerConfig {
            pool_size: self.pool_size,
            bulk_size: self.bulk_size,
            read_timeout: self.read_timeout,
            allowed_severity: self.severity.clone(),
            metadata_path: self.metadata.clone(),
        }
    }

    pub fn watch_config(&self) -> WatchConfig {
        WatchConfig {
            interval: self.poll_interval,
            extensions: self.extensions.clone(),
            emit_existing: self.emit_existing,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
