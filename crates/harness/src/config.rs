// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration, read from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use helpfultests_compare::ComparisonPolicy;

/// Per-test deadline when the file does not set one.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("timeout_ms must be greater than zero")]
    InvalidTimeout,
}

/// Top-level harness configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Deadline for each test, in milliseconds (default: 1000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Render the report as HTML for emailing it
    #[serde(default, alias = "email")]
    pub use_html: bool,

    /// Directory `read_file` resolves against (default: ".")
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Append every test record to this JSONL file
    #[serde(default)]
    pub results_file: Option<PathBuf>,

    /// Default policy for output assertions
    #[serde(default)]
    pub comparison: ComparisonPolicy,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            use_html: false,
            base_dir: default_base_dir(),
            results_file: None,
            comparison: ComparisonPolicy::default(),
        }
    }
}

impl HarnessConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
