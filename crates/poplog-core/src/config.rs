//! Logger options and runtime environment

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Maximum size of a log file before it is rotated (5 MiB)
pub const MAX_LOG_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Options supplied once at startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoggerOptions {
    /// Base name for logger ids and log files
    #[serde(default)]
    pub name: String,

    /// Directory holding the log files
    #[serde(default, alias = "log_dir")]
    pub log_dir: PathBuf,

    /// Colorized, aligned console output
    #[serde(default)]
    pub pretty: bool,
}

impl LoggerOptions {
    pub fn new(name: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            log_dir: log_dir.into(),
            pretty: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::MissingName);
        }
        if self.log_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingLogDir);
        }
        Ok(())
    }
}

/// Deployment environment, resolved once at startup
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// All output suppressed
    Test,
    /// Verbose HTTP logging, request/response bodies captured
    Development,
    #[default]
    Production,
}

impl Environment {
    /// Variables consulted by [`Environment::from_env`], in order
    pub const VARS: [&'static str; 2] = ["APP_ENV", "NODE_ENV"];

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "test" => Self::Test,
            "development" | "dev" => Self::Development,
            _ => Self::Production,
        }
    }

    pub fn from_env() -> Self {
        Self::VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn is_test(&self) -> bool {
        matches!(self, Self::Test)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}
