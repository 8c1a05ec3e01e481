//! Server configuration, read from the environment after `.env` is loaded

use std::net::SocketAddr;
use std::path::PathBuf;

use poplog_core::{Environment, LoggerOptions};

pub const DEFAULT_NAME: &str = "poplog";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub name: String,
    pub log_dir: PathBuf,
    pub pretty: bool,
    pub environment: Environment,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            pretty: true,
            environment: Environment::default(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `APP_NAME`, `LOG_DIR`, `LOG_PRETTY`, `PORT`, plus `APP_ENV`/`NODE_ENV`
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", port, e))?,
            None => defaults.port,
        };

        let environment = Environment::VARS
            .iter()
            .find_map(|key| lookup(key))
            .map(|value| Environment::parse(&value))
            .unwrap_or(defaults.environment);

        Ok(Self {
            name: lookup("APP_NAME").unwrap_or(defaults.name),
            log_dir: lookup("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            pretty: lookup("LOG_PRETTY")
                .map(|value| parse_flag(&value))
                .unwrap_or(defaults.pretty),
            environment,
            port,
        })
    }

    pub fn logger_options(&self) -> LoggerOptions {
        LoggerOptions::new(self.name.clone(), self.log_dir.clone()).with_pretty(self.pretty)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
