//! Logging service
//!
//! Owns the factory plus the two loggers installed at startup: the
//! general-purpose `<name>-app` logger and the `<name>-http` logger.

use std::sync::Arc;

use tracing_subscriber::util::TryInitError;

use poplog_core::{
    install_global, route_panics_to, ConfigError, Environment, LoggerFactory, LoggerInstance,
    LoggerOptions,
};

use crate::middleware::HttpLogger;

/// Logger suffix for the general-purpose logger
pub const APP_SUFFIX: &str = "app";

/// Which logger to hand out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerKind {
    Http,
    App,
}

impl LoggerKind {
    /// Case-insensitive: `http` and `logger`. Anything else is `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_uppercase().as_str() {
            "HTTP" => Some(Self::Http),
            "LOGGER" => Some(Self::App),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum LoggerHandle {
    App(Arc<LoggerInstance>),
    Http(HttpLogger),
}

impl LoggerHandle {
    pub fn logger(&self) -> &Arc<LoggerInstance> {
        match self {
            Self::App(logger) => logger,
            Self::Http(http_logger) => http_logger.logger(),
        }
    }
}

pub struct LoggingService {
    factory: LoggerFactory,
    logger: Arc<LoggerInstance>,
    http_logger: HttpLogger,
}

impl LoggingService {
    /// Validate the options and build both loggers.
    pub fn new(options: LoggerOptions, environment: Environment) -> Result<Self, ConfigError> {
        Ok(Self::from_factory(LoggerFactory::new(options, environment)?))
    }

    pub fn from_factory(factory: LoggerFactory) -> Self {
        let pretty = factory.options().pretty;
        let logger = factory.create_logger_instance(APP_SUFFIX, pretty);
        let http_logger = HttpLogger::new(&factory, pretty);

        Self {
            factory,
            logger,
            http_logger,
        }
    }

    /// The general-purpose logger
    pub fn logger(&self) -> &Arc<LoggerInstance> {
        &self.logger
    }

    pub fn http_logger(&self) -> &HttpLogger {
        &self.http_logger
    }

    pub fn factory(&self) -> &LoggerFactory {
        &self.factory
    }

    /// Dispatch on a string tag; unknown or missing tags give `None`.
    pub fn get_logger(&self, tag: Option<&str>, pretty: bool) -> Option<LoggerHandle> {
        tag.and_then(LoggerKind::parse).map(|kind| self.get(kind, pretty))
    }

    pub fn get(&self, kind: LoggerKind, pretty: bool) -> LoggerHandle {
        match kind {
            LoggerKind::Http => LoggerHandle::Http(HttpLogger::new(&self.factory, pretty)),
            LoggerKind::App => {
                LoggerHandle::App(self.factory.create_logger_instance(APP_SUFFIX, pretty))
            }
        }
    }

    /// Make the general-purpose logger the process-wide `tracing` subscriber
    pub fn install_global(&self) -> Result<(), TryInitError> {
        install_global(self.logger.clone())
    }

    /// Report panics to the app and http log files
    pub fn route_panics(&self) {
        route_panics_to(vec![self.logger.clone(), self.http_logger.logger().clone()]);
    }
}
