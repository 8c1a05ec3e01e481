//! Logger factory
//!
//! Derives transports and named logger instances from [`LoggerOptions`] and
//! keeps a registry so each logger id is built exactly once.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::{Environment, LoggerOptions};
use crate::error::ConfigError;
use crate::format::{Format, PrettyFormatter};
use crate::level::Level;
use crate::logger::LoggerInstance;
use crate::transport::{ConsoleTransport, FileTransport};

pub struct LoggerFactory {
    options: LoggerOptions,
    environment: Environment,
    console: Arc<BoxMakeWriter>,
    registry: DashMap<String, Arc<LoggerInstance>>,
}

impl LoggerFactory {
    /// Create a factory writing console output to stdout.
    pub fn new(options: LoggerOptions, environment: Environment) -> Result<Self, ConfigError> {
        Self::with_console_writer(options, environment, std::io::stdout)
    }

    /// Create a factory with a custom console sink.
    pub fn with_console_writer<W>(
        options: LoggerOptions,
        environment: Environment,
        console: W,
    ) -> Result<Self, ConfigError>
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        debug!(
            name = %options.name,
            log_dir = ?options.log_dir,
            pretty = options.pretty,
            ?environment,
            "Registering logger factory"
        );
        options.validate()?;

        Ok(Self {
            options,
            environment,
            console: Arc::new(BoxMakeWriter::new(console)),
            registry: DashMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.options.name
    }

    pub fn log_dir(&self) -> &Path {
        &self.options.log_dir
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Shared console sink, for transports added after construction
    pub fn console_writer(&self) -> Arc<BoxMakeWriter> {
        self.console.clone()
    }

    /// Logger id for a suffix: `<name>-<suffix>`
    pub fn logger_id(&self, suffix: &str) -> String {
        format!("{}-{}", self.options.name, suffix)
    }

    /// Path of the log file for `file_id`: `<log_dir>/<file_id>.log`
    pub fn log_file_path(&self, file_id: &str) -> PathBuf {
        self.options.log_dir.join(format!("{}.log", file_id))
    }

    /// Console transport named after the base name: the pretty pipeline, or
    /// plain `level: message` lines.
    pub fn console_transport(&self, pretty: bool) -> ConsoleTransport {
        let format = if pretty {
            Format::Pretty(PrettyFormatter::new(&self.options.name))
        } else {
            Format::Plain
        };
        ConsoleTransport::new(&self.options.name, format).with_writer(self.console.clone())
    }

    /// File transport at `<log_dir>/<file_id>.log`: warn and above, 5 MiB cap,
    /// receives panic reports.
    pub fn file_transport(&self, file_id: &str) -> FileTransport {
        let format = Format::Pretty(PrettyFormatter::new(&self.options.name).without_ansi());
        FileTransport::new(self.log_file_path(file_id), format)
    }

    /// Get or build the logger `<name>-<suffix>`.
    ///
    /// An already registered id is returned as is; `pretty` only applies when
    /// the logger is first built.
    pub fn create_logger_instance(&self, suffix: &str, pretty: bool) -> Arc<LoggerInstance> {
        let id = self.logger_id(suffix);

        self.registry
            .entry(id.clone())
            .or_insert_with(|| {
                debug!(logger = %id, pretty, "Creating logger instance");
                let logger = LoggerInstance::new(&id)
                    .silent(self.environment.is_test())
                    .with_level(Level::Debug)
                    .with_transport(self.console_transport(pretty))
                    .with_transport(self.file_transport(&id));
                Arc::new(logger)
            })
            .clone()
    }

    /// A registered logger, if any
    pub fn get(&self, suffix: &str) -> Option<Arc<LoggerInstance>> {
        self.registry
            .get(&self.logger_id(suffix))
            .map(|entry| entry.value().clone())
    }

    pub fn registered_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.registry.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }
}
