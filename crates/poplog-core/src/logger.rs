//! Named logger instances

use std::fmt::{self, Display};

use parking_lot::RwLock;
use tracing::debug;

use crate::format::{stamp_timestamp, ElapsedClock};
use crate::level::Level;
use crate::record::LogRecord;
use crate::transport::Transport;

/// A named logger writing every accepted record to each of its transports.
///
/// Records are stamped (timestamp, elapsed since this logger's previous
/// record) once, before fan-out, so every transport shows the same values.
/// Transport failures are contained here: the record is dropped for that
/// transport and the logger stays usable.
pub struct LoggerInstance {
    id: String,
    silent: bool,
    level: Level,
    clock: ElapsedClock,
    transports: RwLock<Vec<Box<dyn Transport>>>,
}

impl LoggerInstance {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            silent: false,
            level: Level::Debug,
            clock: ElapsedClock::new(),
            transports: RwLock::new(Vec::new()),
        }
    }

    /// Suppress all output
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Least severe level this logger accepts
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_transport(self, transport: impl Transport + 'static) -> Self {
        self.add_transport(transport);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Attach a transport. Returns `false` if one with the same name is
    /// already attached.
    pub fn add_transport(&self, transport: impl Transport + 'static) -> bool {
        let mut transports = self.transports.write();
        if transports.iter().any(|t| t.name() == transport.name()) {
            return false;
        }
        transports.push(Box::new(transport));
        true
    }

    pub fn transport_names(&self) -> Vec<String> {
        self.transports
            .read()
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }

    /// Whether a record at `level` would be written anywhere
    pub fn enabled(&self, level: Level) -> bool {
        !self.silent && level.allows(self.level)
    }

    /// Send a record to every transport whose floor it passes. Records with
    /// a level outside the scheme are dropped.
    pub fn log(&self, record: LogRecord) {
        let Some(level) = record.parsed_level() else {
            debug!(logger = %self.id, level = %record.level, "Dropping record with unknown level");
            return;
        };
        if !self.enabled(level) {
            return;
        }

        let record = self.stamp(record);
        for transport in self.transports.read().iter() {
            if !transport.accepts(level) {
                continue;
            }
            if let Err(e) = transport.log(&record) {
                debug!(logger = %self.id, "Log record dropped: {}", e);
            }
        }
    }

    /// Write a record only to the transports that handle exceptions
    pub fn log_exception(&self, record: LogRecord) {
        if self.silent {
            return;
        }
        let record = self.stamp(record);
        for transport in self.transports.read().iter() {
            if transport.handles_exceptions() {
                if let Err(e) = transport.log(&record) {
                    debug!(logger = %self.id, "Exception record dropped: {}", e);
                }
            }
        }
    }

    fn stamp(&self, record: LogRecord) -> LogRecord {
        let mut record = stamp_timestamp(record);
        let elapsed = self.clock.tick();
        record.elapsed_ms.get_or_insert(elapsed);
        record
    }

    pub fn log_with(&self, level: Level, message: impl Into<String>, args: &[&dyn Display]) {
        if !self.enabled(level) {
            return;
        }
        self.log(LogRecord::new(level, message).with_splat(args.iter().map(|a| a.to_string())));
    }

    pub fn error(&self, message: impl Into<String>, args: &[&dyn Display]) {
        self.log_with(Level::Error, message, args);
    }

    pub fn warn(&self, message: impl Into<String>, args: &[&dyn Display]) {
        self.log_with(Level::Warn, message, args);
    }

    pub fn info(&self, message: impl Into<String>, args: &[&dyn Display]) {
        self.log_with(Level::Info, message, args);
    }

    pub fn debug(&self, message: impl Into<String>, args: &[&dyn Display]) {
        self.log_with(Level::Debug, message, args);
    }
}

impl fmt::Debug for LoggerInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerInstance")
            .field("id", &self.id)
            .field("silent", &self.silent)
            .field("level", &self.level)
            .field("transports", &self.transport_names())
            .finish()
    }
}
