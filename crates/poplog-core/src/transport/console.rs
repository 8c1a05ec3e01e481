//! Console transport

use std::io::Write;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

use super::Transport;
use crate::error::TransportError;
use crate::format::Format;
use crate::level::Level;
use crate::record::LogRecord;

/// Writes one rendered line per record to a console stream (stdout unless a
/// different writer is injected).
pub struct ConsoleTransport {
    name: String,
    format: Format,
    level: Option<Level>,
    writer: Arc<BoxMakeWriter>,
}

impl ConsoleTransport {
    pub fn new(name: impl Into<String>, format: Format) -> Self {
        Self {
            name: name.into(),
            format,
            level: None,
            writer: Arc::new(BoxMakeWriter::new(std::io::stdout)),
        }
    }

    pub fn with_writer(mut self, writer: Arc<BoxMakeWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn format(&self) -> &Format {
        &self.format
    }
}

impl Transport for ConsoleTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> Option<Level> {
        self.level
    }

    fn log(&self, record: &LogRecord) -> Result<(), TransportError> {
        let mut line = self.format.render(record.clone())?;
        line.push('\n');

        let mut writer = self.writer.make_writer();
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| TransportError::io(&self.name, e))
    }
}
