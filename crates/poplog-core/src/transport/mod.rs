//! Output targets for log records

mod console;
mod file;

pub use console::ConsoleTransport;
pub use file::{FileTransport, SizeCappedFile};

use crate::error::TransportError;
use crate::level::Level;
use crate::record::LogRecord;

/// A sink plus the format used to render records into it.
pub trait Transport: Send + Sync {
    /// Identifier, unique within one logger
    fn name(&self) -> &str;

    /// Severity floor for this transport only; `None` accepts every level the
    /// logger accepts
    fn level(&self) -> Option<Level> {
        None
    }

    /// Whether panic reports are routed here
    fn handles_exceptions(&self) -> bool {
        false
    }

    /// Render and write one record
    fn log(&self, record: &LogRecord) -> Result<(), TransportError>;

    /// Whether this transport would write a record at `level`
    fn accepts(&self, level: Level) -> bool {
        self.level().is_none_or(|floor| level.allows(floor))
    }
}
