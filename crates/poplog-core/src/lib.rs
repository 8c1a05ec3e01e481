//! # Poplog Core Library
//!
//! Named loggers writing to a console stream and a size-capped log file.
//!
//! ## Modules
//!
//! - `level` - Level scheme and console colors
//! - `record` - Log record passed through formatting
//! - `format` - Pretty pipeline, plain and JSON formats
//! - `transport` - Console and file output targets
//! - `logger` - Logger instances
//! - `factory` - Transport builders and the logger registry
//! - `config` - Logger options and runtime environment
//! - `bridge` - Forwarding `tracing` events to a logger
//! - `panic` - Routing panics into the log file

pub mod bridge;
pub mod config;
pub mod error;
pub mod factory;
pub mod format;
pub mod level;
pub mod logger;
pub mod panic;
pub mod record;
pub mod transport;

// Re-export commonly used types
pub use bridge::{install_global, LoggerLayer};
pub use config::{Environment, LoggerOptions, MAX_LOG_FILE_SIZE};
pub use error::{ConfigError, TransportError};
pub use factory::LoggerFactory;
pub use format::{Format, PrettyFormatter};
pub use level::{color_for, ColorCode, Level};
pub use logger::LoggerInstance;
pub use panic::{route_panics, route_panics_to};
pub use record::LogRecord;
pub use transport::{ConsoleTransport, FileTransport, Transport};
