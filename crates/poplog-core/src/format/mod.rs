//! Record formats
//!
//! - `Pretty` - the full timestamp/elapsed/color pipeline
//! - `Plain` - `level: message`, no color or padding
//! - `Json` - the whole record, indented

pub mod interpolate;
mod pretty;

pub use interpolate::{interpolate, placeholder_count};
pub use pretty::{
    extract_message, humanize_elapsed, interpolate_message, stamp_timestamp, ElapsedClock,
    PrettyFormatter,
};

use crate::record::LogRecord;

/// How a transport renders records
#[derive(Debug)]
pub enum Format {
    Pretty(PrettyFormatter),
    Plain,
    Json,
}

impl Format {
    /// Render a record into one output entry (without trailing newline).
    pub fn render(&self, record: LogRecord) -> Result<String, serde_json::Error> {
        match self {
            Self::Pretty(formatter) => Ok(formatter.render(record)),
            Self::Plain => Ok(render_plain(record)),
            Self::Json => render_json(&record),
        }
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty(_))
    }
}

/// `level: message`, with any metadata appended as compact JSON
pub fn render_plain(record: LogRecord) -> String {
    let record = interpolate_message(record);
    match &record.meta {
        Some(meta) if !meta.is_empty() => {
            let meta = serde_json::Value::Object(meta.clone());
            format!("{}: {} {}", record.level, record.message, meta)
        }
        _ => format!("{}: {}", record.level, record.message),
    }
}

/// The full record as JSON with 2-space indentation
pub fn render_json(record: &LogRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}
