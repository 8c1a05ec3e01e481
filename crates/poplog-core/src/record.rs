//! Log record flowing through the formatter pipeline

use serde::Serialize;

use crate::level::Level;

/// A single log call.
///
/// The level is kept as a name rather than a [`Level`] so records coming from
/// outside the scheme (e.g. a `trace` event) can still be rendered.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: String,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(rename = "ms", skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<u64>,

    /// Positional arguments for the placeholders in `message`
    #[serde(skip)]
    pub splat: Vec<String>,

    /// Structured metadata, flattened into JSON output
    #[serde(flatten)]
    pub meta: Option<serde_json::Map<String, serde_json::Value>>,
}

impl LogRecord {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self::with_level_name(level.as_str(), message)
    }

    /// Create a record for an arbitrary level name
    pub fn with_level_name(level: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            message: message.into(),
            timestamp: None,
            elapsed_ms: None,
            splat: Vec::new(),
            meta: None,
        }
    }

    pub fn with_splat<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.splat = args.into_iter().map(|a| a.to_string()).collect();
        self
    }

    /// Attach one metadata entry
    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.into(), value);
        self
    }

    /// The level, if it belongs to the scheme
    pub fn parsed_level(&self) -> Option<Level> {
        Level::parse(&self.level)
    }
}
