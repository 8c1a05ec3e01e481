//! Error types
//!
//! Only [`ConfigError`] ever reaches callers. Transport failures are caught
//! by the logger that owns the transport.

use thiserror::Error;

/// Invalid logger options, raised at construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("'name' and 'logDir' are required options for the logger: missing 'name'")]
    MissingName,
    #[error("'name' and 'logDir' are required options for the logger: missing 'logDir'")]
    MissingLogDir,
}

/// Failure while writing a record to a sink.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport '{transport}' failed to write: {source}")]
    Io {
        transport: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize log record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TransportError {
    pub fn io(transport: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            transport: transport.into(),
            source,
        }
    }
}
