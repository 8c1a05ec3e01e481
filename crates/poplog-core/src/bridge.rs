//! `tracing` bridge
//!
//! [`LoggerLayer`] forwards `tracing` events to a [`LoggerInstance`], which
//! makes the general-purpose logger reachable from anywhere through the
//! usual `tracing` macros once [`install_global`] has run.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer};

use crate::logger::LoggerInstance;
use crate::record::LogRecord;

/// Targets whose events never reach the bridged logger. These are the
/// loggers' own diagnostics, which may fire while a record is being written.
const INTERNAL_TARGETS: &[&str] = &["poplog_core", "poplog_http"];

pub fn is_internal_target(target: &str) -> bool {
    INTERNAL_TARGETS.iter().any(|t| target.starts_with(t))
}

/// Layer turning `tracing` events into log records
pub struct LoggerLayer {
    logger: Arc<LoggerInstance>,
}

impl LoggerLayer {
    pub fn new(logger: Arc<LoggerInstance>) -> Self {
        Self { logger }
    }
}

impl<S: Subscriber> Layer<S> for LoggerLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if is_internal_target(metadata.target()) {
            return;
        }

        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let mut record = LogRecord::with_level_name(level_name(metadata.level()), visitor.message);
        if !visitor.fields.is_empty() {
            record.meta = Some(visitor.fields);
        }
        self.logger.log(record);
    }
}

/// `TRACE` has no place in the level scheme and comes out as `trace`, which
/// loggers drop.
fn level_name(level: &tracing::Level) -> &'static str {
    match *level {
        tracing::Level::ERROR => "error",
        tracing::Level::WARN => "warn",
        tracing::Level::INFO => "info",
        tracing::Level::DEBUG => "debug",
        tracing::Level::TRACE => "trace",
    }
}

#[derive(Default)]
struct RecordVisitor {
    message: String,
    fields: Map<String, Value>,
}

impl RecordVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.insert(field, Value::from(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.insert(field, Value::from(format!("{:?}", value)));
        }
    }
}

/// Install `logger` as the process-wide `tracing` subscriber.
///
/// `RUST_LOG` narrows what is forwarded; without it everything down to
/// `debug` is.
pub fn install_global(logger: Arc<LoggerInstance>) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(LoggerLayer::new(logger))
        .try_init()
}
