//! Panic routing
//!
//! Panics are reported to the exception-handling transports of a logger (the
//! log file) before the previous panic hook runs.

use std::any::Any;
use std::panic::{self, PanicHookInfo};
use std::sync::Arc;

use crate::level::Level;
use crate::logger::LoggerInstance;
use crate::record::LogRecord;

/// Chain a panic hook that logs every panic through `logger`.
pub fn route_panics(logger: Arc<LoggerInstance>) {
    route_panics_to(vec![logger]);
}

/// Chain a panic hook that logs every panic through each of `loggers`.
pub fn route_panics_to(loggers: Vec<Arc<LoggerInstance>>) {
    let previous_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
        let record = panic_record(info);
        for logger in &loggers {
            logger.log_exception(record.clone());
        }
        previous_hook(info);
    }));
}

/// `uncaughtException: <message>`, with the location as metadata
pub fn panic_record(info: &PanicHookInfo<'_>) -> LogRecord {
    let message = format!("uncaughtException: {}", panic_message(info.payload()));
    let record = LogRecord::new(Level::Error, message);

    match info.location() {
        Some(location) => record.with_meta(
            "location",
            serde_json::Value::from(format!(
                "{}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            )),
        ),
        None => record,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}
