//! Poplog HTTP
//!
//! Request logging for axum applications:
//! - One record per exchange, rendered as `HTTP <method> <url> <status> <ms>ms`
//! - Level chosen from the status code
//! - Request/response metadata, bodies only in development
//! - `LoggingService` wiring the app and HTTP loggers at startup

pub mod exchange;
pub mod middleware;
pub mod options;
pub mod service;

pub use exchange::{RequestInfo, ResponseInfo};
pub use middleware::{http_logging_middleware, HttpLogger, HTTP_SUFFIX};
pub use options::{
    level_for_status, render_http_line, HttpLogOptions, MessageFormatter, RequestField,
    ResponseField,
};
pub use service::{LoggerHandle, LoggerKind, LoggingService, APP_SUFFIX};
