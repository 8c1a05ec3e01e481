//! HTTP request logging middleware
//!
//! One record per exchange, written once the response has been produced.
//! Logging never changes the outcome of the request.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, HttpBody},
    extract::{OriginalUri, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use http_body_util::{BodyExt, Limited};
use serde_json::Value;
use tracing::{debug, warn};

use poplog_core::{ConsoleTransport, Format, LogRecord, LoggerFactory, LoggerInstance};

use crate::exchange::{body_value, RequestInfo, ResponseInfo, MAX_BODY_LOG_SIZE};
use crate::options::HttpLogOptions;

/// Logger suffix for HTTP traffic
pub const HTTP_SUFFIX: &str = "http";

/// HTTP logger: a logger instance plus the options deciding what each
/// exchange record contains. Cheap to clone.
#[derive(Clone, Debug)]
pub struct HttpLogger {
    logger: Arc<LoggerInstance>,
    options: Arc<HttpLogOptions>,
}

impl HttpLogger {
    /// Build the HTTP logger on the factory's `<name>-http` instance.
    ///
    /// In development the instance also gets a JSON console target and
    /// bodies are captured.
    pub fn new(factory: &LoggerFactory, pretty: bool) -> Self {
        let logger = factory.create_logger_instance(HTTP_SUFFIX, pretty);
        let environment = factory.environment();

        if environment.is_development() {
            let json_console = ConsoleTransport::new(format!("{}-json", factory.name()), Format::Json)
                .with_writer(factory.console_writer());
            if logger.add_transport(json_console) {
                debug!(logger = %logger.id(), "Attached JSON console for development");
            }
        }

        Self::with_options(logger, HttpLogOptions::for_environment(environment))
    }

    pub fn with_options(logger: Arc<LoggerInstance>, options: HttpLogOptions) -> Self {
        Self {
            logger,
            options: Arc::new(options),
        }
    }

    pub fn logger(&self) -> &Arc<LoggerInstance> {
        &self.logger
    }

    pub fn options(&self) -> &HttpLogOptions {
        &self.options
    }

    /// The record written for an exchange
    pub fn exchange_record(&self, req: &RequestInfo, res: &ResponseInfo) -> LogRecord {
        let level = self.options.level_for(res.status_code);
        let record = LogRecord::new(level, (self.options.msg)(req, res));

        if !self.options.meta {
            return record;
        }
        record
            .with_meta("req", req.to_meta(&self.options.request_fields))
            .with_meta("res", res.to_meta(&self.options.response_fields))
            .with_meta("responseTime", Value::from(res.response_time_ms))
    }

    pub fn log_exchange(&self, req: &RequestInfo, res: &ResponseInfo) {
        self.logger.log(self.exchange_record(req, res));
    }

    /// Wrap every route of `router` with the logging middleware
    pub fn attach<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(middleware::from_fn_with_state(
            self.clone(),
            http_logging_middleware,
        ))
    }
}

/// Axum middleware writing one record per request
pub async fn http_logging_middleware(
    State(http_logger): State<HttpLogger>,
    request: Request,
    next: Next,
) -> Response {
    let started_at = Instant::now();
    let options = http_logger.options();

    let original_url = request
        .extensions()
        .get::<OriginalUri>()
        .and_then(|uri| uri.0.path_and_query().map(|pq| pq.as_str().to_string()));
    let (parts, body) = request.into_parts();
    let mut req_info = RequestInfo::from_parts(&parts, original_url);

    let request = if !options.captures_request_body() {
        Request::from_parts(parts, body)
    } else if let Some(skipped) = skipped_body(&parts.headers, &body) {
        req_info.body = Some(skipped);
        Request::from_parts(parts, body)
    } else {
        match Limited::new(body, MAX_BODY_LOG_SIZE).collect().await {
            Ok(collected) => {
                let bytes = collected.to_bytes();
                req_info.body = Some(body_value(&bytes));
                Request::from_parts(parts, Body::from(bytes))
            }
            Err(e) => {
                warn!("Failed to read request body: {}", e);
                return reject_request(&http_logger, &req_info, started_at);
            }
        }
    };

    let response = next.run(request).await;

    let (mut parts, body) = response.into_parts();
    let mut res_info = ResponseInfo {
        status_code: parts.status.as_u16(),
        ..Default::default()
    };

    let response = if !options.captures_response_body() {
        Response::from_parts(parts, body)
    } else if let Some(skipped) = skipped_body(&parts.headers, &body) {
        res_info.body = Some(skipped);
        Response::from_parts(parts, body)
    } else {
        match Limited::new(body, MAX_BODY_LOG_SIZE).collect().await {
            Ok(collected) => {
                let bytes = collected.to_bytes();
                res_info.body = Some(body_value(&bytes));
                Response::from_parts(parts, Body::from(bytes))
            }
            Err(e) => {
                // The handler's status and headers still go out; only the
                // unreadable body is lost.
                warn!("Failed to read response body: {}", e);
                parts.headers.remove(header::CONTENT_LENGTH);
                Response::from_parts(parts, Body::empty())
            }
        }
    };

    res_info.response_time_ms = started_at.elapsed().as_millis() as u64;
    http_logger.log_exchange(&req_info, &res_info);

    response
}

/// Content types whose bodies are streamed and never buffered
const STREAMING_CONTENT_TYPES: &[&str] = &["text/event-stream", "application/x-ndjson"];

/// Placeholder for a body that is passed through without buffering:
/// streaming content types, and bodies that are unbounded or larger than
/// [`MAX_BODY_LOG_SIZE`].
fn skipped_body(headers: &HeaderMap, body: &Body) -> Option<Value> {
    let streaming = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            let ct = ct.to_ascii_lowercase();
            STREAMING_CONTENT_TYPES.iter().any(|s| ct.starts_with(s))
        });
    if streaming {
        return Some(Value::from("[stream]"));
    }

    match body.size_hint().upper() {
        Some(size) if size as usize <= MAX_BODY_LOG_SIZE => None,
        Some(size) => Some(Value::from(format!("[{} bytes]", size))),
        None => Some(Value::from("[stream]")),
    }
}

/// The request body could not be read: answer 400 without running the
/// handler and still log the exchange
fn reject_request(http_logger: &HttpLogger, req_info: &RequestInfo, started_at: Instant) -> Response {
    let status = StatusCode::BAD_REQUEST;
    let res_info = ResponseInfo {
        status_code: status.as_u16(),
        response_time_ms: started_at.elapsed().as_millis() as u64,
        body: None,
    };
    http_logger.log_exchange(req_info, &res_info);
    status.into_response()
}
