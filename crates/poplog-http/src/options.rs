//! HTTP logging options

use poplog_core::{Environment, Level};

use crate::exchange::{RequestInfo, ResponseInfo};

/// Request fields that can be captured into a record's metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestField {
    Url,
    Headers,
    Method,
    HttpVersion,
    OriginalUrl,
    Query,
    Body,
}

impl RequestField {
    /// Captured unless configured otherwise
    pub const DEFAULT: [RequestField; 6] = [
        RequestField::Url,
        RequestField::Headers,
        RequestField::Method,
        RequestField::HttpVersion,
        RequestField::OriginalUrl,
        RequestField::Query,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Headers => "headers",
            Self::Method => "method",
            Self::HttpVersion => "httpVersion",
            Self::OriginalUrl => "originalUrl",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

/// Response fields that can be captured into a record's metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseField {
    StatusCode,
    Body,
}

impl ResponseField {
    pub const DEFAULT: [ResponseField; 1] = [ResponseField::StatusCode];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StatusCode => "statusCode",
            Self::Body => "body",
        }
    }
}

/// Renders the message of an HTTP record
pub type MessageFormatter = fn(&RequestInfo, &ResponseInfo) -> String;

/// `HTTP GET /items 200 12ms`
pub fn render_http_line(req: &RequestInfo, res: &ResponseInfo) -> String {
    format!(
        "HTTP {} {} {} {}ms",
        req.method, req.url, res.status_code, res.response_time_ms
    )
}

/// 5xx → error, 4xx → warn, everything else → info
pub fn level_for_status(status_code: u16) -> Level {
    match status_code {
        500.. => Level::Error,
        400..=499 => Level::Warn,
        _ => Level::Info,
    }
}

#[derive(Clone)]
pub struct HttpLogOptions {
    /// Attach request/response metadata to each record
    pub meta: bool,
    pub request_fields: Vec<RequestField>,
    pub response_fields: Vec<ResponseField>,
    pub msg: MessageFormatter,
    /// Pick the level from the status code instead of always using `level`
    pub status_levels: bool,
    pub level: Level,
}

impl Default for HttpLogOptions {
    fn default() -> Self {
        Self {
            meta: true,
            request_fields: RequestField::DEFAULT.to_vec(),
            response_fields: ResponseField::DEFAULT.to_vec(),
            msg: render_http_line,
            status_levels: true,
            level: Level::Info,
        }
    }
}

impl std::fmt::Debug for HttpLogOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLogOptions")
            .field("meta", &self.meta)
            .field("request_fields", &self.request_fields)
            .field("response_fields", &self.response_fields)
            .field("status_levels", &self.status_levels)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl HttpLogOptions {
    /// Defaults, plus request and response bodies in development
    pub fn for_environment(environment: Environment) -> Self {
        let mut options = Self::default();
        if environment.is_development() {
            options.request_fields.push(RequestField::Body);
            options.response_fields.push(ResponseField::Body);
        }
        options
    }

    pub fn captures_request_body(&self) -> bool {
        self.request_fields.contains(&RequestField::Body)
    }

    pub fn captures_response_body(&self) -> bool {
        self.response_fields.contains(&ResponseField::Body)
    }

    pub fn level_for(&self, status_code: u16) -> Level {
        if self.status_levels {
            level_for_status(status_code)
        } else {
            self.level
        }
    }
}
