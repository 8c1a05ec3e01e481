//! Request/response data captured for one HTTP exchange

use axum::http::{request, HeaderMap, Version};
use serde_json::{Map, Value};

use crate::options::{RequestField, ResponseField};

/// Bodies above this size are logged as a byte count (1MB)
pub const MAX_BODY_LOG_SIZE: usize = 1024 * 1024;

/// Headers whose values are never logged
const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie", "x-api-key"];

/// The request side of an exchange
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestInfo {
    pub method: String,
    /// Path and query as routed
    pub url: String,
    /// Path and query as received, before any nesting stripped a prefix
    pub original_url: String,
    pub http_version: String,
    pub headers: Map<String, Value>,
    pub query: Map<String, Value>,
    pub body: Option<Value>,
}

impl RequestInfo {
    pub fn from_parts(parts: &request::Parts, original_url: Option<String>) -> Self {
        let url = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        Self {
            method: parts.method.to_string(),
            original_url: original_url.unwrap_or_else(|| url.clone()),
            url,
            http_version: http_version(parts.version).to_string(),
            headers: redact_headers(&parts.headers),
            query: parse_query(parts.uri.query()),
            body: None,
        }
    }

    /// Only the allow-listed fields, keyed the way they appear in the log
    pub fn to_meta(&self, fields: &[RequestField]) -> Value {
        let mut meta = Map::new();
        for field in fields {
            let value = match field {
                RequestField::Url => Value::from(self.url.as_str()),
                RequestField::Headers => Value::Object(self.headers.clone()),
                RequestField::Method => Value::from(self.method.as_str()),
                RequestField::HttpVersion => Value::from(self.http_version.as_str()),
                RequestField::OriginalUrl => Value::from(self.original_url.as_str()),
                RequestField::Query => Value::Object(self.query.clone()),
                RequestField::Body => self.body.clone().unwrap_or(Value::Null),
            };
            meta.insert(field.as_str().to_string(), value);
        }
        Value::Object(meta)
    }
}

/// The response side of an exchange
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseInfo {
    pub status_code: u16,
    pub response_time_ms: u64,
    pub body: Option<Value>,
}

impl ResponseInfo {
    pub fn to_meta(&self, fields: &[ResponseField]) -> Value {
        let mut meta = Map::new();
        for field in fields {
            let value = match field {
                ResponseField::StatusCode => Value::from(self.status_code),
                ResponseField::Body => self.body.clone().unwrap_or(Value::Null),
            };
            meta.insert(field.as_str().to_string(), value);
        }
        Value::Object(meta)
    }
}

pub fn http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        _ => "1.1",
    }
}

/// All headers, with credentials replaced by `[REDACTED]`
pub fn redact_headers(headers: &HeaderMap) -> Map<String, Value> {
    let mut out = Map::new();
    for name in headers.keys() {
        let key = name.as_str().to_lowercase();
        let value = if SENSITIVE_HEADERS.contains(&key.as_str()) {
            "[REDACTED]".to_string()
        } else {
            headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        out.insert(key, Value::from(value));
    }
    out
}

/// Query string as an object; repeated keys collect into an array
pub fn parse_query(query: Option<&str>) -> Map<String, Value> {
    let mut out = Map::new();
    let Some(query) = query else {
        return out;
    };

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let value = Value::from(value.into_owned());
        match out.get_mut(key.as_ref()) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                out.insert(key.into_owned(), value);
            }
        }
    }
    out
}

/// Body as JSON when it parses, text otherwise; binary and oversized bodies
/// are summarized.
pub fn body_value(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }

    if bytes.len() > MAX_BODY_LOG_SIZE {
        return Value::from(format!("[{} bytes]", bytes.len()));
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => serde_json::from_str(text).unwrap_or_else(|_| Value::from(text)),
        Err(_) => Value::from(format!("[binary: {} bytes]", bytes.len())),
    }
}
