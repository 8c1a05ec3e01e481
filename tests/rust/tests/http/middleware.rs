//! Request logger mounted on a router, writing through real transports

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use http_body_util::BodyExt;
use poplog_core::Environment;
use poplog_http::{render_http_line, HttpLogger, RequestInfo, ResponseInfo};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tests::fixtures::{read_log, TestLogging};
use tests::helpers::line_count;
use tower::ServiceExt;

fn app(http_logger: &HttpLogger) -> Router {
    let router = Router::new()
        .route("/orders", post(|body: String| async move { body }))
        .route("/health", get(|| async { "ok" }))
        .route("/down", get(|| async { StatusCode::BAD_GATEWAY }));
    http_logger.attach(router)
}

async fn call(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

#[test]
fn test_render_http_line_exact() {
    let req = RequestInfo {
        method: "DELETE".to_string(),
        url: "/orders/7?force=true".to_string(),
        ..Default::default()
    };
    let res = ResponseInfo {
        status_code: 204,
        response_time_ms: 3,
        body: None,
    };
    assert_eq!(
        render_http_line(&req, &res),
        "HTTP DELETE /orders/7?force=true 204 3ms"
    );
}

#[tokio::test]
async fn test_production_logs_plain_line_without_bodies() {
    let logging = TestLogging::new(Environment::Production);
    let http_logger = HttpLogger::new(&logging.factory, false);

    let request = Request::post("/orders")
        .body(Body::from("secret order"))
        .unwrap();
    let (status, body) = call(app(&http_logger), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"secret order");
    drop(http_logger);

    let (console, _dir) = logging.finish();
    let output = console.contents();

    assert_eq!(line_count(&output), 1);
    assert!(output.starts_with("info: HTTP POST /orders 200 "));
    assert!(output.contains(r#""method":"POST""#));
    assert!(!output.contains("secret order"));
}

#[tokio::test]
async fn test_development_captures_bodies_in_json_console() {
    let logging = TestLogging::new(Environment::Development);
    let http_logger = HttpLogger::new(&logging.factory, false);

    let request = Request::post("/orders")
        .header("content-type", "application/json")
        .header("authorization", "Bearer abc")
        .body(Body::from(r#"{"sku":"A-1","qty":2}"#))
        .unwrap();
    let (status, _) = call(app(&http_logger), request).await;
    assert_eq!(status, StatusCode::OK);
    drop(http_logger);

    let (console, _dir) = logging.finish();
    let output = console.contents();

    // plain line first, then the pretty-printed JSON record
    let (plain, json) = output.split_once('\n').unwrap();
    assert!(plain.starts_with("info: HTTP POST /orders 200 "));

    let record: Value = serde_json::from_str(json.trim()).unwrap();
    assert_eq!(record["level"], "info");
    assert_eq!(record["req"]["body"]["sku"], "A-1");
    assert_eq!(record["req"]["headers"]["authorization"], "[REDACTED]");
    assert_eq!(record["res"]["body"]["qty"], 2);
    assert_eq!(record["res"]["statusCode"], 200);
}

#[tokio::test]
async fn test_error_responses_reach_the_file() {
    let logging = TestLogging::new(Environment::Production);
    let http_logger = HttpLogger::new(&logging.factory, false);

    let ok = Request::get("/health").body(Body::empty()).unwrap();
    call(app(&http_logger), ok).await;
    let bad_gateway = Request::get("/down").body(Body::empty()).unwrap();
    let (status, _) = call(app(&http_logger), bad_gateway).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    drop(http_logger);

    let (console, dir) = logging.finish();
    assert_eq!(line_count(&console.contents()), 2);

    let file = read_log(dir.path(), "myapp-http");
    assert_eq!(line_count(&file), 1);
    assert!(file.contains("HTTP GET /down 502 "));
}

#[tokio::test]
async fn test_test_environment_logs_nothing() {
    let logging = TestLogging::new(Environment::Test);
    let http_logger = HttpLogger::new(&logging.factory, true);

    let request = Request::get("/down").body(Body::empty()).unwrap();
    let (status, _) = call(app(&http_logger), request).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    drop(http_logger);

    let log_file = logging.log_file("myapp-http");
    let (console, _dir) = logging.finish();
    assert!(console.is_empty());
    assert_eq!(std::fs::metadata(log_file).map(|m| m.len()).unwrap_or(0), 0);
}
