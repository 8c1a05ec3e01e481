//! Logging service wiring

use std::sync::Arc;

use poplog_core::Environment;
use poplog_http::{LoggerHandle, LoggerKind, LoggingService};
use pretty_assertions::assert_eq;
use tests::fixtures::{read_log, TestLogging};
use tests::helpers::line_count;

#[test]
fn test_get_logger_dispatch() {
    let logging = TestLogging::new(Environment::Production);
    let service = LoggingService::from_factory(logging.factory);

    assert!(matches!(
        service.get_logger(Some("Logger"), false),
        Some(LoggerHandle::App(_))
    ));
    assert!(matches!(
        service.get_logger(Some("HTTP"), false),
        Some(LoggerHandle::Http(_))
    ));
    assert!(service.get_logger(Some("audit"), false).is_none());
    assert!(service.get_logger(None, true).is_none());
}

#[test]
fn test_handles_share_registered_instances() {
    let logging = TestLogging::new(Environment::Development);
    let service = LoggingService::from_factory(logging.factory);

    let app = service.get(LoggerKind::App, true);
    let http = service.get(LoggerKind::Http, true);

    assert!(Arc::ptr_eq(app.logger(), service.logger()));
    assert!(Arc::ptr_eq(http.logger(), service.http_logger().logger()));
    assert_eq!(
        http.logger().transport_names(),
        vec!["myapp", "myapp-http", "myapp-json"]
    );
}

#[test]
fn test_app_logger_writes_to_its_file() {
    let logging = TestLogging::new(Environment::Production);
    let dir = logging.log_dir;
    let service = LoggingService::from_factory(logging.factory);

    service.logger().error("payment failed for order %s", &[&"o-17"]);
    drop(service);

    let file = read_log(dir.path(), "myapp-app");
    assert_eq!(line_count(&file), 1);
    assert!(file.contains("payment failed for order o-17"));
    assert_eq!(read_log(dir.path(), "myapp-http"), "");
}
