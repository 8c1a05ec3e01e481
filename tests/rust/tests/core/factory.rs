//! Logger factory integration tests

use std::sync::Arc;

use poplog_core::{ConfigError, Environment, LoggerFactory, LoggerOptions};
use pretty_assertions::assert_eq;
use tests::fixtures::{read_log, TestLogging};
use tests::helpers::line_count;

#[test]
fn test_missing_name_is_rejected() {
    let result = LoggerFactory::new(LoggerOptions::new("", "/tmp/logs"), Environment::Production);
    assert_eq!(result.err(), Some(ConfigError::MissingName));
}

#[test]
fn test_missing_log_dir_is_rejected() {
    let result = LoggerFactory::new(LoggerOptions::new("myapp", ""), Environment::Production);
    assert_eq!(result.err(), Some(ConfigError::MissingLogDir));
}

#[test]
fn test_options_from_json() {
    let options: LoggerOptions =
        serde_json::from_str(r#"{"name": "myapp", "logDir": "/var/log/myapp", "pretty": true}"#)
            .unwrap();
    assert_eq!(options.name, "myapp");
    assert!(options.pretty);
    assert!(options.validate().is_ok());
}

#[test]
fn test_repeated_creation_returns_same_instance() {
    let logging = TestLogging::new(Environment::Production);

    let first = logging.factory.create_logger_instance("app", false);
    let second = logging.factory.create_logger_instance("app", true);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.id(), "myapp-app");
    assert_eq!(first.transport_names(), vec!["myapp", "myapp-app"]);
    assert_eq!(logging.factory.registered_ids(), vec!["myapp-app"]);
}

#[test]
fn test_repeated_creation_writes_each_record_once() {
    let logging = TestLogging::new(Environment::Production);

    for _ in 0..3 {
        logging.factory.create_logger_instance("app", false);
    }
    let logger = logging.factory.create_logger_instance("app", false);
    logger.error("only once", &[]);
    drop(logger);

    let (console, dir) = logging.finish();
    assert_eq!(line_count(&console.contents()), 1);
    assert_eq!(line_count(&read_log(dir.path(), "myapp-app")), 1);
}

#[test]
fn test_suffixes_get_separate_files() {
    let logging = TestLogging::new(Environment::Production);

    let app = logging.factory.create_logger_instance("app", false);
    let http = logging.factory.create_logger_instance("http", false);
    app.warn("from app", &[]);
    http.error("from http", &[]);
    drop((app, http));

    let (_, dir) = logging.finish();
    let app_log = read_log(dir.path(), "myapp-app");
    let http_log = read_log(dir.path(), "myapp-http");

    assert!(app_log.contains("from app"));
    assert!(!app_log.contains("from http"));
    assert!(http_log.contains("from http"));
}

#[test]
fn test_test_environment_is_silent() {
    let logging = TestLogging::new(Environment::Test);

    let logger = logging.factory.create_logger_instance("app", true);
    assert!(logger.is_silent());
    logger.error("nobody hears this", &[]);
    logger.info("nor this", &[]);
    drop(logger);

    let log_file = logging.log_file("myapp-app");
    let (console, _dir) = logging.finish();
    assert!(console.is_empty());
    assert_eq!(std::fs::metadata(&log_file).map(|m| m.len()).unwrap_or(0), 0);
}
